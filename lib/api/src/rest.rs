use actix_cors::Cors;
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer, Result as ActixResult};
use recx_catalog::{CatalogEntry, CategoryCount, QueryError, RecommendationService};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Serialize)]
struct SuccessEnvelope<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
struct CategoryList {
    categories: Vec<CategoryCount>,
}

#[derive(Serialize)]
struct ProductList {
    products: Vec<CatalogEntry>,
}

#[derive(Serialize)]
struct ProductDetail {
    product: CatalogEntry,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        service: Arc<RecommendationService>,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(service.clone()))
                .configure(RestApi::routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register the recommendation and catalog routes on an app
    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/api/recommendations/health", web::get().to(health))
            .route(
                "/api/recommendations/product/{product_id}",
                web::get().to(recommend_by_id),
            )
            .route(
                "/api/recommendations/{position}",
                web::get().to(recommend_by_position),
            )
            .route("/api/categories", web::get().to(list_categories))
            .route("/api/categories/top", web::get().to(list_top_categories))
            .route("/api/products/catalog", web::get().to(list_catalog))
            .route("/api/products/catalog/n/{num}", web::get().to(list_catalog_head))
            .route("/api/products/catalog/{category}", web::get().to(list_catalog_category))
            .route("/api/products/featured/{num}", web::get().to(list_featured))
            .route("/api/products/{product_id}", web::get().to(get_product));
    }
}

fn status_for(error: &QueryError) -> StatusCode {
    match error {
        QueryError::InvalidIndex { .. } => StatusCode::BAD_REQUEST,
        QueryError::NotFound(_) => StatusCode::NOT_FOUND,
        QueryError::ModelNotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
        QueryError::Index(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond<T: Serialize>(result: Result<T, QueryError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(SuccessEnvelope {
            success: true,
            body,
        }),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                warn!("Query failed: {}", e);
            } else {
                debug!("Query rejected: {}", e);
            }
            HttpResponse::build(status).json(ErrorEnvelope {
                success: false,
                error: e.to_string(),
            })
        }
    }
}

async fn health(
    service: web::Data<Arc<RecommendationService>>,
) -> ActixResult<HttpResponse> {
    let readiness = service.readiness();
    if readiness.is_ready() {
        Ok(HttpResponse::Ok().json(readiness))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(readiness))
    }
}

async fn recommend_by_position(
    service: web::Data<Arc<RecommendationService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let raw = path.into_inner();
    let position = match raw.parse::<i64>() {
        Ok(p) => p,
        Err(_) => return Ok(bad_request(format!("Invalid product index: {}", raw))),
    };

    Ok(respond(service.recommend_by_position(position)))
}

async fn recommend_by_id(
    service: web::Data<Arc<RecommendationService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let product_id = path.into_inner();
    Ok(respond(service.recommend_by_id(&product_id)))
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorEnvelope {
        success: false,
        error: message,
    })
}

async fn list_categories(
    service: web::Data<Arc<RecommendationService>>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        service.categories().map(|categories| CategoryList { categories }),
    ))
}

async fn list_top_categories(
    service: web::Data<Arc<RecommendationService>>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        service
            .top_level_categories()
            .map(|categories| CategoryList { categories }),
    ))
}

async fn list_catalog(
    service: web::Data<Arc<RecommendationService>>,
) -> ActixResult<HttpResponse> {
    Ok(respond(service.catalog(None).map(|products| ProductList { products })))
}

async fn list_catalog_head(
    service: web::Data<Arc<RecommendationService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let raw = path.into_inner();
    let Ok(num) = raw.parse::<usize>() else {
        return Ok(bad_request(format!("Invalid product count: {}", raw)));
    };
    Ok(respond(
        service.catalog(Some(num)).map(|products| ProductList { products }),
    ))
}

async fn list_catalog_category(
    service: web::Data<Arc<RecommendationService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let category = path.into_inner();
    Ok(respond(
        service
            .catalog_in_category(&category)
            .map(|products| ProductList { products }),
    ))
}

async fn list_featured(
    service: web::Data<Arc<RecommendationService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let raw = path.into_inner();
    let Ok(num) = raw.parse::<usize>() else {
        return Ok(bad_request(format!("Invalid product count: {}", raw)));
    };
    Ok(respond(service.featured(num).map(|products| ProductList { products })))
}

async fn get_product(
    service: web::Data<Arc<RecommendationService>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let product_id = path.into_inner();
    Ok(respond(
        service.product(&product_id).map(|product| ProductDetail { product }),
    ))
}
