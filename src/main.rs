use clap::Parser;
use recx_api::RestApi;
use recx_catalog::{FeatureWeights, ModelConfig, RecommendationService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Similar-product recommendations over a product catalog
#[derive(Parser, Debug)]
#[command(name = "recx")]
#[command(about = "Item-to-item product recommendation server", long_about = None)]
struct Args {
    /// Path to the product dataset (CSV with header)
    #[arg(short, long, default_value = "data/amazon.csv")]
    dataset: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 3000)]
    http_port: u16,

    /// Number of recommendations per query
    #[arg(long, default_value_t = recx_catalog::DEFAULT_TOP_K)]
    top_k: usize,

    /// Leave category out of the feature space (price/rating/count only)
    #[arg(long)]
    exclude_category: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting RecX v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);
    info!("HTTP API port: {}", args.http_port);

    if args.top_k == 0 {
        anyhow::bail!("--top-k must be at least 1");
    }

    let config = ModelConfig {
        dataset_path: args.dataset,
        weights: if args.exclude_category {
            FeatureWeights::without_category()
        } else {
            FeatureWeights::with_category()
        },
        top_k: args.top_k,
    };

    // The model is built before the server accepts traffic; a failed build
    // still serves the health endpoint so the failure is observable.
    let service = Arc::new(RecommendationService::new());
    let build_service = service.clone();
    let build = tokio::task::spawn_blocking(move || build_service.initialize(&config)).await?;
    match build {
        Ok(()) => info!("Recommendation model ready"),
        Err(e) => error!("Serving without a model: {}", e),
    }

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(service, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("RecX started successfully");
    info!("HTTP API: http://localhost:{}/api/recommendations/health", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
