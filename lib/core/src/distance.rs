// Euclidean distance kernels for low-dimensional feature vectors.
// Catalog vectors are 3 or 4 wide, so the scalar path with two
// accumulators is the hot path; wider inputs fall through the same loop.

/// Squared L2 distance between two equal-length slices
#[inline]
pub fn l2_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }

    let mut sum0 = 0.0f32;
    let mut sum1 = 0.0f32;

    let chunks = a.chunks_exact(4);
    let remainder = chunks.remainder();
    let b_chunks = b.chunks_exact(4);

    for (a_chunk, b_chunk) in chunks.zip(b_chunks) {
        let d0 = a_chunk[0] - b_chunk[0];
        let d1 = a_chunk[1] - b_chunk[1];
        let d2 = a_chunk[2] - b_chunk[2];
        let d3 = a_chunk[3] - b_chunk[3];

        sum0 += d0 * d0 + d1 * d1;
        sum1 += d2 * d2 + d3 * d3;
    }

    for i in (a.len() - remainder.len())..a.len() {
        let diff = a[i] - b[i];
        sum0 += diff * diff;
    }

    sum0 + sum1
}

/// L2 (Euclidean) distance
#[inline]
pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    l2_distance_squared(a, b).sqrt()
}

/// Map a raw distance to a display similarity in (0, 1].
///
/// `1 / (1 + d)` is 1 only at `d == 0` and strictly decreasing in `d`.
#[inline]
pub fn similarity_from_distance(distance: f32) -> f32 {
    1.0 / (1.0 + distance.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_distance_three_four_five() {
        assert!((l2_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_l2_distance_chunked_and_remainder() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [0.0, 0.0, 0.0, 0.0, 0.0];
        assert!((l2_distance_squared(&a, &b) - 55.0).abs() < 1e-5);
    }

    #[test]
    fn test_l2_distance_length_mismatch() {
        assert!(l2_distance(&[1.0], &[1.0, 2.0]).is_infinite());
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity_from_distance(0.0), 1.0);
        let distances = [0.0f32, 0.001, 0.5, 1.0, 3.0, 100.0];
        for pair in distances.windows(2) {
            let near = similarity_from_distance(pair[0]);
            let far = similarity_from_distance(pair[1]);
            assert!(near > far, "{} should exceed {}", near, far);
            assert!(far > 0.0 && far < 1.0);
        }
    }
}
