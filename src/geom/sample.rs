use geo::{Area, BoundingRect, Intersects, MultiPolygon, Point, Rect};
use rand::Rng;

/// Default cap on candidate draws per accepted point.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

/// Reasons a polygon cannot be sampled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// The polygon is empty or has zero area; no candidate can ever be accepted.
    #[error("cannot sample from an empty or zero-area polygon")]
    DegenerateGeometry,

    /// No candidate was accepted within the attempt cap.
    #[error("no point accepted after {attempts} draws")]
    RetryLimit { attempts: usize },
}

/// Draw `n` points uniformly distributed over the area of `polygon` by rejection sampling.
///
/// Candidates are drawn uniformly from the bounding box and accepted when they lie inside
/// the polygon or on its boundary. Each accepted point may take at most `max_attempts` draws.
/// `n = 0` returns no points without inspecting the polygon.
pub fn sample_points(
    polygon: &MultiPolygon<f64>,
    n: usize,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Point<f64>>, SampleError> {
    if n == 0 { return Ok(Vec::new()) }

    let bounds = polygon.bounding_rect().ok_or(SampleError::DegenerateGeometry)?;
    let area = polygon.unsigned_area();
    if !(area.is_finite() && area > 0.0) { return Err(SampleError::DegenerateGeometry) }

    (0..n)
        .map(|_| sample_point(polygon, &bounds, max_attempts, &mut *rng))
        .collect()
}

/// Draw candidates until one falls within the polygon.
fn sample_point(
    polygon: &MultiPolygon<f64>,
    bounds: &Rect<f64>,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> Result<Point<f64>, SampleError> {
    for _ in 0..max_attempts {
        let candidate = Point::new(
            rng.random_range(bounds.min().x..=bounds.max().x),
            rng.random_range(bounds.min().y..=bounds.max().y),
        );
        if polygon.intersects(&candidate) { return Ok(candidate) }
    }
    Err(SampleError::RetryLimit { attempts: max_attempts })
}

#[cfg(test)]
mod tests {
    use geo::{LineString, Polygon};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn polygon(coords: Vec<(f64, f64)>) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(LineString::from(coords), vec![])])
    }

    #[test]
    fn returns_exactly_n_points_inside() {
        // L-shape: half of its bounding box is outside
        let shape = polygon(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        let mut rng = StdRng::seed_from_u64(7);

        for n in [1, 5, 200] {
            let points = sample_points(&shape, n, DEFAULT_MAX_ATTEMPTS, &mut rng).unwrap();
            assert_eq!(points.len(), n);
            assert!(points.iter().all(|p| shape.intersects(p)));
            assert!(points.iter().all(|p| !(p.x() > 1.0 && p.y() > 1.0)));
        }
    }

    #[test]
    fn zero_points_need_no_geometry() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample_points(&MultiPolygon(vec![]), 0, 10, &mut rng), Ok(vec![]));
    }

    #[test]
    fn degenerate_polygons_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty = MultiPolygon::<f64>(vec![]);
        let flat = polygon(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);

        assert_eq!(sample_points(&empty, 3, 10, &mut rng), Err(SampleError::DegenerateGeometry));
        assert_eq!(sample_points(&flat, 3, 10, &mut rng), Err(SampleError::DegenerateGeometry));

        let nan = polygon(vec![(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(sample_points(&nan, 3, 10, &mut rng), Err(SampleError::DegenerateGeometry));
    }

    #[test]
    fn sliver_hits_retry_limit() {
        // thin diagonal triangle covers a tiny fraction of its bounding box
        let sliver = polygon(vec![(0.0, 0.0), (1000.0, 1000.0), (1000.0, 1000.000001), (0.0, 0.0)]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_points(&sliver, 1, 5, &mut rng), Err(SampleError::RetryLimit { attempts: 5 }));
    }

    #[test]
    fn calls_are_independent() {
        let square = polygon(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let mut rng = StdRng::seed_from_u64(11);
        let a = sample_points(&square, 10, DEFAULT_MAX_ATTEMPTS, &mut rng).unwrap();
        let b = sample_points(&square, 10, DEFAULT_MAX_ATTEMPTS, &mut rng).unwrap();
        assert_ne!(a, b);
    }
}
