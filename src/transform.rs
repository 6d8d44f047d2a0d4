//! Applying affine transforms to whole streamlines.

use crate::primitives::{Affine3, Point3};
use num_traits::Float;

/// Maps every point through `affine`. The point count and order are unchanged.
///
/// # Example
///
/// ```
/// use streamlines::transform::transform;
/// use streamlines::{Affine3, Point3};
///
/// let points = vec![Point3::new(1.0_f64, 2.0, 3.0)];
/// let moved = transform(&points, &Affine3::translation(1.0, 1.0, 1.0));
/// assert_eq!(moved, vec![Point3::new(2.0, 3.0, 4.0)]);
/// ```
pub fn transform<F: Float>(points: &[Point3<F>], affine: &Affine3<F>) -> Vec<Point3<F>> {
    points.iter().map(|&p| affine.apply_point(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, -2.0, 3.0),
            Point3::new(-7.25, 4.0, 0.5),
        ]
    }

    #[test]
    fn test_identity_unchanged() {
        let points = sample();
        assert_eq!(transform(&points, &Affine3::identity()), points);
    }

    #[test]
    fn test_inverse_round_trip() {
        let affine: Affine3<f64> = Affine3::from_rows([
            [-1.25, 0.0, 0.1, 90.0],
            [0.0, 1.25, -0.2, -126.0],
            [0.05, 0.0, 1.25, -72.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let inverse = affine.inverse().unwrap();

        let points = sample();
        let back = transform(&transform(&points, &affine), &inverse);
        assert_eq!(back.len(), points.len());
        for (b, p) in back.iter().zip(&points) {
            assert_relative_eq!(b.x, p.x, epsilon = 1e-9);
            assert_relative_eq!(b.y, p.y, epsilon = 1e-9);
            assert_relative_eq!(b.z, p.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_empty() {
        let empty: Vec<Point3<f64>> = Vec::new();
        assert!(transform(&empty, &Affine3::scaling(2.0, 2.0, 2.0)).is_empty());
    }
}
