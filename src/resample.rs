//! Resampling streamlines to an arbitrary number of points.
//!
//! Points are parametrized uniformly by index (`t_i = i / (N - 1)`) and
//! each axis is interpolated by a spline through the samples. The spline
//! degree depends only on the input size:
//!
//! | input points | interpolation |
//! |---|---|
//! | 2 | linear |
//! | 3 | quadratic |
//! | 4 or more | cubic |
//!
//! Inputs with fewer than 2 points follow a placeholder policy instead: an
//! empty streamline resamples to origins, a single point is repeated. If
//! every point coincides, that point is repeated exactly.
//!
//! # Example
//!
//! ```
//! use streamlines::resample::resample;
//! use streamlines::Point3;
//!
//! let segment = vec![Point3::new(0.0_f64, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
//! let resampled = resample(&segment, 3);
//!
//! assert_eq!(resampled.len(), 3);
//! assert!((resampled[1].x - 0.5).abs() < 1e-12);
//! ```

use crate::curves::interpolate;
use crate::primitives::Point3;
use num_traits::Float;

/// Interpolation degree used for an input of `n >= 2` points.
pub fn interpolation_degree(n: usize) -> usize {
    match n {
        0..=2 => 1,
        3 => 2,
        _ => 3,
    }
}

/// `count` evenly spaced parameters covering `[0, 1]`.
///
/// The first is exactly 0 and, for `count >= 2`, the last is exactly 1. A
/// single parameter is 0.
pub fn uniform_parameters<F: Float>(count: usize) -> Vec<F> {
    if count == 1 {
        return vec![F::zero()];
    }
    let denom = F::from(count.saturating_sub(1)).unwrap_or_else(F::one);
    (0..count)
        .map(|i| {
            if i + 1 == count {
                F::one()
            } else {
                F::from(i).unwrap_or_else(F::zero) / denom
            }
        })
        .collect()
}

/// Resamples `points` to exactly `count` points.
///
/// See the [module documentation](self) for the interpolation policy.
pub fn resample<F: Float>(points: &[Point3<F>], count: usize) -> Vec<Point3<F>> {
    match points {
        [] => vec![Point3::origin(); count],
        [single] => vec![*single; count],
        [first, rest @ ..] if rest.iter().all(|p| p == first) => vec![*first; count],
        _ => {
            let params = uniform_parameters(points.len());
            let degree = interpolation_degree(points.len());
            match interpolate(&params, points, degree) {
                Ok(spline) => spline.eval_many(&uniform_parameters(count)),
                // Uniform parameters are strictly increasing, so the
                // collocation system is always solvable.
                Err(e) => {
                    log::debug!("resample interpolation failed: {}", e);
                    vec![Point3::new(F::nan(), F::nan(), F::nan()); count]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_point_eq(a: Point3<f64>, b: Point3<f64>) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-10);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-10);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-10);
    }

    fn staircase() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_interpolation_degree() {
        assert_eq!(interpolation_degree(2), 1);
        assert_eq!(interpolation_degree(3), 2);
        assert_eq!(interpolation_degree(4), 3);
        assert_eq!(interpolation_degree(1000), 3);
    }

    #[test]
    fn test_uniform_parameters() {
        assert!(uniform_parameters::<f64>(0).is_empty());
        assert_eq!(uniform_parameters::<f64>(1), vec![0.0]);
        assert_eq!(uniform_parameters::<f64>(2), vec![0.0, 1.0]);
        assert_eq!(uniform_parameters::<f64>(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_empty_resamples_to_origin() {
        let resampled = resample::<f64>(&[], 4);
        assert_eq!(resampled, vec![Point3::origin(); 4]);
    }

    #[test]
    fn test_single_point_repeated() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(resample(&[p], 3), vec![p; 3]);
    }

    #[test]
    fn test_coincident_points_repeated_exactly() {
        let p = Point3::new(0.1, -7.3, 1e5 / 3.0);
        for n in 2..=8 {
            let resampled = resample(&vec![p; n], 13);
            assert_eq!(resampled, vec![p; 13], "{} coincident points", n);
        }
        assert!(resample(&vec![p; 5], 0).is_empty());
    }

    #[test]
    fn test_zero_count() {
        assert!(resample(&staircase(), 0).is_empty());
        assert!(resample::<f64>(&[], 0).is_empty());
    }

    #[test]
    fn test_one_point_is_first() {
        let points = staircase();
        let resampled = resample(&points, 1);
        assert_eq!(resampled.len(), 1);
        assert_point_eq(resampled[0], points[0]);
    }

    #[test]
    fn test_two_points_are_endpoints() {
        let points = staircase();
        let resampled = resample(&points, 2);
        assert_eq!(resampled.len(), 2);
        assert_point_eq(resampled[0], points[0]);
        assert_point_eq(resampled[1], points[3]);
    }

    #[test]
    fn test_linear_midpoint() {
        let segment = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let resampled = resample(&segment, 3);
        assert_eq!(resampled.len(), 3);
        assert_point_eq(resampled[0], Point3::new(0.0, 0.0, 0.0));
        assert_point_eq(resampled[1], Point3::new(0.5, 0.0, 0.0));
        assert_point_eq(resampled[2], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_quadratic_through_three_points() {
        // Parabola y = 4t(1 - t) sampled at t = 0, 0.5, 1
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let resampled = resample(&points, 5);
        assert_point_eq(resampled[1], Point3::new(0.5, 0.75, 0.0));
        assert_point_eq(resampled[2], Point3::new(1.0, 1.0, 0.0));
        assert_point_eq(resampled[3], Point3::new(1.5, 0.75, 0.0));
    }

    #[test]
    fn test_cubic_through_four_points() {
        // x = t^3 sampled at t = 0, 1/3, 2/3, 1 is reproduced exactly
        let points: Vec<Point3<f64>> = (0..4)
            .map(|i| {
                let t = i as f64 / 3.0;
                Point3::new(t * t * t, t, 0.0)
            })
            .collect();
        let resampled = resample(&points, 5);
        assert_point_eq(resampled[2], Point3::new(0.125, 0.5, 0.0));
    }

    #[test]
    fn test_upsample_preserves_samples() {
        // Resampling 4 -> 7 keeps the original samples at t = 0, 0.5, 1
        let points = staircase();
        let resampled = resample(&points, 7);
        assert_eq!(resampled.len(), 7);
        assert_point_eq(resampled[0], points[0]);
        assert_point_eq(resampled[2], points[1]);
        assert_point_eq(resampled[4], points[2]);
        assert_point_eq(resampled[6], points[3]);
    }

    #[test]
    fn test_round_trip_keeps_endpoints() {
        let points: Vec<Point3<f64>> = (0..13)
            .map(|i| {
                let t = i as f64 * 0.4;
                Point3::new(t.cos() * 10.0, t.sin() * 10.0, t)
            })
            .collect();
        let down = resample(&points, 5);
        let back = resample(&down, points.len());
        assert_eq!(back.len(), points.len());
        assert_point_eq(back[0], points[0]);
        assert_point_eq(back[points.len() - 1], points[points.len() - 1]);
    }

    #[test]
    fn test_nan_propagates() {
        let points = [
            Point3::new(0.0, f64::NAN, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        let resampled = resample(&points, 4);
        assert_eq!(resampled.len(), 4);
        assert!(resampled[0].y.is_nan());
        assert_relative_eq!(resampled[3].x, 3.0, epsilon = 1e-10);
    }
}
