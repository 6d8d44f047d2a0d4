//! Least-squares B-spline smoothing.
//!
//! A streamline is reparametrized by arc length, a clamped B-spline with
//! roughly one knot every `knot_distance` units is fitted to it by least
//! squares, and the fit is evaluated back at the original parameters. The
//! output has exactly as many points as the input; only their positions
//! move.
//!
//! Larger knot distances give fewer knots and smoother output. Short or
//! sparsely sampled streamlines degrade gracefully: the degree drops to
//! `N - 1` below 4 points, and the knot count is bounded by what the data
//! can support, in which case the fit interpolates.
//!
//! # Example
//!
//! ```
//! use streamlines::smooth::smooth;
//! use streamlines::Point3;
//!
//! // A jittery path along the x axis
//! let points: Vec<Point3<f64>> = (0..200)
//!     .map(|i| {
//!         let jitter = if i % 2 == 0 { 0.05 } else { -0.05 };
//!         Point3::new(i as f64 * 0.5, jitter, 0.0)
//!     })
//!     .collect();
//!
//! let smoothed = smooth(&points, 10.0).unwrap();
//! assert_eq!(smoothed.len(), points.len());
//! assert!(smoothed[100].y.abs() < 0.05);
//! ```

use crate::curves::fit_least_squares;
use crate::error::{Result, StreamlineError};
use crate::metrics::cumulative_lengths;
use crate::primitives::Point3;
use num_traits::Float;

/// Default target spacing between knots, in the units of the point coordinates.
pub const DEFAULT_KNOT_DISTANCE: f64 = 10.0;

/// Options for [`smooth_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothOptions<F> {
    /// Target spacing between spline knots. Must be finite and positive.
    pub knot_distance: F,
}

impl<F: Float> Default for SmoothOptions<F> {
    fn default() -> Self {
        Self {
            knot_distance: F::from(DEFAULT_KNOT_DISTANCE).unwrap_or_else(F::one),
        }
    }
}

/// Degree of the smoothing spline for `n` points: cubic, or `n - 1` if fewer than 4.
pub fn spline_degree(n: usize) -> usize {
    n.saturating_sub(1).min(3)
}

/// Number of distinct knots for a streamline of arc length `total_length` with `n` points.
///
/// Computed as `max(2, min(floor(total_length / knot_distance), n - degree + 1))`.
/// The lower bound applies last, so it wins whenever the data-supported
/// upper bound and the length-based count disagree below 2. A non-finite
/// ratio counts as 0.
pub fn knot_count<F: Float>(total_length: F, knot_distance: F, n: usize) -> usize {
    let degree = spline_degree(n);
    let by_length = (total_length / knot_distance).floor().to_usize().unwrap_or(0);
    let by_data = (n + 1).saturating_sub(degree);
    by_length.min(by_data).max(2)
}

/// Clamped knot vector: `degree` zeros, `0..knot_count`, then `degree` copies of `knot_count - 1`.
pub fn clamped_knots<F: Float>(degree: usize, knot_count: usize) -> Vec<F> {
    let last = F::from(knot_count.saturating_sub(1)).unwrap_or_else(F::zero);
    let mut knots = Vec::with_capacity(knot_count + 2 * degree);
    knots.extend(std::iter::repeat_n(F::zero(), degree));
    knots.extend((0..knot_count).map(|i| F::from(i).unwrap_or_else(F::zero)));
    knots.extend(std::iter::repeat_n(last, degree));
    knots
}

/// Smooths `points` with a least-squares B-spline.
///
/// Streamlines with 0 or 1 points are returned unchanged. If all points
/// coincide, every output point equals the first input point. Non-finite
/// coordinates make the arc length non-finite; the output is then all NaN.
///
/// # Errors
///
/// - [`StreamlineError::InvalidParameter`] if `knot_distance` is not finite
///   and positive.
/// - [`StreamlineError::SingularSystem`] if the fit cannot be solved even
///   with regularization.
pub fn smooth<F: Float>(points: &[Point3<F>], knot_distance: F) -> Result<Vec<Point3<F>>> {
    if !knot_distance.is_finite() || knot_distance <= F::zero() {
        return Err(StreamlineError::invalid_parameter(
            "knot_distance",
            knot_distance.to_f64().unwrap_or(f64::NAN),
            "must be finite and positive",
        ));
    }

    let n = points.len();
    if n <= 1 {
        return Ok(points.to_vec());
    }

    let cumulative = cumulative_lengths(points);
    let total = cumulative[n - 1];
    if !total.is_finite() {
        return Ok(vec![Point3::new(F::nan(), F::nan(), F::nan()); n]);
    }
    if total == F::zero() {
        return Ok(vec![points[0]; n]);
    }

    let degree = spline_degree(n);
    let count = knot_count(total, knot_distance, n);
    let knots = clamped_knots(degree, count);
    let span = F::from(count - 1).unwrap_or_else(F::one);

    let mut params: Vec<F> = cumulative.iter().map(|&c| c / total * span).collect();
    params[n - 1] = span;

    log::trace!(
        "smoothing {} points: degree {}, {} knots over length {:?}",
        n,
        degree,
        count,
        total.to_f64()
    );

    let spline = fit_least_squares(&params, points, degree, &knots)?;
    Ok(spline.eval_many(&params))
}

/// [`smooth`] with the settings in `options`.
pub fn smooth_with<F: Float>(
    points: &[Point3<F>],
    options: &SmoothOptions<F>,
) -> Result<Vec<Point3<F>>> {
    smooth(points, options.knot_distance)
}
