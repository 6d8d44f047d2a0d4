//! Arc length and point-sampled distance between streamlines.
//!
//! # Example
//!
//! ```
//! use streamlines::metrics::{distance, length};
//! use streamlines::Point3;
//!
//! let a = vec![Point3::new(0.0_f64, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
//! let b = vec![Point3::new(0.0_f64, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)];
//!
//! assert_eq!(length(&a), 1.0);
//!
//! // Parallel segments one unit apart
//! let d = distance(&a, &b, 20).unwrap();
//! assert!((d - 1.0).abs() < 1e-10);
//! ```

use crate::error::{Result, StreamlineError};
use crate::primitives::Point3;
use crate::resample::resample;
use num_traits::Float;

/// Number of points both streamlines are resampled to by default before comparison.
pub const DEFAULT_SAMPLE_COUNT: usize = 20;

/// Options for [`distance_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceOptions {
    /// Number of points each streamline is resampled to. Must be at least 1.
    pub sample_count: usize,
}

impl Default for DistanceOptions {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

/// Arc length of a polyline: the sum of its segment lengths.
///
/// Polylines with fewer than 2 points have length exactly 0.
pub fn length<F: Float>(points: &[Point3<F>]) -> F {
    points
        .windows(2)
        .fold(F::zero(), |acc, w| acc + w[0].distance(w[1]))
}

/// Cumulative arc length at each point, starting at 0.
///
/// The result has one entry per point; the last entry equals [`length`].
pub fn cumulative_lengths<F: Float>(points: &[Point3<F>]) -> Vec<F> {
    let mut total = F::zero();
    let mut out = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total = total + points[i - 1].distance(*p);
        }
        out.push(total);
    }
    out
}

/// Mean point-to-point distance after resampling both polylines to `sample_count` points.
///
/// Symmetric in its arguments. Polylines with fewer than 2 points follow the
/// resampling placeholder rules (empty resamples to the origin, a single
/// point is repeated).
///
/// # Errors
///
/// Returns [`StreamlineError::InvalidParameter`] if `sample_count` is 0.
pub fn distance<F: Float>(a: &[Point3<F>], b: &[Point3<F>], sample_count: usize) -> Result<F> {
    if sample_count == 0 {
        return Err(StreamlineError::invalid_parameter(
            "sample_count",
            sample_count,
            "must be at least 1",
        ));
    }

    let ra = resample(a, sample_count);
    let rb = resample(b, sample_count);

    let sum = ra
        .iter()
        .zip(&rb)
        .fold(F::zero(), |acc, (p, q)| acc + p.distance(*q));

    Ok(sum / F::from(sample_count).unwrap_or_else(F::nan))
}

/// [`distance`] with the settings in `options`.
pub fn distance_with<F: Float>(
    a: &[Point3<F>],
    b: &[Point3<F>],
    options: &DistanceOptions,
) -> Result<F> {
    distance(a, b, options.sample_count)
}

/// [`distance`] with [`DEFAULT_SAMPLE_COUNT`] samples.
pub fn distance_default<F: Float>(a: &[Point3<F>], b: &[Point3<F>]) -> F {
    // DEFAULT_SAMPLE_COUNT is non-zero, so the only error path is unreachable
    distance(a, b, DEFAULT_SAMPLE_COUNT).unwrap_or_else(|_| F::nan())
}
