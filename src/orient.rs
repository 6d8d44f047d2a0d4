//! Orientation normalization against a template streamline.
//!
//! Tractography gives streamlines no inherent start or end. Before points
//! of different streamlines can be compared index by index, each one is
//! traversed in whichever direction lies closer to a common template.
//!
//! # Example
//!
//! ```
//! use streamlines::orient::reorient;
//! use streamlines::Point3;
//!
//! let streamline = vec![
//!     Point3::new(0.0_f64, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 1.0),
//! ];
//! let template = vec![Point3::new(1.0_f64, 1.0, 1.0), Point3::new(0.0, 0.0, 0.0)];
//!
//! let oriented = reorient(&streamline, &template);
//! assert_eq!(oriented[0], Point3::new(1.0, 1.0, 1.0));
//! ```

use crate::error::Result;
use crate::metrics::{distance, DEFAULT_SAMPLE_COUNT};
use crate::primitives::Point3;
use num_traits::Float;

/// Returns `points` or its reversal, whichever is closer to `template`.
///
/// Uses [`DEFAULT_SAMPLE_COUNT`] samples for the comparison. Ties keep the
/// original order.
pub fn reorient<F: Float>(points: &[Point3<F>], template: &[Point3<F>]) -> Vec<Point3<F>> {
    // DEFAULT_SAMPLE_COUNT is non-zero
    reorient_with(points, template, DEFAULT_SAMPLE_COUNT).unwrap_or_else(|_| points.to_vec())
}

/// [`reorient`] with an explicit number of comparison samples.
///
/// # Errors
///
/// Returns [`crate::StreamlineError::InvalidParameter`] if `sample_count` is 0.
pub fn reorient_with<F: Float>(
    points: &[Point3<F>],
    template: &[Point3<F>],
    sample_count: usize,
) -> Result<Vec<Point3<F>>> {
    if needs_reversal(points, template, sample_count)? {
        Ok(points.iter().rev().copied().collect())
    } else {
        Ok(points.to_vec())
    }
}

/// Returns true if the reversed traversal of `points` is strictly closer to `template`.
///
/// # Errors
///
/// Returns [`crate::StreamlineError::InvalidParameter`] if `sample_count` is 0.
pub fn needs_reversal<F: Float>(
    points: &[Point3<F>],
    template: &[Point3<F>],
    sample_count: usize,
) -> Result<bool> {
    let forward = distance(points, template, sample_count)?;
    let reversed: Vec<Point3<F>> = points.iter().rev().copied().collect();
    let backward = distance(&reversed, template, sample_count)?;
    // NaN distances compare false and keep the original order
    Ok(backward < forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamlineError;

    fn staircase() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_reverses_against_opposite_template() {
        let streamline = staircase();
        let template = vec![Point3::new(1.0, 1.0, 1.0), Point3::new(0.0, 0.0, 0.0)];

        let mut expected = streamline.clone();
        expected.reverse();
        assert_eq!(reorient(&streamline, &template), expected);
    }

    #[test]
    fn test_keeps_aligned_orientation() {
        let streamline = staircase();
        let template = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
        assert_eq!(reorient(&streamline, &template), streamline);
    }

    #[test]
    fn test_tie_keeps_original_order() {
        // A symmetric template is equidistant from both directions
        let streamline = vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let template = vec![Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert_eq!(reorient(&streamline, &template), streamline);
        assert!(!needs_reversal(&streamline, &template, 20).unwrap());
    }

    #[test]
    fn test_against_itself() {
        let streamline = staircase();
        assert_eq!(reorient(&streamline, &streamline), streamline);
    }

    #[test]
    fn test_empty_streamline() {
        let empty: Vec<Point3<f64>> = Vec::new();
        assert!(reorient(&empty, &staircase()).is_empty());
    }

    #[test]
    fn test_rejects_zero_samples() {
        assert!(matches!(
            reorient_with(&staircase(), &staircase(), 0),
            Err(StreamlineError::InvalidParameter { .. })
        ));
    }
}
