//! B-spline curves in 3D with arbitrary degree and knot vectors.
//!
//! These are the curves produced by the fitting routines in this module:
//! interpolating splines for resampling and least-squares splines for
//! smoothing. Evaluation uses de Boor's algorithm; the non-zero basis
//! functions at a parameter are exposed separately so fitters can assemble
//! their linear systems.
//!
//! # Example
//!
//! ```
//! use streamlines::{Point3, curves::BSpline3};
//!
//! // A clamped linear spline is the polyline through its control points
//! let spline: BSpline3<f64> = BSpline3::new(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0), Point3::new(2.0, 2.0, 0.0)],
//!     1,
//!     vec![0.0, 0.0, 1.0, 2.0, 2.0],
//! );
//!
//! let p = spline.eval(0.5);
//! assert!((p.x - 1.0).abs() < 1e-12);
//! ```

use crate::primitives::Point3;
use num_traits::Float;

/// A B-spline curve in 3D.
///
/// The knot vector must satisfy `knots.len() == control_points.len() + degree + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline3<F> {
    /// Control points (spline coefficients).
    pub control_points: Vec<Point3<F>>,
    /// Degree of the spline (1 = linear, 2 = quadratic, 3 = cubic)
    pub degree: usize,
    /// Knot vector (non-decreasing sequence)
    pub knots: Vec<F>,
}

impl<F: Float> BSpline3<F> {
    /// Creates a new B-spline with the given control points, degree, and knot vector.
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - `knots.len() != control_points.len() + degree + 1`
    /// - `degree >= control_points.len()`
    /// - Knot vector is not non-decreasing
    pub fn new(control_points: Vec<Point3<F>>, degree: usize, knots: Vec<F>) -> Self {
        let n = control_points.len();
        assert!(
            degree < n,
            "Degree must be less than number of control points"
        );
        assert!(
            knots.len() == n + degree + 1,
            "Knot vector length must be control_points.len() + degree + 1"
        );
        assert!(
            knots
                .windows(2)
                .all(|w| w[0].partial_cmp(&w[1]) != Some(std::cmp::Ordering::Greater)),
            "Knot vector must be non-decreasing"
        );

        Self {
            control_points,
            degree,
            knots,
        }
    }

    /// Returns the valid parameter range `[knots[degree], knots[n]]`.
    pub fn domain(&self) -> (F, F) {
        (self.knots[self.degree], self.knots[self.control_points.len()])
    }

    /// Evaluates the curve at `t` using de Boor's algorithm.
    ///
    /// Parameters outside the domain are clamped to it. A NaN parameter
    /// yields a NaN point.
    pub fn eval(&self, t: F) -> Point3<F> {
        if t.is_nan() {
            return Point3::new(F::nan(), F::nan(), F::nan());
        }
        let (t_min, t_max) = self.domain();
        let t = t.max(t_min).min(t_max);
        let k = find_span(&self.knots, self.degree, self.control_points.len(), t);
        self.de_boor(t, k)
    }

    /// Evaluates the curve at each parameter in turn.
    pub fn eval_many(&self, params: &[F]) -> Vec<Point3<F>> {
        params.iter().map(|&t| self.eval(t)).collect()
    }

    fn de_boor(&self, t: F, k: usize) -> Point3<F> {
        let p = self.degree;
        let mut d: Vec<Point3<F>> = self.control_points[k - p..=k].to_vec();

        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = k - p + j;
                let denom = self.knots[i + p - r + 1] - self.knots[i];
                let alpha = if denom.abs() < F::epsilon() {
                    F::zero()
                } else {
                    (t - self.knots[i]) / denom
                };
                d[j] = d[j - 1].lerp(d[j], alpha);
            }
        }

        d[p]
    }
}

/// Finds the knot span `k` with `knots[k] <= t < knots[k + 1]`.
///
/// `n` is the number of control points. A parameter at (or past) the end of
/// the domain maps to the last non-empty span, and one before the start
/// maps to the first.
pub fn find_span<F: Float>(knots: &[F], degree: usize, n: usize, t: F) -> usize {
    if t.is_nan() || t >= knots[n] {
        // Step back over repeated end knots
        let mut k = n - 1;
        while k > degree && knots[k] >= knots[n] {
            k -= 1;
        }
        return k;
    }

    let mut low = degree;
    let mut high = n;
    while low < high {
        let mid = (low + high) / 2;
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    low.saturating_sub(1).max(degree)
}

/// Evaluates the `degree + 1` basis functions that are non-zero on span `k` at `t`.
///
/// Entry `r` of the result is the value of basis function `k - degree + r`.
pub fn basis_functions<F: Float>(knots: &[F], degree: usize, k: usize, t: F) -> Vec<F> {
    let mut values = vec![F::zero(); degree + 1];
    let mut left = vec![F::zero(); degree + 1];
    let mut right = vec![F::zero(); degree + 1];
    values[0] = F::one();

    for j in 1..=degree {
        left[j] = t - knots[k + 1 - j];
        right[j] = knots[k + j] - t;
        let mut saved = F::zero();
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let temp = if denom == F::zero() {
                F::zero()
            } else {
                values[r] / denom
            };
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }

    values
}
