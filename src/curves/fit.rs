//! Spline fitting to parametrized 3D samples.
//!
//! Two fitters share the same machinery:
//!
//! - [`interpolate`] builds the B-spline of a given degree that passes
//!   through every sample, with "not-a-knot" knot placement.
//! - [`fit_least_squares`] builds the B-spline on a caller-supplied knot
//!   vector that minimizes the squared residual over all samples.
//!
//! Coordinates are fitted jointly, but since every axis shares the same
//! parametrization and basis, each axis is an independent 1D fit.
//!
//! # Example
//!
//! ```
//! use streamlines::{Point3, curves::interpolate};
//!
//! let params = [0.0_f64, 0.5, 1.0];
//! let samples = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//! ];
//!
//! let spline = interpolate(&params, &samples, 2).unwrap();
//! let p = spline.eval(0.5);
//! assert!((p.y - 1.0).abs() < 1e-12);
//! ```

use super::band::BandMatrix;
use super::bspline::{basis_functions, find_span, BSpline3};
use crate::error::{Result, StreamlineError};
use crate::primitives::{Point3, Vec3};
use num_traits::Float;

/// Builds the not-a-knot knot vector for interpolating `params` with a spline of `degree`.
///
/// End knots are repeated `degree + 1` times. Odd degrees place interior
/// knots at the interior parameters, dropping `(degree + 1) / 2` at each
/// end; even degrees place them at midpoints between consecutive
/// parameters, dropping `degree / 2` at each end.
///
/// `params` must be strictly increasing and hold more than `degree` values.
pub fn not_a_knot_knots<F: Float>(params: &[F], degree: usize) -> Vec<F> {
    let n = params.len();
    let first = params[0];
    let last = params[n - 1];

    let interior: Vec<F> = if degree % 2 == 1 {
        let skip = (degree + 1) / 2;
        params[skip..n - skip].to_vec()
    } else {
        let skip = degree / 2;
        let two = F::one() + F::one();
        let mids: Vec<F> = params.windows(2).map(|w| (w[0] + w[1]) / two).collect();
        mids[skip..mids.len() - skip].to_vec()
    };

    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat_n(first, degree + 1));
    knots.extend(interior);
    knots.extend(std::iter::repeat_n(last, degree + 1));
    knots
}

/// Fits the interpolating B-spline of `degree` through `(params[i], samples[i])`.
///
/// # Errors
///
/// - [`StreamlineError::InvalidParameter`] if the lengths differ, `degree`
///   is 0, or there are not more samples than `degree`.
/// - [`StreamlineError::SingularSystem`] if the parameters are not
///   strictly increasing.
pub fn interpolate<F: Float>(
    params: &[F],
    samples: &[Point3<F>],
    degree: usize,
) -> Result<BSpline3<F>> {
    check_samples(params, samples)?;
    if degree == 0 || samples.len() <= degree {
        return Err(StreamlineError::invalid_parameter(
            "degree",
            degree,
            "must be at least 1 and less than the number of samples",
        ));
    }

    let knots = not_a_knot_knots(params, degree);
    let n = samples.len();

    // Row i is non-zero on columns span_i - degree ..= span_i
    let rows: Vec<(usize, Vec<F>)> = params
        .iter()
        .map(|&t| {
            let k = find_span(&knots, degree, n, t);
            (k - degree, basis_functions(&knots, degree, k, t))
        })
        .collect();

    let mut lower = 0;
    let mut upper = 0;
    for (i, (start, basis)) in rows.iter().enumerate() {
        lower = lower.max(i.saturating_sub(*start));
        upper = upper.max((start + basis.len() - 1).saturating_sub(i));
    }

    let mut matrix = BandMatrix::zeros(n, lower, upper);
    for (i, (start, basis)) in rows.iter().enumerate() {
        for (r, &b) in basis.iter().enumerate() {
            if b != F::zero() {
                matrix.add(i, start + r, b);
            }
        }
    }

    let rhs = samples.iter().map(|p| p.to_vec()).collect();
    let coefficients = matrix.solve(rhs)?;

    Ok(BSpline3::new(
        coefficients.into_iter().map(Point3::from).collect(),
        degree,
        knots,
    ))
}

/// Fits a least-squares B-spline of `degree` on `knots` to `(params[i], samples[i])`.
///
/// The number of coefficients is `knots.len() - degree - 1`. The normal
/// equations are solved directly; if they are singular (typically a knot
/// span that contains no parameter) the solve is retried once with a small
/// ridge term relative to the matrix scale.
///
/// # Errors
///
/// - [`StreamlineError::InvalidParameter`] if the lengths differ or the
///   knot vector is too short for `degree`.
/// - [`StreamlineError::SingularSystem`] if the regularized system is
///   still singular.
pub fn fit_least_squares<F: Float>(
    params: &[F],
    samples: &[Point3<F>],
    degree: usize,
    knots: &[F],
) -> Result<BSpline3<F>> {
    check_samples(params, samples)?;
    if knots.len() < 2 * (degree + 1) {
        return Err(StreamlineError::invalid_parameter(
            "knots",
            knots.len(),
            "need at least 2 * (degree + 1) knots",
        ));
    }

    let n = knots.len() - degree - 1;
    let mut normal = BandMatrix::zeros(n, degree, degree);
    let mut rhs = vec![Vec3::zero(); n];

    for (&t, sample) in params.iter().zip(samples) {
        let k = find_span(knots, degree, n, t);
        let start = k - degree;
        let basis = basis_functions(knots, degree, k, t);
        let value = sample.to_vec();
        for (a, &ba) in basis.iter().enumerate() {
            rhs[start + a] += value * ba;
            for (c, &bc) in basis.iter().enumerate() {
                normal.add(start + a, start + c, ba * bc);
            }
        }
    }

    let coefficients = match normal.clone().solve(rhs.clone()) {
        Ok(c) => c,
        Err(StreamlineError::SingularSystem { size }) => {
            let ridge = normal.max_diagonal() * F::epsilon().sqrt();
            log::debug!(
                "least-squares spline fit singular ({} coefficients, {} samples); retrying with ridge",
                size,
                samples.len()
            );
            normal.shift_diagonal(ridge);
            normal.solve(rhs)?
        }
        Err(e) => return Err(e),
    };

    Ok(BSpline3::new(
        coefficients.into_iter().map(Point3::from).collect(),
        degree,
        knots.to_vec(),
    ))
}

fn check_samples<F: Float>(params: &[F], samples: &[Point3<F>]) -> Result<()> {
    if params.len() != samples.len() {
        return Err(StreamlineError::invalid_parameter(
            "params",
            params.len(),
            "must have one parameter per sample",
        ));
    }
    Ok(())
}
