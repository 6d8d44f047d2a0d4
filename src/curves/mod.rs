//! B-spline curves and the fitters that produce them.

mod band;
mod bspline;
mod fit;

pub use bspline::{basis_functions, find_span, BSpline3};
pub use fit::{fit_least_squares, interpolate, not_a_knot_knots};
