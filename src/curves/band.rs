//! Banded linear systems for spline fitting.
//!
//! Both B-spline collocation matrices and least-squares normal matrices are
//! banded, with bandwidth bounded by the spline degree. They are also
//! totally positive (collocation) or symmetric positive definite (normal
//! equations), so Gaussian elimination without pivoting is stable and never
//! fills outside the band.

use crate::error::{Result, StreamlineError};
use crate::primitives::Vec3;
use num_traits::Float;

/// A square matrix storing only the diagonals within `lower`/`upper` of the main one.
#[derive(Debug, Clone)]
pub(crate) struct BandMatrix<F> {
    n: usize,
    lower: usize,
    upper: usize,
    data: Vec<F>,
}

impl<F: Float> BandMatrix<F> {
    pub(crate) fn zeros(n: usize, lower: usize, upper: usize) -> Self {
        Self {
            n,
            lower,
            upper,
            data: vec![F::zero(); n * (lower + upper + 1)],
        }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(j + self.lower >= i && j <= i + self.upper, "outside band");
        i * (self.lower + self.upper + 1) + (j + self.lower - i)
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> F {
        self.data[self.index(i, j)]
    }

    #[inline]
    pub(crate) fn add(&mut self, i: usize, j: usize, value: F) {
        let idx = self.index(i, j);
        self.data[idx] = self.data[idx] + value;
    }

    /// Largest absolute value on the main diagonal.
    pub(crate) fn max_diagonal(&self) -> F {
        (0..self.n).fold(F::zero(), |acc, i| acc.max(self.get(i, i).abs()))
    }

    /// Adds `value` to every diagonal entry.
    pub(crate) fn shift_diagonal(&mut self, value: F) {
        for i in 0..self.n {
            self.add(i, i, value);
        }
    }

    /// Solves `A x = rhs` for vector-valued right-hand sides, consuming the matrix.
    ///
    /// Each component of `rhs` is an independent system sharing `A`.
    pub(crate) fn solve(mut self, mut rhs: Vec<Vec3<F>>) -> Result<Vec<Vec3<F>>> {
        let n = self.n;
        debug_assert_eq!(rhs.len(), n);

        // Relative pivot threshold so rank-deficient systems are caught
        // instead of producing huge coefficients.
        let tolerance = self.max_diagonal() * F::epsilon() * F::from(n.max(1)).unwrap_or(F::one());

        for k in 0..n {
            let pivot = self.get(k, k);
            if pivot.abs() <= tolerance {
                return Err(StreamlineError::SingularSystem { size: n });
            }

            let last_row = (k + self.lower).min(n - 1);
            let last_col = (k + self.upper).min(n - 1);
            for i in k + 1..=last_row {
                let factor = self.get(i, k) / pivot;
                if factor == F::zero() {
                    continue;
                }
                for j in k + 1..=last_col {
                    let delta = factor * self.get(k, j);
                    self.add(i, j, -delta);
                }
                let pivot_rhs = rhs[k];
                rhs[i] -= pivot_rhs * factor;
            }
        }

        for k in (0..n).rev() {
            let last_col = (k + self.upper).min(n - 1);
            let mut sum = rhs[k];
            for j in k + 1..=last_col {
                sum -= rhs[j] * self.get(k, j);
            }
            rhs[k] = sum / self.get(k, k);
        }

        Ok(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tridiagonal_solve() {
        // [2 1 0; 1 2 1; 0 1 2] x = b with x = (1, 2, 3) in every component
        let mut a: BandMatrix<f64> = BandMatrix::zeros(3, 1, 1);
        for i in 0..3 {
            a.add(i, i, 2.0);
        }
        a.add(0, 1, 1.0);
        a.add(1, 0, 1.0);
        a.add(1, 2, 1.0);
        a.add(2, 1, 1.0);

        let b = vec![
            Vec3::new(4.0, 4.0, 4.0),
            Vec3::new(8.0, 8.0, 8.0),
            Vec3::new(8.0, 8.0, 8.0),
        ];
        let x = a.solve(b).unwrap();
        for (xi, expected) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert_relative_eq!(xi.x, expected, epsilon = 1e-12);
            assert_relative_eq!(xi.y, expected, epsilon = 1e-12);
            assert_relative_eq!(xi.z, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_asymmetric_band() {
        // Upper bandwidth 2, lower 0: upper triangular
        let mut a: BandMatrix<f64> = BandMatrix::zeros(3, 0, 2);
        a.add(0, 0, 1.0);
        a.add(0, 1, 1.0);
        a.add(0, 2, 1.0);
        a.add(1, 1, 1.0);
        a.add(1, 2, 1.0);
        a.add(2, 2, 1.0);

        let b = vec![
            Vec3::new(6.0, 3.0, 0.0),
            Vec3::new(5.0, 2.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
        ];
        let x = a.solve(b).unwrap();
        assert_relative_eq!(x[0].x, 1.0);
        assert_relative_eq!(x[1].x, 2.0);
        assert_relative_eq!(x[2].x, 3.0);
        assert_relative_eq!(x[0].y, 1.0);
        assert_relative_eq!(x[2].z, 0.0);
    }

    #[test]
    fn test_singular() {
        let mut a: BandMatrix<f64> = BandMatrix::zeros(2, 1, 1);
        a.add(0, 0, 1.0);
        let result = a.solve(vec![Vec3::zero(); 2]);
        assert_eq!(result, Err(StreamlineError::SingularSystem { size: 2 }));
    }

    #[test]
    fn test_shift_diagonal() {
        let mut a: BandMatrix<f64> = BandMatrix::zeros(2, 1, 1);
        a.add(0, 0, 1.0);
        a.shift_diagonal(0.5);
        assert_eq!(a.get(0, 0), 1.5);
        assert_eq!(a.get(1, 1), 0.5);
        assert_eq!(a.max_diagonal(), 1.5);
    }
}
