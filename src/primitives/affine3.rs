//! 4×4 homogeneous transform for 3D points.

use super::Point3;
use crate::error::{Result, StreamlineError};
use num_traits::Float;
use std::ops::Mul;

/// A 3D affine transform stored as a row-major 4×4 homogeneous matrix.
///
/// A point `(x, y, z)` is transformed as `m · [x, y, z, 1]ᵀ` and the
/// fourth component of the product is dropped, so the bottom row never
/// influences the result (no perspective divide).
///
/// # Example
///
/// ```
/// use streamlines::primitives::{Affine3, Point3};
///
/// // Voxel-to-world: 2mm isotropic voxels with the origin at (-90, -126, -72)
/// let affine: Affine3<f64> = Affine3::scaling(2.0, 2.0, 2.0)
///     .then(Affine3::translation(-90.0, -126.0, -72.0));
///
/// let p = affine.apply_point(Point3::new(45.0, 63.0, 36.0));
/// assert_eq!(p, Point3::new(0.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine3<F> {
    /// Matrix rows.
    pub m: [[F; 4]; 4],
}

impl<F: Float> Affine3<F> {
    /// Wraps a row-major matrix without modification.
    #[inline]
    pub fn from_rows(m: [[F; 4]; 4]) -> Self {
        Self { m }
    }

    /// Builds a transform from 16 row-major values.
    ///
    /// Returns [`StreamlineError::InvalidShape`] for any other length.
    pub fn from_row_major(values: &[F]) -> Result<Self> {
        if values.len() != 16 {
            return Err(StreamlineError::InvalidShape {
                len: values.len(),
                width: 16,
            });
        }
        let mut m = [[F::zero(); 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row.copy_from_slice(&values[i * 4..i * 4 + 4]);
        }
        Ok(Self { m })
    }

    /// The identity transform.
    pub fn identity() -> Self {
        let mut m = [[F::zero(); 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = F::one();
        }
        Self { m }
    }

    /// Pure translation.
    pub fn translation(tx: F, ty: F, tz: F) -> Self {
        let mut t = Self::identity();
        t.m[0][3] = tx;
        t.m[1][3] = ty;
        t.m[2][3] = tz;
        t
    }

    /// Axis-aligned scaling about the origin.
    pub fn scaling(sx: F, sy: F, sz: F) -> Self {
        let mut t = Self::identity();
        t.m[0][0] = sx;
        t.m[1][1] = sy;
        t.m[2][2] = sz;
        t
    }

    /// Counter-clockwise rotation about the X axis, in radians.
    pub fn rotation_x(angle: F) -> Self {
        let (s, c) = angle.sin_cos();
        let mut t = Self::identity();
        t.m[1][1] = c;
        t.m[1][2] = -s;
        t.m[2][1] = s;
        t.m[2][2] = c;
        t
    }

    /// Counter-clockwise rotation about the Y axis, in radians.
    pub fn rotation_y(angle: F) -> Self {
        let (s, c) = angle.sin_cos();
        let mut t = Self::identity();
        t.m[0][0] = c;
        t.m[0][2] = s;
        t.m[2][0] = -s;
        t.m[2][2] = c;
        t
    }

    /// Counter-clockwise rotation about the Z axis, in radians.
    pub fn rotation_z(angle: F) -> Self {
        let (s, c) = angle.sin_cos();
        let mut t = Self::identity();
        t.m[0][0] = c;
        t.m[0][1] = -s;
        t.m[1][0] = s;
        t.m[1][1] = c;
        t
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn apply_point(&self, p: Point3<F>) -> Point3<F> {
        let row = |r: &[F; 4]| r[0] * p.x + r[1] * p.y + r[2] * p.z + r[3];
        Point3::new(row(&self.m[0]), row(&self.m[1]), row(&self.m[2]))
    }

    /// Matrix product `self · other`: applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        let mut m = [[F::zero(); 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, out) in row.iter_mut().enumerate() {
                *out = (0..4).fold(F::zero(), |acc, k| acc + self.m[i][k] * other.m[k][j]);
            }
        }
        Self { m }
    }

    /// Returns a transform that applies `self` first, then `other`.
    pub fn then(&self, other: Self) -> Self {
        other.compose(self)
    }

    /// Inverts the matrix with Gauss-Jordan elimination.
    ///
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let mut a = self.m;
        let mut inv = Self::identity().m;

        for col in 0..4 {
            let pivot_row = (col..4).max_by(|&r1, &r2| {
                a[r1][col]
                    .abs()
                    .partial_cmp(&a[r2][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;
            let pivot = a[pivot_row][col];
            if pivot.is_nan() || pivot.abs() <= F::epsilon() {
                return None;
            }
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            for j in 0..4 {
                a[col][j] = a[col][j] / pivot;
                inv[col][j] = inv[col][j] / pivot;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == F::zero() {
                    continue;
                }
                for j in 0..4 {
                    a[row][j] = a[row][j] - factor * a[col][j];
                    inv[row][j] = inv[row][j] - factor * inv[col][j];
                }
            }
        }

        Some(Self { m: inv })
    }

    /// Returns the 16 values in row-major order.
    pub fn to_row_major(&self) -> [F; 16] {
        let mut out = [F::zero(); 16];
        for (i, row) in self.m.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        out
    }
}

impl<F: Float> Default for Affine3<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> Mul for Affine3<F> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.compose(&other)
    }
}

impl<F: Float> Mul<Point3<F>> for Affine3<F> {
    type Output = Point3<F>;

    fn mul(self, p: Point3<F>) -> Point3<F> {
        self.apply_point(p)
    }
}
