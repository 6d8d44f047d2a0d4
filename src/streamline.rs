//! The streamline type: an owned, ordered sequence of 3D points.

use crate::error::{Result, StreamlineError};
use crate::fingerprint::fingerprint;
use crate::metrics::{distance, length};
use crate::orient::reorient_with;
use crate::primitives::{Affine3, Point3};
use crate::resample::resample;
use crate::smooth::smooth;
use crate::transform::transform;
use num_traits::Float;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

/// A diffusion MRI streamline.
///
/// Points are stored contiguously in traversal order. Every operation
/// returns a new streamline and leaves `self` untouched.
///
/// Equality follows the fingerprint (see [`crate::fingerprint`]): two
/// streamlines compare equal when their end points agree, even if interior
/// points differ. Use [`Streamline::same_points`] for exact comparison.
///
/// # Example
///
/// ```
/// use streamlines::{Point3, Streamline};
///
/// let s: Streamline<f64> = Streamline::from_flat(&[
///     0.0, 0.0, 0.0,
///     3.0, 4.0, 0.0,
/// ]).unwrap();
///
/// assert_eq!(s.len(), 2);
/// assert_eq!(s.length(), 5.0);
/// assert_eq!(s.reversed()[0], Point3::new(3.0, 4.0, 0.0));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Streamline<F> {
    points: Vec<Point3<F>>,
}

impl<F: Float> Streamline<F> {
    /// Wraps a vector of points.
    pub fn new(points: Vec<Point3<F>>) -> Self {
        Self { points }
    }

    /// A streamline with no points.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Builds a streamline from `[x, y, z]` rows.
    pub fn from_rows(rows: &[[F; 3]]) -> Self {
        Self::new(rows.iter().map(|&r| Point3::from(r)).collect())
    }

    /// Builds a streamline from interleaved `x, y, z` coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`StreamlineError::InvalidShape`] if the length is not a
    /// multiple of 3.
    pub fn from_flat(coords: &[F]) -> Result<Self> {
        if !coords.len().is_multiple_of(3) {
            return Err(StreamlineError::InvalidShape {
                len: coords.len(),
                width: 3,
            });
        }
        Ok(Self::new(
            coords
                .chunks_exact(3)
                .map(|c| Point3::new(c[0], c[1], c[2]))
                .collect(),
        ))
    }

    /// The points, in traversal order.
    pub fn points(&self) -> &[Point3<F>] {
        &self.points
    }

    /// Consumes the streamline, returning its points.
    pub fn into_points(self) -> Vec<Point3<F>> {
        self.points
    }

    /// Interleaved `x, y, z` coordinates.
    pub fn to_flat(&self) -> Vec<F> {
        self.points.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the streamline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first point, if any.
    pub fn first(&self) -> Option<Point3<F>> {
        self.points.first().copied()
    }

    /// The last point, if any.
    pub fn last(&self) -> Option<Point3<F>> {
        self.points.last().copied()
    }

    /// Iterates over the points in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3<F>> {
        self.points.iter()
    }

    /// Returns true if some point is exactly equal to `point`.
    pub fn contains(&self, point: Point3<F>) -> bool {
        self.points.contains(&point)
    }

    /// Exact point-by-point equality.
    pub fn same_points(&self, other: &Self) -> bool {
        self.points == other.points
    }

    /// The same points in the opposite order.
    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    /// Arc length. See [`crate::metrics::length`].
    pub fn length(&self) -> F {
        length(&self.points)
    }

    /// Mean sampled distance to `other`. See [`crate::metrics::distance`].
    pub fn distance(&self, other: &Self, sample_count: usize) -> Result<F> {
        distance(&self.points, &other.points, sample_count)
    }

    /// Resampled to `count` points. See [`crate::resample::resample`].
    pub fn resample(&self, count: usize) -> Self {
        Self::new(resample(&self.points, count))
    }

    /// Least-squares smoothed. See [`crate::smooth::smooth`].
    pub fn smooth(&self, knot_distance: F) -> Result<Self> {
        smooth(&self.points, knot_distance).map(Self::new)
    }

    /// Oriented to follow `template`. See [`crate::orient::reorient_with`].
    pub fn reorient(&self, template: &Self, sample_count: usize) -> Result<Self> {
        reorient_with(&self.points, &template.points, sample_count).map(Self::new)
    }

    /// Mapped through `affine`.
    pub fn transform(&self, affine: &Affine3<F>) -> Self {
        Self::new(transform(&self.points, affine))
    }

    /// Identity key. See [`crate::fingerprint::fingerprint`].
    pub fn fingerprint(&self) -> u64 {
        fingerprint(&self.points)
    }
}

impl<F: Float> PartialEq for Streamline<F> {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}

impl<F: Float> Eq for Streamline<F> {}

impl<F: Float> Hash for Streamline<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint().hash(state);
    }
}

impl<F> Index<usize> for Streamline<F> {
    type Output = Point3<F>;

    fn index(&self, index: usize) -> &Point3<F> {
        &self.points[index]
    }
}

impl<F: Float> From<Vec<Point3<F>>> for Streamline<F> {
    fn from(points: Vec<Point3<F>>) -> Self {
        Self::new(points)
    }
}

impl<F: Float> FromIterator<Point3<F>> for Streamline<F> {
    fn from_iter<I: IntoIterator<Item = Point3<F>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, F> IntoIterator for &'a Streamline<F> {
    type Item = &'a Point3<F>;
    type IntoIter = std::slice::Iter<'a, Point3<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<F> fmt::Display for Streamline<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "streamline: {} points", self.points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn staircase() -> Streamline<f64> {
        Streamline::from_rows(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
        ])
    }

    #[test]
    fn test_from_flat() {
        let s: Streamline<f64> = Streamline::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[1], Point3::new(4.0, 5.0, 6.0));
        assert_eq!(s.to_flat(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_flat_rejects_ragged() {
        assert_eq!(
            Streamline::<f64>::from_flat(&[1.0, 2.0, 3.0, 4.0]),
            Err(StreamlineError::InvalidShape { len: 4, width: 3 })
        );
        assert!(Streamline::<f64>::from_flat(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_accessors() {
        let s = staircase();
        assert_eq!(s.first(), Some(Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(s.last(), Some(Point3::new(1.0, 1.0, 1.0)));
        assert!(s.contains(Point3::new(1.0, 1.0, 0.0)));
        assert!(!s.contains(Point3::new(0.5, 0.0, 0.0)));
        assert_eq!(s.iter().count(), 4);
        assert_eq!((&s).into_iter().count(), 4);
        assert_eq!(s.to_string(), "streamline: 4 points");
        assert!(Streamline::<f64>::empty().first().is_none());
    }

    #[test]
    fn test_operations_are_pure() {
        let s = staircase();
        let original = s.clone();

        let _ = s.reversed();
        let _ = s.resample(10);
        let _ = s.smooth(1.0).unwrap();
        let _ = s.transform(&Affine3::scaling(2.0, 2.0, 2.0));

        assert!(s.same_points(&original));
    }

    #[test]
    fn test_geometry_methods() {
        let s = staircase();
        assert_relative_eq!(s.length(), 3.0);
        assert_eq!(s.resample(7).len(), 7);
        assert_eq!(s.smooth(10.0).unwrap().len(), 4);
        assert_eq!(s.distance(&s, 20).unwrap(), 0.0);

        let template = Streamline::from_rows(&[[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]]);
        assert!(s.reorient(&template, 20).unwrap().same_points(&s.reversed()));
    }

    #[test]
    fn test_equality_by_fingerprint() {
        let a: Streamline<f64> = (0..15).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let mut points = a.clone().into_points();
        points[7].y = 3.0;
        let b = Streamline::from(points);

        assert_eq!(a, b);
        assert!(!a.same_points(&b));
        assert_ne!(a, a.reversed());

        let set: HashSet<Streamline<f64>> = [a.clone(), b, a.reversed()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
