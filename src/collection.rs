//! Ordered collections of streamlines.
//!
//! [`Streamlines`] is the in-memory form of a tractogram: an ordered list
//! of streamlines plus the affine that maps their coordinates to world
//! space. Bulk operations apply a per-streamline operation to every item
//! and always preserve order. With the `parallel` feature they run across
//! threads.
//!
//! # Example
//!
//! ```
//! use streamlines::{Streamline, Streamlines};
//!
//! let mut bundle: Streamlines<f64> = Streamlines::from_iter([
//!     Streamline::from_rows(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]),
//!     Streamline::from_rows(&[[10.0, 1.0, 0.0], [0.0, 1.0, 0.0]]),
//!     Streamline::from_rows(&[[0.0, 2.0, 0.0], [2.0, 2.0, 0.0]]),
//! ]);
//!
//! bundle.filter_min_length(5.0);
//! assert_eq!(bundle.len(), 2);
//!
//! // The second streamline is flipped to match the first
//! bundle.reorient(None).unwrap();
//! assert_eq!(bundle[1][0].x, 0.0);
//! ```

use crate::error::Result;
use crate::maybe_rayon::*;
use crate::metrics::DEFAULT_SAMPLE_COUNT;
use crate::primitives::Affine3;
use crate::streamline::Streamline;
use num_traits::Float;
use std::fmt;
use std::ops::{AddAssign, Index};

/// An ordered collection of streamlines sharing one coordinate frame.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Streamlines<F> {
    items: Vec<Streamline<F>>,
    affine: Affine3<F>,
}

/// Summary statistics of a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary<F> {
    /// Number of streamlines.
    pub count: usize,
    /// Total number of points across all streamlines.
    pub point_count: usize,
    /// Mean arc length, `None` for an empty collection.
    pub mean_length: Option<F>,
}

impl<F: Float> fmt::Display for Summary<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of streamlines: {}", self.count)?;
        writeln!(f, "Number of points: {}", self.point_count)?;
        match self.mean_length.and_then(|m| m.to_f64()) {
            Some(mean) => write!(f, "Mean length: {:.2}", mean),
            None => write!(f, "Mean length: n/a"),
        }
    }
}

impl<F: Float + Send + Sync> Streamlines<F> {
    /// An empty collection in the identity frame.
    pub fn new() -> Self {
        Self::with_affine(Vec::new(), Affine3::identity())
    }

    /// A collection with an explicit affine to world coordinates.
    pub fn with_affine(items: Vec<Streamline<F>>, affine: Affine3<F>) -> Self {
        Self { items, affine }
    }

    /// The affine mapping point coordinates to world space.
    pub fn affine(&self) -> &Affine3<F> {
        &self.affine
    }

    /// Replaces the world affine without touching any point.
    pub fn set_affine(&mut self, affine: Affine3<F>) {
        self.affine = affine;
    }

    /// Number of streamlines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection holds no streamlines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the streamlines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Streamline<F>> {
        self.items.iter()
    }

    /// The streamline at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&Streamline<F>> {
        self.items.get(index)
    }

    /// Appends a streamline.
    pub fn push(&mut self, streamline: Streamline<F>) {
        self.items.push(streamline);
    }

    /// The streamlines as a slice.
    pub fn as_slice(&self) -> &[Streamline<F>] {
        &self.items
    }

    /// Consumes the collection, returning its streamlines.
    pub fn into_vec(self) -> Vec<Streamline<F>> {
        self.items
    }

    /// Returns true if a streamline with the same fingerprint is present.
    pub fn contains(&self, streamline: &Streamline<F>) -> bool {
        self.items.contains(streamline)
    }

    /// Arc length of every streamline, in order.
    pub fn lengths(&self) -> Vec<F> {
        self.items.par_iter().map(|s| s.length()).collect()
    }

    /// Keeps only streamlines at least `min_length` long, preserving order.
    pub fn filter_min_length(&mut self, min_length: F) -> &mut Self {
        let before = self.items.len();
        self.items.retain(|s| s.length() >= min_length);
        log::debug!(
            "filtered {} of {} streamlines below minimum length",
            before - self.items.len(),
            before
        );
        self
    }

    /// Orients every streamline to follow `template`.
    ///
    /// Without a template the first streamline is used, so it is left as
    /// is. Each streamline is compared to the fixed template independently.
    pub fn reorient(&mut self, template: Option<&Streamline<F>>) -> Result<()> {
        self.reorient_with(template, DEFAULT_SAMPLE_COUNT)
    }

    /// [`Streamlines::reorient`] with an explicit number of comparison samples.
    pub fn reorient_with(
        &mut self,
        template: Option<&Streamline<F>>,
        sample_count: usize,
    ) -> Result<()> {
        let template = match template {
            Some(t) => t.clone(),
            None => match self.items.first() {
                Some(first) => first.clone(),
                None => return Ok(()),
            },
        };

        let items = self
            .items
            .par_iter()
            .map(|s| s.reorient(&template, sample_count))
            .collect::<Result<Vec<_>>>()?;
        self.items = items;
        Ok(())
    }

    /// Reverses the point order of every streamline.
    pub fn reverse(&mut self) {
        self.items = self.items.par_iter().map(|s| s.reversed()).collect();
    }

    /// Smooths every streamline. See [`crate::smooth::smooth`].
    ///
    /// On error the collection is left unchanged.
    pub fn smooth(&mut self, knot_distance: F) -> Result<()> {
        log::debug!("smoothing {} streamlines", self.items.len());
        let items = self
            .items
            .par_iter()
            .map(|s| s.smooth(knot_distance))
            .collect::<Result<Vec<_>>>()?;
        self.items = items;
        Ok(())
    }

    /// Resamples every streamline to `count` points.
    pub fn resample(&mut self, count: usize) {
        self.items = self.items.par_iter().map(|s| s.resample(count)).collect();
    }

    /// Maps every point through `affine`. The stored world affine is unchanged.
    pub fn transform(&mut self, affine: &Affine3<F>) {
        self.items = self.items.par_iter().map(|s| s.transform(affine)).collect();
    }

    /// Fingerprint of every streamline, in order.
    pub fn fingerprints(&self) -> Vec<u64> {
        self.items.par_iter().map(|s| s.fingerprint()).collect()
    }

    /// Moves all streamlines of `other` to the end of this collection.
    ///
    /// Duplicates are kept and `other`'s affine is ignored.
    pub fn append(&mut self, other: Streamlines<F>) {
        self.items.extend(other.items);
    }

    /// Count, point count and mean length.
    pub fn summary(&self) -> Summary<F> {
        let lengths = self.lengths();
        let mean_length = if lengths.is_empty() {
            None
        } else {
            let total = lengths.iter().fold(F::zero(), |acc, &l| acc + l);
            F::from(lengths.len()).map(|n| total / n)
        };
        Summary {
            count: self.items.len(),
            point_count: self.items.iter().map(|s| s.len()).sum(),
            mean_length,
        }
    }
}

impl<F: Float + Send + Sync> Default for Streamlines<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float + Send + Sync> FromIterator<Streamline<F>> for Streamlines<F> {
    fn from_iter<I: IntoIterator<Item = Streamline<F>>>(iter: I) -> Self {
        Self::with_affine(iter.into_iter().collect(), Affine3::identity())
    }
}

impl<F: Float + Send + Sync> AddAssign for Streamlines<F> {
    fn add_assign(&mut self, other: Self) {
        self.append(other);
    }
}

impl<F> Index<usize> for Streamlines<F> {
    type Output = Streamline<F>;

    fn index(&self, index: usize) -> &Streamline<F> {
        &self.items[index]
    }
}

impl<'a, F> IntoIterator for &'a Streamlines<F> {
    type Item = &'a Streamline<F>;
    type IntoIter = std::slice::Iter<'a, Streamline<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<F> IntoIterator for Streamlines<F> {
    type Item = Streamline<F>;
    type IntoIter = std::vec::IntoIter<Streamline<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Concatenates collections in order. The result takes the first collection's affine.
pub fn merge<F: Float + Send + Sync>(
    collections: impl IntoIterator<Item = Streamlines<F>>,
) -> Streamlines<F> {
    let mut iter = collections.into_iter();
    let mut merged = iter.next().unwrap_or_default();
    for other in iter {
        merged += other;
    }
    merged
}
