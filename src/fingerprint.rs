//! Cheap identity keys for streamlines.
//!
//! A fingerprint hashes at most ten points: all of them for short
//! streamlines, otherwise the first five and the last five. It is meant for
//! deduplication and equality shortcuts, not as a digest: streamlines that
//! differ only in their interior points share a fingerprint.

use crate::primitives::Point3;
use num_traits::Float;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Streamlines with fewer points than this are fingerprinted in full.
pub const FINGERPRINT_MIN_POINTS: usize = 10;

/// Number of points taken from each end of longer streamlines.
const END_POINTS: usize = FINGERPRINT_MIN_POINTS / 2;

/// The points that contribute to the fingerprint, in hashing order.
pub fn key_points<F: Float>(points: &[Point3<F>]) -> Vec<Point3<F>> {
    let n = points.len();
    if n < FINGERPRINT_MIN_POINTS {
        points.to_vec()
    } else {
        points[..END_POINTS]
            .iter()
            .chain(&points[n - END_POINTS..])
            .copied()
            .collect()
    }
}

/// Computes the fingerprint of a streamline.
///
/// Coordinates are hashed by their exact bit-level decomposition, so equal
/// bit patterns always give equal fingerprints within a build. Note that
/// `0.0` and `-0.0` differ.
pub fn fingerprint<F: Float>(points: &[Point3<F>]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for p in key_points(points) {
        for c in p.to_array() {
            c.integer_decode().hash(&mut hasher);
        }
    }
    hasher.finish()
}
