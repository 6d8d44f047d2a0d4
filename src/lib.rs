//! streamlines - Geometry for diffusion MRI tractography
//!
//! A streamline is an ordered polyline of 3D points traced through white
//! matter. This library measures, resamples, smooths, orients, transforms
//! and fingerprints streamlines, one at a time or as whole collections.
//!
//! ```
//! use streamlines::{Point3, Streamline};
//!
//! let s: Streamline<f64> = (0..50)
//!     .map(|i| Point3::new(i as f64, (i as f64 * 0.3).sin(), 0.0))
//!     .collect();
//!
//! let resampled = s.resample(20);
//! assert_eq!(resampled.len(), 20);
//!
//! let smoothed = s.smooth(10.0).unwrap();
//! assert_eq!(smoothed.len(), s.len());
//! ```

pub mod collection;
pub mod curves;
pub mod error;
pub mod fingerprint;
pub mod metrics;
pub mod orient;
pub mod primitives;
pub mod resample;
pub mod smooth;
pub mod streamline;
pub mod transform;

mod maybe_rayon;

pub use collection::{merge, Streamlines, Summary};
pub use error::{Result, StreamlineError};
pub use fingerprint::fingerprint;
pub use metrics::{distance, length, DistanceOptions, DEFAULT_SAMPLE_COUNT};
pub use orient::reorient;
pub use primitives::{Affine3, Point3, Vec3};
pub use resample::resample;
pub use smooth::{smooth, SmoothOptions, DEFAULT_KNOT_DISTANCE};
pub use streamline::Streamline;
pub use transform::transform;
