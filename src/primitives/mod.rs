//! Floating-point geometric primitives for streamline points.

mod affine3;
mod point3;
mod vec3;

pub use affine3::Affine3;
pub use point3::Point3;
pub use vec3::Vec3;
