//! Geometry primitives for mesh-unwrap.
//!
//! Value-type vectors in the canonical page frame and axis-aligned extents.

pub mod boundaries;
pub mod vec2;
pub mod vec3;

pub use boundaries::Boundaries;
pub use vec2::Vec2;
pub use vec3::Vec3;
