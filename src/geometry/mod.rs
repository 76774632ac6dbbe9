//! Coordinate transforms between screen space and canonical page space, plus
//! the hit-testing helpers used by the bundled stroke engine.

pub mod hit_testing;
pub mod transform;

pub use transform::{Affine, PageOrientation, render_transform, to_canonical_position};
