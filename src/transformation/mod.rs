//! Transformation, simplification and decomposition of meshes.

pub use self::concavity::estimate_concavity;
pub use self::convex_hull3::{check_convex_hull, convex_hull, try_convex_hull, ConvexHullError};
pub use self::islands::{Island, IslandGenerator};

mod concavity;
mod convex_hull3;
pub mod decomposition;
mod inflated_hull;
pub mod islands;

#[cfg(feature = "wavefront")]
pub mod wavefront;
