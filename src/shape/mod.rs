//! Shapes manipulated by the decomposition pipeline.

pub use self::convex_hull::ConvexHull;
pub use self::plane::Plane;
pub use self::triangle::Triangle;
pub use self::trimesh::{TriangleMesh, TriangleMeshError};

mod convex_hull;
mod plane;
mod triangle;
mod trimesh;
