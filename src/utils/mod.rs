//! Geometric helpers shared by the hull and decomposition algorithms.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::center::center;
pub use self::cleanup::remove_unused_points;
pub use self::cov::covariance;
pub use self::edge_key::EdgeKey;
pub use self::obb::{obb, OrientedBox};
pub use self::point_cloud_support_point::point_cloud_support_point_id;
pub use self::sorted_pair::SortedPair;
pub use self::trimesh_volume::{mesh_volume, tetrahedron_volume};
pub use self::vertex_welder::{VertexWelder, DEFAULT_WELD_EPSILON};

mod ccw_face_normal;
mod center;
mod cleanup;
mod cov;
mod edge_key;
pub mod hashmap;
mod obb;
mod point_cloud_support_point;
mod sorted_pair;
mod trimesh_volume;
mod vertex_welder;
