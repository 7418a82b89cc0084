pub use self::split::SplitResult;
pub use self::split_trimesh::split_mesh;

mod split;
mod split_trimesh;
