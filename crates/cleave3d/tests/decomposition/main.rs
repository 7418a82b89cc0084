mod common;
mod convex_hull;
mod decomposition;
mod islands;
mod split_mesh;
mod vertex_welder;
