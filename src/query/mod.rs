//! Non-persistent geometric queries.
//!
//! # General cases
//! The most general methods provided by this module are:
//!
//! * [`RayCaster::cast_ray`] to compute the first intersection between a ray and a triangle mesh.
//! * [`split_mesh`] to cut a triangle mesh in two along a plane.

pub use self::ray::{Ray, RayCaster, RayHit, RayIntersection};
pub use self::split::{split_mesh, SplitResult};

pub mod details {
    //! Queries dedicated to specific pairs of shapes.
    pub use super::ray::local_ray_intersection_with_triangle;
}

mod ray;
mod split;
