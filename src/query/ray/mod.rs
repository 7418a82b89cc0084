//! Ray-casting related definitions and implementations.

#[doc(inline)]
pub use self::ray::{Ray, RayIntersection};
pub use self::ray_caster::{RayCaster, RayHit};
pub use self::ray_triangle::local_ray_intersection_with_triangle;

#[doc(hidden)]
pub mod ray;
mod ray_caster;
mod ray_triangle;
