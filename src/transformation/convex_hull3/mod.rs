pub use self::convex_hull::{convex_hull, try_convex_hull};
pub use self::error::ConvexHullError;
pub use self::validation::check_convex_hull;

mod convex_hull;
mod error;
mod initial_simplex;
mod input_cleanup;
mod triangle_facet;
mod validation;
