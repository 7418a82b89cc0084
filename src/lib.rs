/*!
cleave3d
========

**cleave3d** computes approximate convex decompositions of 3-dimensional
triangle meshes: a non-convex (possibly multi-component) mesh is recursively
split by planes until every piece is close enough to its convex hull, and the
resulting hulls are then greedily merged back together wherever the merge does
not inflate the total volume too much.

The typical use is the generation of collision proxies for physics engines:

```
# #[cfg(feature = "f32")] {
use cleave3d::math::Point;
use cleave3d::transformation::decomposition::{ConvexDecomposition, DecompositionParameters};

let mut decomposition = ConvexDecomposition::new();
let a = Point::new(0.0, 0.0, 0.0);
let b = Point::new(1.0, 0.0, 0.0);
let c = Point::new(0.0, 1.0, 0.0);
let d = Point::new(0.0, 0.0, 1.0);
assert!(decomposition.add_triangle(a, c, b));
assert!(decomposition.add_triangle(a, b, d));
assert!(decomposition.add_triangle(a, d, c));
assert!(decomposition.add_triangle(b, c, d));

let num_hulls = decomposition.compute_convex_decomposition(&DecompositionParameters::default());
assert_eq!(num_hulls, 1);
# }
```

The scalar type is selected at compile-time: the `cleave3d` crate uses `f32`
and the `cleave3d-f64` crate uses `f64`. Both are built from the same sources.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![warn(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Matrix3, Point3, UnitVector3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The matrix type.
    pub use Matrix3 as Matrix;
}
