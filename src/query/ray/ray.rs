//! Traits and structure needed to cast rays.

use crate::math::{Point, Real, Vector};

/// A Ray.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Computes the point at the given parameter on this line.
    ///
    /// This computes `self.origin + self.dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// Structure containing the result of a successful ray cast.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RayIntersection {
    /// The time of impact of the ray with the object. The exact contact point can be computed
    /// with: `ray.point_at(time_of_impact)` or equivalently `origin + dir * time_of_impact`
    /// where `origin` is the origin of the ray; `dir` is its direction.
    pub time_of_impact: Real,

    /// The unit normal at the intersection point, pointing toward the ray origin.
    pub normal: Vector<Real>,

    /// Did the ray hit the front face of the triangle, i.e., the side from which its vertices
    /// appear counter-clockwise?
    pub front_face: bool,
}

impl RayIntersection {
    #[inline]
    /// Creates a new `RayIntersection`.
    pub fn new(time_of_impact: Real, normal: Vector<Real>, front_face: bool) -> RayIntersection {
        RayIntersection {
            time_of_impact,
            normal,
            front_face,
        }
    }
}
