//! Definition of the triangle shape.

use crate::math::{Point, Real, UnitVector, Vector};
use crate::utils;

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone, Default)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// A vector normal of this triangle, with a length equal to twice its area.
    ///
    /// The vector points toward the side from which `(a, b, c)` appears counter-clockwise.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The normal of this triangle, or `None` if it is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        utils::ccw_face_normal([&self.a, &self.b, &self.c])
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * 0.5
    }

    /// The geometric center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        utils::center(&[self.a, self.b, self.c])
    }

    /// Checks that the given points are not collinear, up to a small tolerance.
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;
        relative_eq!(self.scaled_normal().norm_squared(), 0.0, epsilon = EPS * EPS)
    }

    /// Moves each vertex of this triangle toward its center by the given `factor`.
    ///
    /// A factor of `1.0` leaves the triangle unchanged and `0.0` collapses it to its center.
    #[must_use]
    pub fn shrunk(&self, factor: Real) -> Triangle {
        let center = self.center();
        let shrink = |p: Point<Real>| center + (p - center) * factor;
        Triangle::new(shrink(self.a), shrink(self.b), shrink(self.c))
    }
}
