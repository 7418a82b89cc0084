use crate::math::{Point, Real, UnitVector, Vector};

/// An oriented plane, the set of points `x` such that `normal · x + offset = 0`.
///
/// The side pointed by the normal is called the front (or positive) side of the plane.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Plane {
    /// The unit normal of the plane.
    pub normal: UnitVector<Real>,
    /// The signed offset of the plane along its normal.
    pub offset: Real,
}

impl Plane {
    /// Builds a new plane from its normal and its offset.
    #[inline]
    pub fn new(normal: UnitVector<Real>, offset: Real) -> Plane {
        Plane { normal, offset }
    }

    /// Builds the plane with the given normal passing through `point`.
    #[inline]
    pub fn from_point_and_normal(point: &Point<Real>, normal: UnitVector<Real>) -> Plane {
        Plane {
            normal,
            offset: -normal.dot(&point.coords),
        }
    }

    /// The plane containing the counter-clockwise triangle `(a, b, c)`, or `None` if the
    /// triangle is degenerate.
    pub fn from_triangle(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Option<Plane> {
        let normal = crate::utils::ccw_face_normal([a, b, c])?;
        Some(Self::from_point_and_normal(a, normal))
    }

    /// The signed distance from `point` to this plane, positive on its front side.
    #[inline]
    pub fn signed_distance(&self, point: &Point<Real>) -> Real {
        self.normal.dot(&point.coords) + self.offset
    }

    /// The projection of `point` on this plane.
    #[inline]
    pub fn project_point(&self, point: &Point<Real>) -> Point<Real> {
        *point - *self.normal * self.signed_distance(point)
    }

    /// The same plane moved by `distance` along its normal.
    #[inline]
    #[must_use]
    pub fn translated_along_normal(&self, distance: Real) -> Plane {
        Plane::new(self.normal, self.offset - distance)
    }

    /// The same plane, with its front and back sides exchanged.
    #[inline]
    #[must_use]
    pub fn flipped(&self) -> Plane {
        Plane::new(-self.normal, -self.offset)
    }

    /// Two unit vectors forming, together with the normal, a right-handed orthonormal basis.
    pub fn tangent_basis(&self) -> (Vector<Real>, Vector<Real>) {
        let n = self.normal.into_inner();
        let helper = if n.x.abs() < 0.57 {
            Vector::x()
        } else {
            Vector::y()
        };
        let u = helper.cross(&n).normalize();
        let v = n.cross(&u);
        (u, v)
    }
}

#[cfg(test)]
mod test {
    use super::Plane;
    use crate::math::{Point, Vector};

    #[test]
    fn plane_signed_distance_and_projection() {
        let plane = Plane::from_point_and_normal(&Point::new(0.0, 0.0, 2.0), Vector::z_axis());
        let pt = Point::new(1.0, -1.0, 5.0);

        assert_relative_eq!(plane.signed_distance(&pt), 3.0);
        assert_relative_eq!(plane.project_point(&pt), Point::new(1.0, -1.0, 2.0));
        assert_relative_eq!(plane.flipped().signed_distance(&pt), -3.0);
        assert_relative_eq!(plane.translated_along_normal(1.0).signed_distance(&pt), 2.0);
    }

    #[test]
    fn tangent_basis_is_right_handed() {
        let plane = Plane::from_point_and_normal(&Point::origin(), Vector::x_axis());
        let (u, v) = plane.tangent_basis();

        assert_relative_eq!(u.cross(&v), Vector::x(), epsilon = 1.0e-6);
        assert_relative_eq!(u.dot(&Vector::x()), 0.0, epsilon = 1.0e-6);
    }
}
