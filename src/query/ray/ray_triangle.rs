use crate::math::{Point, Real, Vector};
use crate::query::{Ray, RayIntersection};

/// Computes the intersection between a triangle and a ray.
///
/// If an intersection is found, the time of impact, the normal and the barycentric coordinates of
/// the intersection point are returned. Both sides of the triangle can be hit: the
/// [`RayIntersection::front_face`] flag tells which one was, and the normal always faces the
/// ray origin.
pub fn local_ray_intersection_with_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
) -> Option<(RayIntersection, Vector<Real>)> {
    let ab = *b - *a;
    let ac = *c - *a;
    let p = ray.dir.cross(&ac);
    let det = ab.dot(&p);

    // The ray is parallel to the triangle plane.
    if det == 0.0 {
        return None;
    }

    let inv_det = 1.0 / det;
    let ao = ray.origin - *a;
    let u = ao.dot(&p) * inv_det;

    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = ao.cross(&ab);
    let v = ray.dir.dot(&q) * inv_det;

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let toi = ac.dot(&q) * inv_det;

    if toi < 0.0 {
        return None;
    }

    let n = ab.cross(&ac);
    let front_face = n.dot(&ray.dir) < 0.0;
    let normal = if front_face { n } else { -n }.normalize();

    Some((
        RayIntersection::new(toi, normal, front_face),
        Vector::new(1.0 - u - v, u, v),
    ))
}

#[cfg(test)]
mod test {
    use super::local_ray_intersection_with_triangle;
    use crate::math::{Point, Vector};
    use crate::query::Ray;

    #[test]
    fn ray_hits_triangle_front_and_back() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(2.0, 0.0, 0.0);
        let c = Point::new(0.0, 2.0, 0.0);

        let down = Ray::new(Point::new(0.5, 0.5, 3.0), -Vector::z());
        let (hit, bcoords) = local_ray_intersection_with_triangle(&a, &b, &c, &down).unwrap();
        assert!(hit.front_face);
        assert_relative_eq!(hit.time_of_impact, 3.0);
        assert_relative_eq!(hit.normal, Vector::z());
        assert_relative_eq!(bcoords.sum(), 1.0, epsilon = 1.0e-6);

        let up = Ray::new(Point::new(0.5, 0.5, -1.0), Vector::z());
        let (hit, _) = local_ray_intersection_with_triangle(&a, &b, &c, &up).unwrap();
        assert!(!hit.front_face);
        assert_relative_eq!(hit.time_of_impact, 1.0);
        assert_relative_eq!(hit.normal, -Vector::z());
    }

    #[test]
    fn ray_misses_triangle() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(2.0, 0.0, 0.0);
        let c = Point::new(0.0, 2.0, 0.0);

        let outside = Ray::new(Point::new(3.0, 3.0, 1.0), -Vector::z());
        assert!(local_ray_intersection_with_triangle(&a, &b, &c, &outside).is_none());

        let away = Ray::new(Point::new(0.5, 0.5, 1.0), Vector::z());
        assert!(local_ray_intersection_with_triangle(&a, &b, &c, &away).is_none());
    }
}
