use crate::math::{Point, Real};
use crate::shape::Plane;
use crate::utils;

/// The plane cutting a point cloud through the middle of its longest side.
///
/// The plane passes through the center of the oriented bounding box of the points, and its
/// normal is the longest axis of that box.
pub fn best_fit_plane(points: &[Point<Real>]) -> Plane {
    let obb = utils::obb(points);
    Plane::from_point_and_normal(&obb.center, obb.longest_axis())
}

#[cfg(test)]
mod test {
    use super::best_fit_plane;
    use crate::bounding_volume::Aabb;
    use crate::math::Point;

    #[test]
    fn plane_cuts_the_longest_side() {
        let points = Aabb::new(Point::new(-4.0, 0.0, 0.0), Point::new(4.0, 1.0, 2.0)).vertices();
        let plane = best_fit_plane(&points);

        assert_relative_eq!(plane.normal.x.abs(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(plane.signed_distance(&Point::new(0.0, 0.5, 1.0)), 0.0, epsilon = 1.0e-5);
    }
}
