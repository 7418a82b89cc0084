use crate::math::{Point, Real, Vector};

/// The centroid of a set of points, each weighted equally.
///
/// Returns the origin if `pts` is empty.
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    if pts.is_empty() {
        return Point::origin();
    }

    let sum: Vector<Real> = pts.iter().map(|pt| pt.coords).sum();
    Point::from(sum / pts.len() as Real)
}

#[cfg(test)]
mod test {
    use super::center;
    use crate::math::Point;

    #[test]
    fn center_of_a_triangle() {
        let pts = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 0.0),
            Point::new(0.0, 4.0, 0.0),
        ];

        assert_relative_eq!(center(&pts), Point::new(4.0 / 3.0, 4.0 / 3.0, 0.0));
        assert_eq!(center(&[]), Point::origin());
    }
}
