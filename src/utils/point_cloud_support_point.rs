use crate::math::{Point, Real, Vector};

/// The index of the point of `points` furthest along `dir`.
///
/// Returns `None` if `points` is empty.
#[inline]
pub fn point_cloud_support_point_id(dir: &Vector<Real>, points: &[Point<Real>]) -> Option<usize> {
    let mut best = None;
    let mut best_dot = -Real::MAX;

    for (i, p) in points.iter().enumerate() {
        let dot = p.coords.dot(dir);

        if dot > best_dot {
            best_dot = dot;
            best = Some(i);
        }
    }

    best
}

