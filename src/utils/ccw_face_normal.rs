use crate::math::*;

/// Computes the direction pointing toward the outside of the counter-clockwise triangle
/// `(pts[0], pts[1], pts[2])`.
///
/// Returns `None` if the triangle is degenerate.
#[inline]
pub fn ccw_face_normal(pts: [&Point<Real>; 3]) -> Option<UnitVector<Real>> {
    let ab = *pts[1] - *pts[0];
    let ac = *pts[2] - *pts[0];
    let res = ab.cross(&ac);

    UnitVector::try_new(res, DEFAULT_EPSILON)
}
