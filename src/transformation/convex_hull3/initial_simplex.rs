use crate::math::{Point, Real, Vector};
use crate::utils::tetrahedron_volume;

/// The radius of the cone of perturbed directions sampled around a search direction.
const PERTURBATION: Real = 0.025;
/// The number of samples around the perturbation cone (one every 45 degrees, wrapping around).
const NUM_PROBES: usize = 10;
/// The number of consecutive samples a point must win to be accepted as a stable extreme point.
const STABLE_PROBES: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SeedState {
    Allowed,
    Rejected,
    Accepted,
}

fn filtered_support_point_id(
    dir: &Vector<Real>,
    points: &[Point<Real>],
    states: &[SeedState],
) -> Option<usize> {
    let mut argmax = None;
    let mut max = -Real::MAX;

    for (i, pt) in points.iter().enumerate() {
        if states[i] == SeedState::Rejected {
            continue;
        }

        let dot = pt.coords.dot(dir);

        if dot > max {
            argmax = Some(i);
            max = dot;
        }
    }

    argmax
}

/// Finds an extreme point along `dir` that stays extreme under small perturbations of `dir`.
///
/// Ties and near-ties between several extreme points are broken by probing a cone of directions
/// around `dir`: a candidate is accepted once it wins a few consecutive samples, otherwise it is
/// rejected and the next best point is tried.
fn stable_support_point_id(
    dir: &Vector<Real>,
    points: &[Point<Real>],
    states: &mut [SeedState],
) -> Option<usize> {
    let dir = dir.try_normalize(0.0)?;
    let u = dir
        .cross(&Vector::x())
        .try_normalize(1.0e-3)
        .or_else(|| dir.cross(&Vector::y()).try_normalize(1.0e-3))?;
    let v = dir.cross(&u);

    loop {
        let candidate = filtered_support_point_id(&dir, points, states)?;

        if states[candidate] == SeedState::Accepted {
            return Some(candidate);
        }

        let mut consecutive = 0;

        for k in 0..NUM_PROBES {
            let angle = (k as Real) * Real::to_radians(45.0);
            let (s, c) = angle.sin_cos();
            let sample = dir + (u * s + v * c) * PERTURBATION;

            if filtered_support_point_id(&sample, points, states) == Some(candidate) {
                consecutive += 1;

                if consecutive >= STABLE_PROBES {
                    states[candidate] = SeedState::Accepted;
                    return Some(candidate);
                }
            } else {
                consecutive = 0;
            }
        }

        states[candidate] = SeedState::Rejected;
    }
}

/// Finds four points forming a non-degenerate tetrahedron, to seed the hull construction.
///
/// The returned tetrahedron `[p0, p1, p2, p3]` has a positive volume: `p3` lies on the side
/// pointed by the counter-clockwise normal of the triangle `(p0, p1, p2)`. Returns `None` if
/// no such tetrahedron thicker than `min_height` exists.
pub fn find_initial_simplex(points: &[Point<Real>], min_height: Real) -> Option<[usize; 4]> {
    let mut states = vec![SeedState::Allowed; points.len()];
    let mut support = |dir: &Vector<Real>| stable_support_point_id(dir, points, &mut states);

    let dir0 = Vector::new(0.01, 0.02, 1.0);
    let p0 = support(&dir0)?;
    let p1 = support(&-dir0)?;
    let axis0 = points[p0] - points[p1];

    if p0 == p1 || axis0.norm_squared() == 0.0 {
        return None;
    }

    let candidate1 = Vector::new(1.0, 0.02, 0.0).cross(&axis0);
    let candidate2 = Vector::new(-0.02, 1.0, 0.0).cross(&axis0);
    let dir1 = if candidate1.norm_squared() > candidate2.norm_squared() {
        candidate1
    } else {
        candidate2
    };

    let mut p2 = support(&dir1)?;
    if p2 == p0 || p2 == p1 {
        p2 = support(&-dir1)?;
    }
    if p2 == p0 || p2 == p1 {
        return None;
    }

    let axis1 = points[p2] - points[p0];
    let dir2 = axis1.cross(&axis0).try_normalize(0.0)?;

    let mut p3 = support(&dir2)?;
    if p3 == p0 || p3 == p1 || p3 == p2 {
        p3 = support(&-dir2)?;
    }
    if p3 == p0 || p3 == p1 || p3 == p2 {
        return None;
    }

    let base_normal = (points[p1] - points[p0])
        .cross(&(points[p2] - points[p0]))
        .try_normalize(0.0)?;
    let height = base_normal.dot(&(points[p3] - points[p0]));

    if height.abs() <= min_height {
        return None;
    }

    if tetrahedron_volume(&points[p0], &points[p1], &points[p2], &points[p3]) < 0.0 {
        std::mem::swap(&mut p2, &mut p3);
    }

    Some([p0, p1, p2, p3])
}
