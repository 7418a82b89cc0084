//! Convex hull inflated by a skin width, with beveled sharp edges.

use self::candidate_planes::{candidate_planes, nearly_parallel, MIN_ADJACENT_ANGLE};
use self::convex_polytope::{ConvexPolytope, CropOutcome};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, Vector};

mod candidate_planes;
mod convex_polytope;

/// The margin added around the hull to build the initial box, relative to the hull diameter.
const BOX_MARGIN: Real = 0.1;
/// The extra margin added on the box sides parallel to a candidate plane.
const PARALLEL_SIDE_MARGIN: Real = 0.5;
/// The tolerance of the crops, relative to the hull diameter.
const CROP_EPSILON: Real = 1.0e-5;
/// The maximum number of vertices of the inflated polytope.
const VERTEX_CAPACITY: usize = 4096;

/// Inflates the convex hull `(vertices, indices)` by `skin_width`.
///
/// The result is obtained by cropping a box enclosing the hull with the planes of the hull
/// faces and of bevels on its sharp edges, each one pushed outward by `skin_width`. At most
/// `max_crops` crops are performed, the most violated plane first.
///
/// Returns `None` if the hull has no usable face.
pub fn inflated_hull(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
    skin_width: Real,
    max_crops: usize,
) -> Option<(Vec<Point<Real>>, Vec<[u32; 3]>)> {
    let candidates: Vec<_> = candidate_planes(vertices, indices)
        .into_iter()
        .map(|plane| plane.translated_along_normal(skin_width))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let aabb = Aabb::from_points(vertices);
    let diameter = aabb.diagonal_length();
    let eps = diameter * CROP_EPSILON;
    let mut enclosing = aabb.loosened(diameter * BOX_MARGIN + skin_width);

    for (axis, sign) in Aabb::FACES_NORMAL_AXIS {
        let side = UnitVector::new_unchecked(Vector::ith(axis, sign));

        if candidates
            .iter()
            .any(|plane| nearly_parallel(&plane.normal, &side, MIN_ADJACENT_ANGLE))
        {
            if sign > 0.0 {
                enclosing.maxs[axis] += diameter * PARALLEL_SIDE_MARGIN;
            } else {
                enclosing.mins[axis] -= diameter * PARALLEL_SIDE_MARGIN;
            }
        }
    }

    let mut polytope = ConvexPolytope::from_aabb(&enclosing);
    let mut used = vec![false; candidates.len()];

    for _ in 0..max_crops {
        let mut best = None;
        let mut best_score = 0.0;

        for (i, plane) in candidates.iter().enumerate() {
            if used[i] {
                continue;
            }

            let (dmin, dmax) = polytope
                .vertices()
                .iter()
                .map(|pt| plane.signed_distance(pt))
                .fold((Real::MAX, -Real::MAX), |(min, max), d| (min.min(d), max.max(d)));

            if dmax <= eps {
                // The polytope only shrinks: this plane will never cut it.
                used[i] = true;
                continue;
            }

            let blocked = polytope.faces().iter().any(|face| {
                nearly_parallel(&face.plane.normal, &plane.normal, MIN_ADJACENT_ANGLE)
                    && face
                        .vertices
                        .iter()
                        .any(|v| plane.signed_distance(&polytope.vertices()[*v]) < -eps)
            });

            if blocked {
                continue;
            }

            let score = dmax / (dmax - dmin);

            if score > best_score {
                best = Some(i);
                best_score = score;
            }
        }

        let Some(best) = best else {
            break;
        };

        used[best] = true;

        if polytope.crop(&candidates[best], eps, VERTEX_CAPACITY) == CropOutcome::Rejected {
            log::debug!("Rejected the crop of the inflated hull by plane {best}.");
        }
    }

    let (vertices, indices) = polytope.to_trimesh();
    (indices.len() >= 4).then_some((vertices, indices))
}
