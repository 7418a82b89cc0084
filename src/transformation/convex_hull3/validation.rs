use super::ConvexHullError;
use crate::math::{Point, Real};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::SortedPair;

/// Checks if a convex-hull is properly formed.
///
/// The mesh must be a closed 2-manifold, each edge being shared by exactly two triangles, with
/// the topology of a sphere (Euler characteristic `V - E + F = 2`, counting only the vertices
/// referenced by a triangle).
pub fn check_convex_hull(
    points: &[Point<Real>],
    triangles: &[[u32; 3]],
) -> Result<(), ConvexHullError> {
    let mut edges = HashMap::default();
    let mut used_points = vec![false; points.len()];

    for (itri, tri) in triangles.iter().enumerate() {
        if tri[0] == tri[1] || tri[0] == tri[2] || tri[1] == tri[2] {
            return Err(ConvexHullError::DegenerateTriangle(itri));
        }

        for i in 0..3 {
            let ivtx1 = tri[i];
            let ivtx2 = tri[(i + 1) % 3];

            if let Some(used) = used_points.get_mut(ivtx1 as usize) {
                *used = true;
            }

            match edges.entry(SortedPair::new(ivtx1, ivtx2)) {
                Entry::Vacant(e) => {
                    let _ = e.insert([itri, usize::MAX]);
                }
                Entry::Occupied(mut e) => {
                    if e.get()[1] != usize::MAX {
                        return Err(ConvexHullError::TJunction(itri, ivtx1, ivtx2));
                    }

                    e.get_mut()[1] = itri;
                }
            }
        }
    }

    if edges.values().any(|adj| adj[1] == usize::MAX) {
        return Err(ConvexHullError::UnfinishedTriangle);
    }

    let num_vertices = used_points.iter().filter(|used| **used).count();
    let euler = num_vertices as isize - edges.len() as isize + triangles.len() as isize;

    if euler != 2 {
        return Err(ConvexHullError::InvalidEulerCharacteristic(euler));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::check_convex_hull;
    use crate::bounding_volume::Aabb;
    use crate::math::Point;
    use crate::transformation::ConvexHullError;

    #[test]
    fn closed_box_is_valid() {
        let (vertices, indices) = Aabb::new(Point::origin(), Point::new(1.0, 2.0, 3.0)).to_trimesh();
        assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));
    }

    #[test]
    fn open_box_is_unfinished() {
        let (vertices, mut indices) =
            Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0)).to_trimesh();
        let _ = indices.pop();

        assert_eq!(
            check_convex_hull(&vertices, &indices),
            Err(ConvexHullError::UnfinishedTriangle)
        );
    }

    #[test]
    fn degenerate_triangle_is_reported() {
        let vertices = [Point::origin(), Point::new(1.0, 0.0, 0.0)];
        assert_eq!(
            check_convex_hull(&vertices, &[[0, 1, 1]]),
            Err(ConvexHullError::DegenerateTriangle(0))
        );
    }
}
