use crate::math::{Point, Real, UnitVector};
use crate::shape::{Plane, Triangle};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::SortedPair;

/// Two planes closer than this angle, in degrees, are considered parallel.
pub const MIN_ADJACENT_ANGLE: Real = 3.0;
/// Edges sharper than this dihedral angle, in degrees, get a bevel plane.
pub const BEVEL_ANGLE: Real = 15.0;

/// Are both directions within `angle` degrees of each other?
pub fn nearly_parallel(n1: &UnitVector<Real>, n2: &UnitVector<Real>, angle: Real) -> bool {
    n1.dot(n2) > angle.to_radians().cos()
}

/// Collects the planes the inflated hull is cut with.
///
/// Each triangle of the hull contributes its supporting plane, unless an adjacent triangle
/// with a larger area (the first one in case of a tie) already has nearly the same plane. Each
/// sharp edge contributes a bevel plane, its normal halfway between the normals of the two
/// triangles sharing it, unless that plane is nearly parallel to a face plane.
pub fn candidate_planes(vertices: &[Point<Real>], indices: &[[u32; 3]]) -> Vec<Plane> {
    let triangles: Vec<_> = indices
        .iter()
        .map(|idx| {
            let tri = Triangle::new(
                vertices[idx[0] as usize],
                vertices[idx[1] as usize],
                vertices[idx[2] as usize],
            );
            let plane = Plane::from_triangle(&tri.a, &tri.b, &tri.c);
            (plane, tri.area())
        })
        .collect();

    // Edge -> the (at most two) triangles sharing it.
    let mut edges: HashMap<SortedPair<u32>, [usize; 2]> = HashMap::default();
    for (itri, idx) in indices.iter().enumerate() {
        for i in 0..3 {
            match edges.entry(SortedPair::new(idx[i], idx[(i + 1) % 3])) {
                Entry::Vacant(e) => {
                    let _ = e.insert([itri, usize::MAX]);
                }
                Entry::Occupied(mut e) => e.get_mut()[1] = itri,
            }
        }
    }

    let neighbor = |itri: usize, i: usize| {
        let idx = indices[itri];
        let adj = edges.get(&SortedPair::new(idx[i], idx[(i + 1) % 3]))?;
        let other = if adj[0] == itri { adj[1] } else { adj[0] };
        (other != usize::MAX && other != itri).then_some(other)
    };

    let mut face_planes = Vec::new();

    for (itri, (plane, area)) in triangles.iter().enumerate() {
        let Some(plane) = plane else {
            continue;
        };

        let dominated = (0..3).filter_map(|i| neighbor(itri, i)).any(|adj| {
            let (adj_plane, adj_area) = &triangles[adj];
            let larger = *adj_area > *area || (*adj_area == *area && adj < itri);

            larger
                && adj_plane.is_some_and(|adj_plane| {
                    nearly_parallel(&adj_plane.normal, &plane.normal, MIN_ADJACENT_ANGLE)
                })
        });

        if !dominated {
            face_planes.push(*plane);
        }
    }

    let mut bevel_planes = Vec::new();

    for (itri, idx) in indices.iter().enumerate() {
        for i in 0..3 {
            let Some(adj) = neighbor(itri, i) else {
                continue;
            };

            // Each edge is visited from both sides.
            if adj < itri {
                continue;
            }

            let (Some(p1), Some(p2)) = (triangles[itri].0, triangles[adj].0) else {
                continue;
            };

            if nearly_parallel(&p1.normal, &p2.normal, BEVEL_ANGLE) {
                continue;
            }

            let Some(normal) = UnitVector::try_new(*p1.normal + *p2.normal, 1.0e-6) else {
                continue;
            };

            let bevel = Plane::from_point_and_normal(&vertices[idx[i] as usize], normal);

            if !face_planes
                .iter()
                .any(|face| nearly_parallel(&face.normal, &bevel.normal, MIN_ADJACENT_ANGLE))
            {
                bevel_planes.push(bevel);
            }
        }
    }

    face_planes.append(&mut bevel_planes);
    face_planes
}
