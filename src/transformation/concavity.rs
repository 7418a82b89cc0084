//! Estimation of the empty volume between a mesh and its convex hull.

use crate::math::{Point, Real};
use crate::query::{Ray, RayCaster};
use crate::shape::Triangle;
use crate::utils;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The factor by which each source triangle is shrunk toward its center before casting rays
/// from its corners.
const SHRINK_FACTOR: Real = 0.999;

/// Estimates the volume enclosed between the triangle mesh `(mesh_vertices, mesh_indices)` and
/// its convex hull `(hull_vertices, hull_indices)`.
///
/// A ray is cast from each (slightly shrunk) corner of each triangle of the mesh, along the
/// triangle normal, until it hits either the front face of another mesh triangle, or the hull.
/// When the three rays of a triangle hit, the prism between the triangle and the three hit
/// points is added to the estimate. Triangles with a missing hit are ignored, so the
/// estimate is a lower bound of the actual empty volume.
pub fn estimate_concavity(
    hull_vertices: &[Point<Real>],
    hull_indices: &[[u32; 3]],
    mesh_vertices: &[Point<Real>],
    mesh_indices: &[[u32; 3]],
) -> Real {
    let hull = RayCaster::new(hull_vertices, hull_indices);
    let mesh = RayCaster::new(mesh_vertices, mesh_indices);

    let prism_volume = |idx: &[u32; 3]| -> Real {
        let triangle = Triangle::new(
            mesh_vertices[idx[0] as usize],
            mesh_vertices[idx[1] as usize],
            mesh_vertices[idx[2] as usize],
        );
        triangle_prism_volume(&triangle, &hull, &mesh).unwrap_or(0.0)
    };

    #[cfg(feature = "parallel")]
    let volumes: Vec<Real> = mesh_indices.par_iter().map(prism_volume).collect();
    #[cfg(not(feature = "parallel"))]
    let volumes: Vec<Real> = mesh_indices.iter().map(prism_volume).collect();

    // Summed in triangle order, independently of the threads scheduling.
    volumes.into_iter().sum()
}

fn triangle_prism_volume(
    triangle: &Triangle,
    hull: &RayCaster,
    mesh: &RayCaster,
) -> Option<Real> {
    let normal = triangle.normal()?;
    let shrunk = triangle.shrunk(SHRINK_FACTOR);
    let mut hits = [Point::origin(); 3];

    for (hit, origin) in hits.iter_mut().zip(shrunk.vertices()) {
        let ray = Ray::new(origin, *normal);
        let mesh_hit = mesh.cast_ray_with_predicate(&ray, Real::MAX, |hit| {
            hit.front_face() && hit.time_of_impact() > 0.0
        });
        let hull_hit = hull.cast_ray(&ray, Real::MAX);

        let toi = match (mesh_hit, hull_hit) {
            (Some(m), Some(h)) => m.time_of_impact().min(h.time_of_impact()),
            (Some(m), None) => m.time_of_impact(),
            (None, Some(h)) => h.time_of_impact(),
            (None, None) => return None,
        };

        *hit = ray.point_at(toi);
    }

    let [a, b, c] = triangle.vertices();
    let [ta, tb, tc] = hits;
    let prism = [a, b, c, ta, tb, tc];
    let prism_indices = [
        [0, 2, 1],
        [3, 4, 5],
        [0, 1, 4],
        [0, 4, 3],
        [1, 2, 5],
        [1, 5, 4],
        [2, 0, 3],
        [2, 3, 5],
    ];

    Some(utils::mesh_volume(&prism, &prism_indices))
}
