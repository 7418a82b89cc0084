use crate::math::{Point, Real};
use crate::query::{Ray, RayIntersection};
use crate::query::details::local_ray_intersection_with_triangle;

/// The result of a ray cast against a [`RayCaster`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// The index of the triangle hit by the ray.
    pub triangle: u32,
    /// The intersection between the ray and that triangle.
    pub intersection: RayIntersection,
}

impl RayHit {
    /// The time of impact of the hit.
    #[inline]
    pub fn time_of_impact(&self) -> Real {
        self.intersection.time_of_impact
    }

    /// Did the ray hit the front face of the triangle?
    #[inline]
    pub fn front_face(&self) -> bool {
        self.intersection.front_face
    }
}

/// Brute-force ray casting against a static triangle soup.
///
/// Every triangle is tested for each ray, which is the right trade-off for the small meshes
/// manipulated while estimating the concavity of a decomposition piece.
#[derive(Copy, Clone, Debug)]
pub struct RayCaster<'a> {
    vertices: &'a [Point<Real>],
    indices: &'a [[u32; 3]],
}

impl<'a> RayCaster<'a> {
    /// Creates a ray caster for the triangles `indices` of the vertex buffer `vertices`.
    pub fn new(vertices: &'a [Point<Real>], indices: &'a [[u32; 3]]) -> Self {
        Self { vertices, indices }
    }

    /// Computes the nearest hit between `ray` and the triangles, no farther than
    /// `max_time_of_impact`.
    pub fn cast_ray(&self, ray: &Ray, max_time_of_impact: Real) -> Option<RayHit> {
        self.cast_ray_with_predicate(ray, max_time_of_impact, |_| true)
    }

    /// Computes the nearest hit between `ray` and the triangles, ignoring every hit for which
    /// `predicate` returns `false`.
    pub fn cast_ray_with_predicate(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        mut predicate: impl FnMut(&RayHit) -> bool,
    ) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        let mut best_toi = max_time_of_impact;

        for (i, idx) in self.indices.iter().enumerate() {
            let a = &self.vertices[idx[0] as usize];
            let b = &self.vertices[idx[1] as usize];
            let c = &self.vertices[idx[2] as usize];

            let Some((intersection, _)) = local_ray_intersection_with_triangle(a, b, c, ray) else {
                continue;
            };

            if intersection.time_of_impact > best_toi {
                continue;
            }

            let hit = RayHit {
                triangle: i as u32,
                intersection,
            };

            if predicate(&hit) {
                best_toi = intersection.time_of_impact;
                best = Some(hit);
            }
        }

        best
    }
}
