use super::split_plane::best_fit_plane;
use super::{CancellationToken, DecompositionError, DecompositionParameters};
use crate::math::{Point, Real};
use crate::query::{split_mesh, SplitResult};
use crate::shape::{ConvexHull, TriangleMesh};
use crate::transformation::concavity::estimate_concavity;
use crate::transformation::convex_hull;
use crate::transformation::islands::IslandGenerator;
use crate::utils::{self, VertexWelder};

/// The recursive split and merge algorithm behind a [`ConvexDecomposition`](super::ConvexDecomposition).
///
/// A decomposer owns everything it needs, so it can be moved to a background thread.
pub(crate) struct Decomposer {
    params: DecompositionParameters,
    cancel: CancellationToken,
    overall_volume: Real,
}

impl Decomposer {
    pub fn new(params: DecompositionParameters, cancel: CancellationToken) -> Self {
        Self {
            params,
            cancel,
            overall_volume: 0.0,
        }
    }

    /// Decomposes `mesh` into convex hulls.
    pub fn run(&mut self, mesh: &TriangleMesh) -> Result<Vec<ConvexHull>, DecompositionError> {
        if mesh.is_empty() {
            return Err(DecompositionError::EmptyMesh);
        }

        let (vertices, indices) = convex_hull(mesh.vertices(), self.params.max_hull_vertices, 0.0);
        self.overall_volume = utils::mesh_volume(&vertices, &indices);

        let mut leaves = Vec::new();
        self.decompose(mesh, 0, self.params.use_initial_islands, &mut leaves)?;
        log::debug!(
            "Split phase yielded {} hulls, overall volume: {}.",
            leaves.len(),
            self.overall_volume
        );

        merge_hulls(leaves, &self.params, &self.cancel)
    }

    fn check_cancelled(&self) -> Result<(), DecompositionError> {
        if self.cancel.is_cancelled() {
            Err(DecompositionError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn decompose(
        &self,
        mesh: &TriangleMesh,
        depth: u32,
        with_islands: bool,
        leaves: &mut Vec<ConvexHull>,
    ) -> Result<(), DecompositionError> {
        self.check_cancelled()?;

        if depth >= self.params.max_depth {
            leaves.push(self.build_hull(mesh.vertices(), self.params.skin_width));
            return Ok(());
        }

        if with_islands && depth == 0 {
            let mut islands = IslandGenerator::new();
            let _ = islands.generate(mesh.indices());
            let _ = islands.merge_coplanar_islands(mesh.vertices(), mesh.indices());

            if islands.num_islands() > 1 {
                log::debug!("Decomposing {} islands independently.", islands.num_islands());

                for island in islands.islands() {
                    self.decompose(&island.to_mesh(mesh), depth, false, leaves)?;
                }

                return Ok(());
            }
        }

        // The split test uses the hull without skin. The skin only applies to emitted leaves.
        let hull = self.build_hull(mesh.vertices(), 0.0);
        let hull_volume = hull.volume();
        let overall_volume = self.overall_volume.max(Real::EPSILON);

        let should_split = depth + 1 < self.params.max_depth
            && hull_volume / overall_volume * 100.0 > self.params.volume_split_threshold_percent
            && {
                let concavity = estimate_concavity(
                    hull.vertices(),
                    hull.indices(),
                    mesh.vertices(),
                    mesh.indices(),
                );
                log::debug!("Depth {depth}: hull volume {hull_volume}, concavity {concavity}.");
                hull_volume > 0.0
                    && concavity / hull_volume * 100.0 >= self.params.concavity_threshold_percent
            };

        let plane = best_fit_plane(hull.vertices());

        if !should_split {
            leaves.push(self.with_skin(hull, mesh));
            return Ok(());
        }

        match split_mesh(mesh, &plane, self.params.split_precision) {
            SplitResult::Pair(front, back) => {
                log::debug!(
                    "Depth {depth}: split into {} and {} triangles.",
                    front.num_triangles(),
                    back.num_triangles()
                );
                self.decompose(&front, depth + 1, false, leaves)?;
                self.decompose(&back, depth + 1, false, leaves)
            }
            SplitResult::Negative | SplitResult::Positive => {
                log::debug!("Depth {depth}: the split plane missed the mesh, keeping its hull.");
                leaves.push(self.with_skin(hull, mesh));
                Ok(())
            }
        }
    }

    fn with_skin(&self, hull: ConvexHull, mesh: &TriangleMesh) -> ConvexHull {
        if self.params.skin_width > 0.0 {
            self.build_hull(mesh.vertices(), self.params.skin_width)
        } else {
            hull
        }
    }

    fn build_hull(&self, points: &[Point<Real>], skin_width: Real) -> ConvexHull {
        let mut welder = VertexWelder::new(self.params.weld_epsilon);

        for pt in points {
            let _ = welder.get_index(*pt);
        }

        let (vertices, indices) = convex_hull(
            welder.vertices(),
            self.params.max_hull_vertices,
            skin_width,
        );
        ConvexHull::new(vertices, indices)
    }
}

/// Greedily replaces pairs of hulls by the hull of their union.
///
/// The first hull not tested yet is merged with the untested hull leading to the smallest
/// volume increase, if that increase does not exceed the merge threshold. Otherwise it is marked
/// as tested. The merged hull is appended to the list, untested, and both inputs are removed.
pub(crate) fn merge_hulls(
    mut hulls: Vec<ConvexHull>,
    params: &DecompositionParameters,
    cancel: &CancellationToken,
) -> Result<Vec<ConvexHull>, DecompositionError> {
    for hull in &mut hulls {
        hull.tested = false;
    }

    while let Some(i) = hulls.iter().position(|hull| !hull.tested) {
        let mut best: Option<(usize, ConvexHull, Real)> = None;

        for j in 0..hulls.len() {
            if cancel.is_cancelled() {
                return Err(DecompositionError::Cancelled);
            }

            if j == i || hulls[j].tested {
                continue;
            }

            let merged = union_hull(&hulls[i], &hulls[j], params);
            let sum_volume = hulls[i].volume() + hulls[j].volume();
            let increase = if sum_volume > 0.0 {
                (merged.volume() - sum_volume) / sum_volume * 100.0
            } else {
                0.0
            };

            if increase <= params.merge_threshold_percent
                && best.as_ref().map_or(true, |(_, _, best_increase)| increase < *best_increase)
            {
                best = Some((j, merged, increase));
            }
        }

        match best {
            Some((j, merged, increase)) => {
                log::debug!("Merging hulls {i} and {j}, volume increase: {increase}%.");
                let _ = hulls.remove(i.max(j));
                let _ = hulls.remove(i.min(j));
                hulls.push(merged);
            }
            None => hulls[i].tested = true,
        }
    }

    Ok(hulls)
}

fn union_hull(a: &ConvexHull, b: &ConvexHull, params: &DecompositionParameters) -> ConvexHull {
    let mut points = Vec::with_capacity(a.vertices().len() + b.vertices().len());
    points.extend_from_slice(a.vertices());
    points.extend_from_slice(b.vertices());

    let (vertices, indices) = convex_hull(&points, params.max_hull_vertices, 0.0);
    ConvexHull::new(vertices, indices)
}
