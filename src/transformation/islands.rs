//! Partition of a triangle soup into its edge-connected components.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::{Plane, TriangleMesh};
use crate::utils::hashmap::HashMap;
use crate::utils::EdgeKey;
use std::collections::VecDeque;

/// The distance, relative to the size of an island, under which a vertex is considered to lie
/// on the plane of the island.
const COPLANARITY_TOLERANCE: Real = 1.0e-5;

/// A set of triangles connected to each other through shared edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Island {
    triangles: Vec<u32>,
}

impl Island {
    /// The indices of the triangles of this island, in increasing order.
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// The number of triangles of this island.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Is this island empty?
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Extracts the triangles of this island from `mesh`, the mesh this island was generated
    /// from.
    ///
    /// Only the vertices referenced by the island are kept. Triangle ids are preserved.
    pub fn to_mesh(&self, mesh: &TriangleMesh) -> TriangleMesh {
        let mut new_vtx_index = vec![u32::MAX; mesh.vertices().len()];
        let mut vertices = Vec::new();
        let mut indices = Vec::with_capacity(self.triangles.len());

        for tri in &self.triangles {
            let idx = mesh.indices()[*tri as usize].map(|id| {
                if new_vtx_index[id as usize] == u32::MAX {
                    vertices.push(mesh.vertices()[id as usize]);
                    new_vtx_index[id as usize] = vertices.len() as u32 - 1;
                }

                new_vtx_index[id as usize]
            });
            indices.push(idx);
        }

        let ids = mesh.ids().map(|ids| {
            self.triangles
                .iter()
                .map(|tri| ids[*tri as usize])
                .collect()
        });

        TriangleMesh::from_raw_parts(vertices, indices, ids)
    }

    fn is_flat(&self, vertices: &[Point<Real>], indices: &[[u32; 3]]) -> bool {
        let corners = || {
            self.triangles
                .iter()
                .flat_map(|tri| indices[*tri as usize])
                .map(|id| &vertices[id as usize])
        };

        let tolerance = Aabb::from_points(corners()).diagonal_length() * COPLANARITY_TOLERANCE;
        let plane = self.triangles.iter().find_map(|tri| {
            let [a, b, c] = indices[*tri as usize].map(|id| vertices[id as usize]);
            Plane::from_triangle(&a, &b, &c)
        });

        match plane {
            Some(plane) => corners().all(|pt| plane.signed_distance(pt).abs() <= tolerance),
            None => true,
        }
    }
}

/// Computes the islands of a triangle mesh: its maximal sets of triangles connected through
/// shared edges.
///
/// Triangles sharing only a vertex end up in different islands. Non-manifold edges, shared by
/// more than two triangles, connect all of them.
#[derive(Clone, Debug, Default)]
pub struct IslandGenerator {
    islands: Vec<Island>,
}

impl IslandGenerator {
    /// An island generator without any island.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the islands of the triangles `indices`, replacing the previous islands.
    ///
    /// Islands are numbered by their smallest triangle index. Each triangle belongs to exactly
    /// one island.
    pub fn generate(&mut self, indices: &[[u32; 3]]) -> &[Island] {
        self.islands.clear();

        // Edge buckets, each entry storing its exact edge to resolve collisions.
        let mut edges: HashMap<u32, Vec<(EdgeKey, u32)>> = HashMap::default();

        for (itri, idx) in indices.iter().enumerate() {
            for i in 0..3 {
                let key = EdgeKey::new(idx[i], idx[(i + 1) % 3]);
                edges
                    .entry(key.bucket())
                    .or_default()
                    .push((key, itri as u32));
            }
        }

        let mut consumed = vec![false; indices.len()];
        let mut queue = VecDeque::new();

        for start in 0..indices.len() {
            if consumed[start] {
                continue;
            }

            let mut island = Island::default();
            consumed[start] = true;
            queue.push_back(start as u32);

            while let Some(tri) = queue.pop_front() {
                island.triangles.push(tri);
                let idx = indices[tri as usize];

                for i in 0..3 {
                    let key = EdgeKey::new(idx[i], idx[(i + 1) % 3]);
                    let Some(bucket) = edges.get_mut(&key.bucket()) else {
                        continue;
                    };

                    // The edge is consumed: every triangle sharing it joins the island now.
                    bucket.retain(|(other_key, other_tri)| {
                        if *other_key != key {
                            return true;
                        }

                        if !consumed[*other_tri as usize] {
                            consumed[*other_tri as usize] = true;
                            queue.push_back(*other_tri);
                        }

                        false
                    });
                }
            }

            island.triangles.sort_unstable();
            self.islands.push(island);
        }

        log::debug!(
            "Found {} islands among {} triangles.",
            self.islands.len(),
            indices.len()
        );

        &self.islands
    }

    /// The islands computed by the last call to [`IslandGenerator::generate`].
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// The `i`-th island, if it exists.
    pub fn island(&self, i: usize) -> Option<&Island> {
        self.islands.get(i)
    }

    /// The number of islands.
    pub fn num_islands(&self) -> usize {
        self.islands.len()
    }

    /// Merges every flat island, i.e., whose triangles all lie on a single plane, into a single
    /// island.
    ///
    /// The merged island replaces the first flat island. Returns the number of islands removed
    /// by the merge.
    pub fn merge_coplanar_islands(
        &mut self,
        vertices: &[Point<Real>],
        indices: &[[u32; 3]],
    ) -> usize {
        let mut merged: Option<usize> = None;
        let mut num_merged = 0;
        let mut i = 0;

        while i < self.islands.len() {
            if !self.islands[i].is_flat(vertices, indices) {
                i += 1;
                continue;
            }

            match merged {
                None => {
                    merged = Some(i);
                    i += 1;
                }
                Some(target) => {
                    let island = self.islands.remove(i);
                    self.islands[target].triangles.extend(island.triangles);
                    num_merged += 1;
                }
            }
        }

        if let Some(target) = merged {
            self.islands[target].triangles.sort_unstable();
        }

        if num_merged > 0 {
            log::debug!("Merged {} flat islands.", num_merged + 1);
        }

        num_merged
    }

    /// Merges islands touching each other.
    ///
    /// Islands are never merged by this operation: it always returns `0`.
    pub fn merge_touching_islands(
        &mut self,
        _vertices: &[Point<Real>],
        _indices: &[[u32; 3]],
    ) -> usize {
        0
    }
}
