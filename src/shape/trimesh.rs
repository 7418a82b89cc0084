use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Triangle;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleMeshError {
    /// A triangle references the same vertex more than once.
    #[error("Triangle {0} references the same vertex more than once.")]
    DegenerateTriangle(usize),
    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references the vertex {vertex} which does not exist.")]
    IndexOutOfBounds {
        /// The index of the faulty triangle.
        triangle: usize,
        /// The out-of-bounds vertex index.
        vertex: u32,
    },
    /// The number of per-triangle ids does not match the number of triangles.
    #[error("Found {ids} triangle ids for {triangles} triangles.")]
    IdCountMismatch {
        /// The number of triangles.
        triangles: usize,
        /// The number of ids.
        ids: usize,
    },
}

/// An indexed triangle mesh, optionally carrying one opaque id per triangle.
///
/// The ids are not interpreted by this crate: they are only carried along when the mesh is
/// split or partitioned, so every fragment of a triangle keeps the id of its source.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    ids: Option<Vec<u32>>,
}

impl TriangleMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    ///
    /// Fails if a triangle references a missing vertex, or the same vertex twice.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriangleMeshError> {
        for (i, tri) in indices.iter().enumerate() {
            if let Some(vertex) = tri.iter().find(|id| **id as usize >= vertices.len()) {
                return Err(TriangleMeshError::IndexOutOfBounds {
                    triangle: i,
                    vertex: *vertex,
                });
            }

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
                return Err(TriangleMeshError::DegenerateTriangle(i));
            }
        }

        Ok(Self {
            vertices,
            indices,
            ids: None,
        })
    }

    /// Creates a new triangle mesh where the i-th triangle is tagged with `ids[i]`.
    pub fn with_ids(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
        ids: Vec<u32>,
    ) -> Result<Self, TriangleMeshError> {
        if ids.len() != indices.len() {
            return Err(TriangleMeshError::IdCountMismatch {
                triangles: indices.len(),
                ids: ids.len(),
            });
        }

        let mut result = Self::new(vertices, indices)?;
        result.ids = Some(ids);
        Ok(result)
    }

    /// Builds a mesh from buffers already known to be valid.
    pub(crate) fn from_raw_parts(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
        ids: Option<Vec<u32>>,
    ) -> Self {
        debug_assert!(ids.as_ref().map(|ids| ids.len() == indices.len()) != Some(false));
        Self {
            vertices,
            indices,
            ids,
        }
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The per-triangle ids of this mesh, if any.
    #[inline]
    pub fn ids(&self) -> Option<&[u32]> {
        self.ids.as_deref()
    }

    /// The id of the i-th triangle, if this mesh carries ids.
    #[inline]
    pub fn triangle_id(&self, i: usize) -> Option<u32> {
        self.ids.as_ref().map(|ids| ids[i])
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Does this mesh contain no triangle?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get the `i`-th triangle of this mesh.
    #[inline]
    pub fn triangle(&self, i: usize) -> Triangle {
        let idx = self.indices[i];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len()).map(move |i| self.triangle(i))
    }

    /// The axis-aligned bounding box of the vertices of this mesh.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// Consumes this mesh, returning its vertex, index, and id buffers.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<[u32; 3]>, Option<Vec<u32>>) {
        (self.vertices, self.indices, self.ids)
    }
}
