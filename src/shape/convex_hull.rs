use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::utils;

/// A convex hull produced by a convex decomposition.
///
/// The triangles are oriented counter-clockwise when seen from the outside of the hull.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexHull {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    volume: Real,
    #[cfg_attr(feature = "serde-serialize", serde(skip))]
    pub(crate) tested: bool,
}

impl ConvexHull {
    /// Wraps the vertex and index buffers of a convex polyhedron, and computes its volume.
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Self {
        let volume = utils::mesh_volume(&vertices, &indices);
        Self {
            vertices,
            indices,
            volume,
            tested: false,
        }
    }

    /// The vertices of this hull.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The triangles of this hull, as indices into [`Self::vertices`].
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The volume enclosed by this hull.
    #[inline]
    pub fn volume(&self) -> Real {
        self.volume
    }

    /// The number of triangles of this hull.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Does this hull have no triangle?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The axis-aligned bounding box of this hull.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// Consumes this hull, returning its vertex and index buffers.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        (self.vertices, self.indices)
    }
}
