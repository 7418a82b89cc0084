//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};

/// An Axis Aligned Bounding Box.
///
/// An empty box (see [`Aabb::new_invalid`]) has `mins > maxs` and grows to contain the points
/// given to [`Aabb::take_point`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with the smallest coordinates of this box.
    pub mins: Point<Real>,
    /// The point with the largest coordinates of this box.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// The vertex indices of each face of this box, counter-clockwise when seen from the outside.
    ///
    /// The vertex numbering is the one returned by [`Aabb::vertices`].
    pub const FACES_VERTEX_IDS: [[usize; 4]; 6] = [
        // +X
        [1, 2, 6, 5],
        // -X
        [0, 4, 7, 3],
        // +Y
        [2, 3, 7, 6],
        // -Y
        [0, 1, 5, 4],
        // +Z
        [4, 5, 6, 7],
        // -Z
        [0, 3, 2, 1],
    ];

    /// The outward normal of each face of [`Aabb::FACES_VERTEX_IDS`].
    pub const FACES_NORMAL_AXIS: [(usize, Real); 6] = [
        (0, 1.0),
        (0, -1.0),
        (1, 1.0),
        (1, -1.0),
        (2, 1.0),
        (2, -1.0),
    ];

    /// Creates a new Aabb.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid `Aabb` with `mins` set to `Real::MAX` and `maxs` set to `-Real::MAX`.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new `Aabb` from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the smallest `Aabb` containing every given point.
    ///
    /// Returns an invalid box if `pts` is empty.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(*pt);
        }

        result
    }

    /// Is `mins <= maxs` along every axis?
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.mins.x <= self.maxs.x && self.mins.y <= self.maxs.y && self.mins.z <= self.maxs.z
    }

    /// The center of this `Aabb`.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this `Aabb`.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The length of the diagonal of this `Aabb`.
    #[inline]
    pub fn diagonal_length(&self) -> Real {
        self.extents().norm()
    }

    /// The volume of this `Aabb`.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Returns a copy of this box enlarged by `amount` along every direction.
    #[inline]
    #[must_use]
    pub fn loosened(&self, amount: Real) -> Aabb {
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }

    /// Computes the vertices of this `Aabb`.
    ///
    /// The vertices are given in the following order, in a right-handed coordinate system:
    /// ```text
    ///    y             3 - 2
    ///    |           7 − 6 |
    ///    ___ x       |   | 1  (the zero is below 3 and on the left of 1,
    ///   /            4 - 5     hidden by the 4-5-6-7 face.)
    ///  z
    /// ```
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }

    /// Outputs this `Aabb` as a closed triangle mesh with outward-facing triangles.
    pub fn to_trimesh(&self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let vertices = self.vertices().to_vec();
        let mut indices = Vec::with_capacity(12);

        for [a, b, c, d] in Self::FACES_VERTEX_IDS {
            indices.push([a as u32, b as u32, c as u32]);
            indices.push([a as u32, c as u32, d as u32]);
        }

        (vertices, indices)
    }
}
