use crate::math::{Point, Real};
use crate::utils::hashmap::HashMap;
use smallvec::SmallVec;

/// The default distance under which two vertices are considered identical.
pub const DEFAULT_WELD_EPSILON: Real = 1.0e-4;

type CellKey = [i64; 3];

/// Deduplicates vertex positions into a growing, indexable vertex buffer.
///
/// Two positions are welded together if they differ by at most the welder's granularity along
/// every axis. Lookups go through a uniform hash grid with cells as wide as the granularity,
/// so only the 27 cells around a query need to be inspected.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use cleave3d::math::Point;
/// use cleave3d::utils::VertexWelder;
///
/// let mut welder = VertexWelder::new(1.0e-3);
/// assert_eq!(welder.get_index(Point::new(1.0, 2.0, 3.0)), (0, true));
/// assert_eq!(welder.get_index(Point::new(1.0005, 2.0, 3.0)), (0, false));
/// assert_eq!(welder.get_index(Point::new(1.1, 2.0, 3.0)), (1, true));
/// assert_eq!(welder.len(), 2);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct VertexWelder {
    granularity: Real,
    cell_width: Real,
    vertices: Vec<Point<Real>>,
    grid: HashMap<CellKey, SmallVec<[u32; 4]>>,
}

impl Default for VertexWelder {
    fn default() -> Self {
        Self::new(DEFAULT_WELD_EPSILON)
    }
}

impl VertexWelder {
    /// Creates an empty welder merging positions closer than `granularity` along every axis.
    ///
    /// A non-positive (or NaN) granularity only welds bit-identical positions.
    pub fn new(granularity: Real) -> Self {
        let granularity = if granularity > 0.0 { granularity } else { 0.0 };
        let cell_width = if granularity > 0.0 { granularity } else { 1.0 };

        Self {
            granularity,
            cell_width,
            vertices: Vec::new(),
            grid: HashMap::default(),
        }
    }

    /// The distance under which two positions are welded.
    pub fn granularity(&self) -> Real {
        self.granularity
    }

    /// Returns the index of `position` in the vertex buffer.
    ///
    /// If a previously inserted vertex lies within the granularity of `position`, its index is
    /// returned along with `false`. Otherwise `position` is appended and its new index is
    /// returned along with `true`. When several stored vertices match, the smallest index wins.
    pub fn get_index(&mut self, position: Point<Real>) -> (u32, bool) {
        let cell = self.cell(&position);

        if let Some(existing) = self.find_in_neighborhood(&position, cell) {
            return (existing, false);
        }

        let id = self.vertices.len() as u32;
        self.vertices.push(position);
        self.grid.entry(cell).or_default().push(id);
        (id, true)
    }

    /// The welded vertices, in insertion order.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The number of distinct vertices stored so far.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Is this welder empty?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consumes this welder, returning its vertex buffer.
    pub fn into_vertices(self) -> Vec<Point<Real>> {
        self.vertices
    }

    /// Removes every vertex from this welder, keeping its granularity.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.grid.clear();
    }

    fn cell(&self, position: &Point<Real>) -> CellKey {
        [
            (position.x / self.cell_width).floor() as i64,
            (position.y / self.cell_width).floor() as i64,
            (position.z / self.cell_width).floor() as i64,
        ]
    }

    fn find_in_neighborhood(&self, position: &Point<Real>, cell: CellKey) -> Option<u32> {
        let mut best: Option<u32> = None;

        for i in -1..=1 {
            for j in -1..=1 {
                for k in -1..=1 {
                    let key = [
                        cell[0].saturating_add(i),
                        cell[1].saturating_add(j),
                        cell[2].saturating_add(k),
                    ];

                    let Some(bucket) = self.grid.get(&key) else {
                        continue;
                    };

                    for &id in bucket {
                        if best.is_some_and(|b| b <= id) {
                            continue;
                        }

                        let delta = self.vertices[id as usize] - position;
                        if delta.iter().all(|d| d.abs() <= self.granularity) {
                            best = Some(id);
                        }
                    }
                }
            }
        }

        best
    }
}
