use crate::math::Real;
use crate::utils::DEFAULT_WELD_EPSILON;

/// Parameters controlling a convex decomposition.
///
/// The thresholds expressed in percents are ratios of volumes: they do not depend on the scale
/// of the decomposed mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecompositionParameters {
    /// The distance by which each output hull is inflated, with its sharp edges beveled.
    ///
    /// Default: `0.0`
    pub skin_width: Real,
    /// The maximum recursion depth of the split phase.
    ///
    /// A piece reaching this depth is never split again, and is not separated into islands
    /// either: a depth of `0` yields a single hull enclosing the whole mesh.
    ///
    /// Default: `8`
    pub max_depth: u32,
    /// The maximum number of vertices of each hull.
    ///
    /// A hull limited by this budget is scaled up until it encloses its whole piece.
    ///
    /// Default: `64`
    pub max_hull_vertices: usize,
    /// The minimum concavity of a piece, in percents of the volume of its hull, for it to be
    /// split.
    ///
    /// Default: `0.1`
    pub concavity_threshold_percent: Real,
    /// The maximum volume increase, in percents of the sum of the merged volumes, allowed when
    /// replacing two hulls by the hull of their union.
    ///
    /// Default: `30.0`
    pub merge_threshold_percent: Real,
    /// The minimum volume of the hull of a piece, in percents of the volume of the hull of the
    /// whole mesh, for it to be split.
    ///
    /// Default: `0.1`
    pub volume_split_threshold_percent: Real,
    /// Decompose each connected component of the mesh independently.
    ///
    /// Components lying on a common plane are grouped together.
    ///
    /// Default: `true`
    pub use_initial_islands: bool,
    /// Recompute the connected components after every split.
    ///
    /// Not supported: a decomposition started with this flag set fails with
    /// [`DecompositionError::UnsupportedIslandsEverySplit`](super::DecompositionError::UnsupportedIslandsEverySplit).
    ///
    /// Default: `false`
    pub use_islands_every_split: bool,
    /// Run the decomposition on a background thread.
    ///
    /// The computation then returns immediately, and its completion must be polled with
    /// [`ConvexDecomposition::is_compute_complete`](super::ConvexDecomposition::is_compute_complete).
    ///
    /// Default: `false`
    pub use_background_thread: bool,
    /// The distance under which two points of a piece are merged before computing its hull.
    ///
    /// Default: `1.0e-4`
    pub weld_epsilon: Real,
    /// The distance under which a vertex is considered to lie on a splitting plane.
    ///
    /// Default: `1.0e-6`
    pub split_precision: Real,
}

impl Default for DecompositionParameters {
    fn default() -> Self {
        Self {
            skin_width: 0.0,
            max_depth: 8,
            max_hull_vertices: 64,
            concavity_threshold_percent: 0.1,
            merge_threshold_percent: 30.0,
            volume_split_threshold_percent: 0.1,
            use_initial_islands: true,
            use_islands_every_split: false,
            use_background_thread: false,
            weld_epsilon: DEFAULT_WELD_EPSILON,
            split_precision: 1.0e-6,
        }
    }
}
