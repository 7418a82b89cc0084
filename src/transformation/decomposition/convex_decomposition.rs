use super::decomposer::{merge_hulls, Decomposer};
use super::{CancellationToken, DecompositionError, DecompositionParameters};
use crate::math::{Point, Real};
use crate::shape::{ConvexHull, TriangleMesh};
use crate::utils::{self, VertexWelder, DEFAULT_WELD_EPSILON};
use std::thread::{self, JoinHandle};

type DecompositionResult = Result<Vec<ConvexHull>, DecompositionError>;

/// The lifecycle of a [`ConvexDecomposition`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecompositionState {
    /// No triangle was added yet.
    Idle,
    /// Triangles were added, and no decomposition is running.
    Configured,
    /// A decomposition is running on a background thread.
    Running,
    /// The last decomposition completed: its hulls are available.
    Complete,
    /// The last decomposition was cancelled. [`ConvexDecomposition::reset`] must be called
    /// before anything else.
    Cancelled,
}

/// Approximate convex decomposition of a triangle mesh.
///
/// The mesh is first given triangle by triangle with [`ConvexDecomposition::add_triangle`],
/// which welds the vertices closer than the weld epsilon. The decomposition then proceeds in
/// two phases:
/// 1. The mesh is recursively split in two by the plane cutting its hull through its longest
///    side. A piece is kept as is once it is close enough to its convex hull, or when the
///    split thresholds of [`DecompositionParameters`] stop the recursion.
/// 2. Pairs of hulls are greedily replaced by the hull of their union whenever this does not
///    increase the total volume too much.
///
/// The decomposition can run on a background thread, see
/// [`DecompositionParameters::use_background_thread`]. The thread works on its own copy of the
/// mesh, and its hulls are only published once it has completed.
pub struct ConvexDecomposition {
    welder: VertexWelder,
    indices: Vec<[u32; 3]>,
    hulls: Vec<ConvexHull>,
    state: DecompositionState,
    cancel: CancellationToken,
    task: Option<JoinHandle<DecompositionResult>>,
}

impl Default for ConvexDecomposition {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvexDecomposition {
    /// A new decomposition welding vertices closer than [`DEFAULT_WELD_EPSILON`].
    pub fn new() -> Self {
        Self::with_weld_epsilon(DEFAULT_WELD_EPSILON)
    }

    /// A new decomposition welding vertices closer than `weld_epsilon` along every axis.
    pub fn with_weld_epsilon(weld_epsilon: Real) -> Self {
        Self {
            welder: VertexWelder::new(weld_epsilon),
            indices: Vec::new(),
            hulls: Vec::new(),
            state: DecompositionState::Idle,
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// The current state of this decomposition.
    pub fn state(&self) -> DecompositionState {
        self.state
    }

    /// Adds a triangle to the mesh to decompose.
    ///
    /// Returns `false`, and leaves the mesh unchanged, if two vertices of the triangle are
    /// welded together, or if a decomposition is running or was cancelled.
    pub fn add_triangle(&mut self, p0: Point<Real>, p1: Point<Real>, p2: Point<Real>) -> bool {
        if matches!(
            self.state,
            DecompositionState::Running | DecompositionState::Cancelled
        ) {
            log::warn!(
                "Cannot add a triangle to a convex decomposition in the {:?} state.",
                self.state
            );
            return false;
        }

        let idx = [
            self.welder.get_index(p0).0,
            self.welder.get_index(p1).0,
            self.welder.get_index(p2).0,
        ];

        if idx[0] == idx[1] || idx[1] == idx[2] || idx[2] == idx[0] {
            log::debug!("Ignoring degenerate triangle {:?}.", [p0, p1, p2]);
            return false;
        }

        self.indices.push(idx);
        self.state = DecompositionState::Configured;
        true
    }

    /// The number of triangles of the mesh to decompose.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Computes the convex decomposition of the triangles added so far.
    ///
    /// If the decomposition runs on the current thread, returns the number of hulls computed.
    /// If it runs on a background thread, returns `0` immediately: use
    /// [`ConvexDecomposition::is_compute_complete`] to poll its completion. Errors are logged
    /// and yield `0`; use [`ConvexDecomposition::try_compute_convex_decomposition`] to observe
    /// them.
    pub fn compute_convex_decomposition(&mut self, params: &DecompositionParameters) -> usize {
        match self.try_compute_convex_decomposition(params) {
            Ok(num_hulls) => num_hulls,
            Err(err) => {
                log::warn!("Convex decomposition failed: {err}");
                0
            }
        }
    }

    /// Computes the convex decomposition of the triangles added so far.
    ///
    /// See [`ConvexDecomposition::compute_convex_decomposition`].
    pub fn try_compute_convex_decomposition(
        &mut self,
        params: &DecompositionParameters,
    ) -> Result<usize, DecompositionError> {
        match self.state {
            DecompositionState::Running => return Err(DecompositionError::AlreadyRunning),
            DecompositionState::Cancelled => return Err(DecompositionError::NeedsReset),
            _ => {}
        }

        if params.use_islands_every_split {
            return Err(DecompositionError::UnsupportedIslandsEverySplit);
        }

        if self.indices.is_empty() {
            return Err(DecompositionError::EmptyMesh);
        }

        self.hulls.clear();
        self.cancel = CancellationToken::new();
        self.state = DecompositionState::Running;

        let mesh = self.mesh_snapshot();
        let mut decomposer = Decomposer::new(*params, self.cancel.clone());

        if params.use_background_thread {
            self.task = Some(thread::spawn(move || decomposer.run(&mesh)));
            Ok(0)
        } else {
            let result = decomposer.run(&mesh);
            self.publish(result)
        }
    }

    /// Copies the triangles added so far, without the vertices of rejected triangles.
    fn mesh_snapshot(&self) -> TriangleMesh {
        let mut vertices = self.welder.vertices().to_vec();
        let mut indices = self.indices.clone();
        utils::remove_unused_points(&mut vertices, &mut indices);
        TriangleMesh::from_raw_parts(vertices, indices, None)
    }

    fn publish(&mut self, result: DecompositionResult) -> Result<usize, DecompositionError> {
        match result {
            Ok(mut hulls) => {
                hulls.retain(|hull| !hull.is_empty());
                log::debug!("Convex decomposition completed with {} hulls.", hulls.len());
                self.hulls = hulls;
                self.state = DecompositionState::Complete;
                Ok(self.hulls.len())
            }
            Err(DecompositionError::Cancelled) => {
                self.hulls.clear();
                self.state = DecompositionState::Cancelled;
                Err(DecompositionError::Cancelled)
            }
            Err(err) => {
                self.hulls.clear();
                self.state = DecompositionState::Configured;
                Err(err)
            }
        }
    }

    fn join_task(&mut self) {
        if let Some(task) = self.task.take() {
            let result = task
                .join()
                .unwrap_or(Err(DecompositionError::TaskPanicked));

            if let Err(err) = self.publish(result) {
                log::debug!("Background convex decomposition ended with: {err}");
            }
        }
    }

    /// Is the last decomposition over?
    ///
    /// Returns `true` once the decomposition completed or was cancelled. If it ran on a
    /// background thread, this publishes its result.
    pub fn is_compute_complete(&mut self) -> bool {
        if self.task.as_ref().is_some_and(|task| task.is_finished()) {
            self.join_task();
        }

        matches!(
            self.state,
            DecompositionState::Complete | DecompositionState::Cancelled
        )
    }

    /// Blocks until the running decomposition is over, and publishes its result.
    ///
    /// Returns `true` if the decomposition completed or was cancelled.
    pub fn wait(&mut self) -> bool {
        self.join_task();
        self.is_compute_complete()
    }

    /// Requests the cancellation of the running decomposition.
    ///
    /// The decomposition stops at its next checkpoint, and its hulls are discarded. Returns
    /// `false` if no decomposition is running.
    pub fn cancel_compute(&self) -> bool {
        if self.state == DecompositionState::Running {
            self.cancel.cancel();
            true
        } else {
            false
        }
    }

    /// The token cancelling the running decomposition.
    ///
    /// This is useful to cancel a decomposition running on the current thread from another one.
    /// A new token is created each time a decomposition starts.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Removes every triangle and hull, stopping the running decomposition first.
    pub fn reset(&mut self) {
        if self.task.is_some() {
            self.cancel.cancel();
            self.join_task();
        }

        self.welder.clear();
        self.indices.clear();
        self.hulls.clear();
        self.cancel = CancellationToken::new();
        self.state = DecompositionState::Idle;
    }

    /// Merges the hulls of the completed decomposition again, with new parameters.
    ///
    /// Only [`DecompositionParameters::merge_threshold_percent`] and
    /// [`DecompositionParameters::max_hull_vertices`] are used. Returns the new number of hulls.
    pub fn merge_hulls(&mut self, params: &DecompositionParameters) -> usize {
        if self.state != DecompositionState::Complete {
            log::warn!(
                "Cannot merge the hulls of a convex decomposition in the {:?} state.",
                self.state
            );
            return 0;
        }

        let hulls = std::mem::take(&mut self.hulls);
        let cancel = CancellationToken::new();

        match merge_hulls(hulls, params, &cancel) {
            Ok(mut hulls) => {
                hulls.retain(|hull| !hull.is_empty());
                self.hulls = hulls;
            }
            Err(err) => log::warn!("Hull merge failed: {err}"),
        }

        self.hulls.len()
    }

    /// The number of hulls of the completed decomposition.
    pub fn hull_count(&self) -> usize {
        self.hulls.len()
    }

    /// The `i`-th hull of the completed decomposition.
    pub fn convex_hull_result(&self, i: usize) -> Option<&ConvexHull> {
        self.hulls.get(i)
    }

    /// The hulls of the completed decomposition.
    pub fn convex_hulls(&self) -> &[ConvexHull] {
        &self.hulls
    }

    /// The sum of the volumes of the hulls of the completed decomposition.
    pub fn total_volume(&self) -> Real {
        self.hulls.iter().map(|hull| hull.volume()).sum()
    }
}

impl Drop for ConvexDecomposition {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.cancel.cancel();
            let _ = task.join();
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ConvexDecomposition, DecompositionState};
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real};
    use crate::transformation::decomposition::{DecompositionError, DecompositionParameters};

    fn add_box(decomposition: &mut ConvexDecomposition, aabb: &Aabb) {
        let (vertices, indices) = aabb.to_trimesh();

        for idx in indices {
            assert!(decomposition.add_triangle(
                vertices[idx[0] as usize],
                vertices[idx[1] as usize],
                vertices[idx[2] as usize],
            ));
        }
    }

    #[test]
    fn degenerate_triangles_are_rejected() {
        let mut decomposition = ConvexDecomposition::new();
        let a = Point::origin();
        let b = Point::new(1.0, 0.0, 0.0);

        assert!(!decomposition.add_triangle(a, b, Point::new(1.0, 0.0, 0.00001)));
        assert_eq!(decomposition.num_triangles(), 0);
        assert_eq!(decomposition.state(), DecompositionState::Idle);
        assert_eq!(
            decomposition.try_compute_convex_decomposition(&DecompositionParameters::default()),
            Err(DecompositionError::EmptyMesh)
        );
    }

    #[test]
    fn disjoint_boxes_yield_one_hull_each() {
        let mut decomposition = ConvexDecomposition::new();
        add_box(&mut decomposition, &Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0)));
        add_box(
            &mut decomposition,
            &Aabb::new(Point::new(5.0, 0.0, 0.0), Point::new(6.0, 2.0, 1.0)),
        );

        let params = DecompositionParameters::default();
        assert_eq!(decomposition.compute_convex_decomposition(&params), 2);
        assert_eq!(decomposition.state(), DecompositionState::Complete);
        assert_relative_eq!(decomposition.total_volume(), 3.0, epsilon = 1.0e-4);
        assert!(decomposition.convex_hull_result(2).is_none());
    }

    #[test]
    fn islands_every_split_is_unsupported() {
        let mut decomposition = ConvexDecomposition::new();
        add_box(&mut decomposition, &Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0)));

        let params = DecompositionParameters {
            use_islands_every_split: true,
            ..DecompositionParameters::default()
        };
        assert_eq!(
            decomposition.try_compute_convex_decomposition(&params),
            Err(DecompositionError::UnsupportedIslandsEverySplit)
        );
        assert_eq!(decomposition.state(), DecompositionState::Configured);
    }

    fn add_sphere(decomposition: &mut ConvexDecomposition, stacks: usize, slices: usize) {
        let vertex = |i: usize, j: usize| {
            let theta = i as Real * std::f64::consts::PI as Real / stacks as Real;
            let phi = j as Real * 2.0 * std::f64::consts::PI as Real / slices as Real;
            Point::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
        };

        for i in 0..stacks {
            for j in 0..slices {
                let (a, b) = (vertex(i, j), vertex(i + 1, j));
                let (c, d) = (vertex(i + 1, j + 1), vertex(i, j + 1));

                if i + 1 < stacks {
                    let _ = decomposition.add_triangle(a, b, c);
                }

                if i > 0 {
                    let _ = decomposition.add_triangle(a, c, d);
                }
            }
        }
    }

    #[test]
    fn cancelled_decomposition_must_be_reset() {
        let mut decomposition = ConvexDecomposition::new();
        add_sphere(&mut decomposition, 60, 120);

        let params = DecompositionParameters {
            use_background_thread: true,
            ..DecompositionParameters::default()
        };
        assert_eq!(decomposition.try_compute_convex_decomposition(&params), Ok(0));
        assert!(decomposition.cancel_compute());
        assert_eq!(
            decomposition.try_compute_convex_decomposition(&params),
            Err(DecompositionError::AlreadyRunning)
        );
        assert!(!decomposition.add_triangle(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0)
        ));

        assert!(decomposition.wait());
        assert_eq!(decomposition.state(), DecompositionState::Cancelled);
        assert_eq!(decomposition.hull_count(), 0);
        assert_eq!(
            decomposition.try_compute_convex_decomposition(&params),
            Err(DecompositionError::NeedsReset)
        );

        decomposition.reset();
        assert_eq!(decomposition.state(), DecompositionState::Idle);
        assert_eq!(decomposition.hull_count(), 0);
        assert_eq!(decomposition.num_triangles(), 0);
    }
}
