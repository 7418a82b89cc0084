use crate::common::{append, cuboid, feed, l_prism, uv_sphere};
use cleave3d::utils;
use cleave3d::transformation::decomposition::{
    ConvexDecomposition, DecompositionError, DecompositionParameters, DecompositionState,
};

fn splitting_params() -> DecompositionParameters {
    DecompositionParameters {
        concavity_threshold_percent: 0.1,
        volume_split_threshold_percent: 0.1,
        merge_threshold_percent: 0.0,
        ..DecompositionParameters::default()
    }
}

#[test]
fn cube_is_its_own_decomposition() {
    let mut decomposition = ConvexDecomposition::new();
    feed(&mut decomposition, &cuboid([0.0; 3], [1.0; 3]));

    let num_hulls = decomposition.compute_convex_decomposition(&DecompositionParameters::default());
    assert_eq!(num_hulls, 1);
    assert_eq!(decomposition.state(), DecompositionState::Complete);
    assert!(decomposition.is_compute_complete());

    let hull = decomposition.convex_hull_result(0).unwrap();
    assert_eq!(hull.vertices().len(), 8);
    assert_eq!(hull.num_triangles(), 12);
    assert!((hull.volume() - 1.0).abs() < 1.0e-5);
    assert!(decomposition.convex_hull_result(1).is_none());
}

#[test]
fn l_prism_is_split_then_merged_back() {
    let mut decomposition = ConvexDecomposition::new();
    feed(&mut decomposition, &l_prism());

    let num_hulls = decomposition.compute_convex_decomposition(&splitting_params());
    assert!(num_hulls > 1);
    // The hulls cover the whole prism.
    assert!(decomposition.total_volume() >= 3.0 - 1.0e-3);

    let lenient = DecompositionParameters {
        merge_threshold_percent: 100.0,
        ..splitting_params()
    };
    assert_eq!(decomposition.merge_hulls(&lenient), 1);
    assert!((decomposition.total_volume() - 3.5).abs() < 1.0e-3);
}

#[test]
fn synchronous_decomposition_is_deterministic() {
    let mut decomposition = ConvexDecomposition::new();
    feed(&mut decomposition, &l_prism());

    let params = splitting_params();
    let first = decomposition.compute_convex_decomposition(&params);
    let first_hulls = decomposition.convex_hulls().to_vec();

    // Completed decompositions can be computed again.
    let second = decomposition.compute_convex_decomposition(&params);
    assert_eq!(first, second);
    assert_eq!(first_hulls.as_slice(), decomposition.convex_hulls());
}

#[test]
fn background_decomposition_matches_synchronous_one() {
    let mut mesh = l_prism();
    append(&mut mesh, cuboid([5.0, 0.0, 0.0], [6.0, 1.0, 1.0]));

    let mut sync = ConvexDecomposition::new();
    feed(&mut sync, &mesh);
    let expected = sync.compute_convex_decomposition(&splitting_params());

    let mut background = ConvexDecomposition::new();
    feed(&mut background, &mesh);
    let params = DecompositionParameters {
        use_background_thread: true,
        ..splitting_params()
    };
    assert_eq!(background.compute_convex_decomposition(&params), 0);
    assert_eq!(
        background.try_compute_convex_decomposition(&params),
        Err(DecompositionError::AlreadyRunning)
    );
    assert!(background.wait());

    assert_eq!(background.state(), DecompositionState::Complete);
    assert_eq!(background.hull_count(), expected);
    assert_eq!(background.convex_hulls(), sync.convex_hulls());
}

#[test]
fn hulls_cover_a_mesh_with_many_extreme_points() {
    let sphere = uv_sphere(12, 24);
    let volume = utils::mesh_volume(&sphere.0, &sphere.1);
    assert!(sphere.0.len() > 64);

    let mut decomposition = ConvexDecomposition::new();
    feed(&mut decomposition, &sphere);
    assert!(decomposition.compute_convex_decomposition(&DecompositionParameters::default()) > 0);

    assert!(
        decomposition.total_volume() >= volume - 1.0e-3,
        "{} < {volume}",
        decomposition.total_volume()
    );
    assert!(decomposition
        .convex_hulls()
        .iter()
        .all(|hull| hull.vertices().len() <= 64));
}

#[test]
fn cancelled_decomposition_is_reset() {
    let mut decomposition = ConvexDecomposition::new();
    feed(&mut decomposition, &uv_sphere(60, 120));

    let params = DecompositionParameters {
        use_background_thread: true,
        ..DecompositionParameters::default()
    };
    assert_eq!(decomposition.compute_convex_decomposition(&params), 0);
    assert!(decomposition.cancel_compute());

    while !decomposition.is_compute_complete() {
        std::thread::yield_now();
    }

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
    assert!(!decomposition.cancel_compute());
}

#[test]
fn token_cancels_synchronous_decomposition() {
    let mut decomposition = ConvexDecomposition::new();
    feed(&mut decomposition, &l_prism());

    let token = decomposition.cancellation_token();
    token.cancel();

    // Each run gets a fresh token, so cancelling an old one has no effect.
    let num_hulls = decomposition.compute_convex_decomposition(&splitting_params());
    assert!(num_hulls > 1);
    assert!(!decomposition.cancellation_token().is_cancelled());
}

#[test]
fn empty_decomposition_fails() {
    let mut decomposition = ConvexDecomposition::default();
    assert_eq!(
        decomposition.try_compute_convex_decomposition(&DecompositionParameters::default()),
        Err(DecompositionError::EmptyMesh)
    );
    assert_eq!(decomposition.state(), DecompositionState::Idle);
    assert_eq!(decomposition.merge_hulls(&DecompositionParameters::default()), 0);
}

#[test]
fn skin_width_inflates_hulls() {
    let mut decomposition = ConvexDecomposition::new();
    feed(&mut decomposition, &cuboid([0.0; 3], [1.0; 3]));

    let params = DecompositionParameters {
        skin_width: 0.1,
        ..DecompositionParameters::default()
    };
    assert_eq!(decomposition.compute_convex_decomposition(&params), 1);
    assert!(decomposition.total_volume() > 1.2);

    let aabb = decomposition.convex_hulls()[0].aabb();
    assert!((aabb.mins.x + 0.1).abs() < 1.0e-3);
    assert!((aabb.maxs.z - 1.1).abs() < 1.0e-3);
}
