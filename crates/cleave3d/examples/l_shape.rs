use cleave3d::math::Point;
use cleave3d::transformation::decomposition::{ConvexDecomposition, DecompositionParameters};

fn main() {
    // An L-shaped prism: two 2x1 slabs overlapping on a unit square.
    let outline = [
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let bottom: Vec<_> = outline.iter().map(|(x, y)| Point::new(*x, *y, 0.0)).collect();
    let top: Vec<_> = outline.iter().map(|(x, y)| Point::new(*x, *y, 1.0)).collect();

    let mut decomposition = ConvexDecomposition::new();

    for [a, b, c] in [[0, 3, 1], [1, 3, 2], [0, 5, 3], [3, 5, 4]] {
        let _ = decomposition.add_triangle(bottom[a], bottom[b], bottom[c]);
        let _ = decomposition.add_triangle(top[a], top[c], top[b]);
    }

    for i in 0..outline.len() {
        let j = (i + 1) % outline.len();
        let _ = decomposition.add_triangle(bottom[i], bottom[j], top[j]);
        let _ = decomposition.add_triangle(bottom[i], top[j], top[i]);
    }

    let params = DecompositionParameters {
        concavity_threshold_percent: 0.1,
        merge_threshold_percent: 0.0,
        ..DecompositionParameters::default()
    };
    let num_hulls = decomposition.compute_convex_decomposition(&params);
    println!("Decomposed the L-shape into {num_hulls} hulls.");

    for (i, hull) in decomposition.convex_hulls().iter().enumerate() {
        println!(
            "Hull {i}: {} vertices, {} triangles, volume {:.3}.",
            hull.vertices().len(),
            hull.num_triangles(),
            hull.volume()
        );
    }

    let num_merged = decomposition.merge_hulls(&DecompositionParameters {
        merge_threshold_percent: 100.0,
        ..params
    });
    println!(
        "After a lenient merge: {num_merged} hull(s), total volume {:.3}.",
        decomposition.total_volume()
    );
}
