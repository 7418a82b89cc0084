//! Export of convex hulls as Wavefront (`.obj`) files.

use crate::shape::ConvexHull;
use crate::transformation::decomposition::ConvexDecomposition;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

fn hulls_to_obj<'a>(hulls: impl IntoIterator<Item = &'a ConvexHull>) -> ObjData {
    let mut position = Vec::new();
    let mut objects = Vec::new();

    for (i, hull) in hulls.into_iter().enumerate() {
        let base = position.len();

        #[allow(clippy::unnecessary_cast)]
        position.extend(
            hull.vertices()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32]),
        );

        let polys = hull
            .indices()
            .iter()
            .map(|tri| {
                SimplePolygon(
                    tri.iter()
                        .map(|id| IndexTuple(base + *id as usize, None, None))
                        .collect(),
                )
            })
            .collect();

        objects.push(Object {
            name: format!("hull{i}"),
            groups: vec![Group {
                name: String::new(),
                index: 0,
                material: None,
                polys,
            }],
        });
    }

    ObjData {
        position,
        objects,
        ..Default::default()
    }
}

fn write_obj(data: &ObjData, path: &Path) -> Result<(), ObjError> {
    let mut file = std::fs::File::create(path)?;
    data.write_to_buf(&mut file)
}

impl ConvexHull {
    /// Outputs this hull as a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        write_obj(&hulls_to_obj([self]), path.as_ref())
    }
}

impl ConvexDecomposition {
    /// Outputs the hulls of this decomposition as a Wavefront (`.obj`) file at the given path,
    /// one object per hull.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        write_obj(&hulls_to_obj(self.convex_hulls()), path.as_ref())
    }
}
