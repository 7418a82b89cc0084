use crate::math::{Matrix, Point, Real, UnitVector, Vector, DIM};

/// An oriented box fitted to a point cloud.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrientedBox {
    /// The center of the box, in world-space.
    pub center: Point<Real>,
    /// The orthonormal axes of the box, stored as the matrix columns.
    pub axes: Matrix<Real>,
    /// The half-length of the box along each of its axes.
    pub half_extents: Vector<Real>,
}

impl OrientedBox {
    /// The index of the axis along which this box is the longest.
    pub fn longest_axis_id(&self) -> usize {
        self.half_extents.imax()
    }

    /// The unit direction of the longest side of this box.
    pub fn longest_axis(&self) -> UnitVector<Real> {
        UnitVector::new_normalize(self.axes.column(self.longest_axis_id()).into_owned())
    }
}

/// Computes an oriented bounding box for the given set of points.
///
/// The axes are the principal directions of the covariance matrix of the points. The returned
/// box is not guaranteed to be the smallest enclosing box, though it is a pretty good one for
/// choosing a splitting direction.
pub fn obb(pts: &[Point<Real>]) -> OrientedBox {
    let cov = crate::utils::covariance(pts);
    let mut eigv = cov.symmetric_eigen().eigenvectors;

    if eigv.determinant() < 0.0 {
        eigv = -eigv;
    }

    let mut mins = Vector::repeat(Real::MAX);
    let mut maxs = Vector::repeat(-Real::MAX);

    for pt in pts {
        for i in 0..DIM {
            let dot = eigv.column(i).dot(&pt.coords);
            mins[i] = mins[i].min(dot);
            maxs[i] = maxs[i].max(dot);
        }
    }

    if pts.is_empty() {
        mins = Vector::zeros();
        maxs = Vector::zeros();
    }

    let local_center = (maxs + mins) / 2.0;

    OrientedBox {
        center: Point::from(eigv * local_center),
        axes: eigv,
        half_extents: (maxs - mins) / 2.0,
    }
}

#[cfg(test)]
mod test {
    use super::obb;
    use crate::math::{Point, Real};

    #[test]
    fn obb_of_elongated_cloud_follows_its_long_side() {
        let mut pts = Vec::new();
        for i in 0..=10 {
            let x = i as Real * 0.5;
            for (y, z) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
                pts.push(Point::new(x, y, z));
            }
        }

        let obb = obb(&pts);
        let axis = obb.longest_axis();

        assert_relative_eq!(axis.x.abs(), 1.0, epsilon = 1.0e-4);
        assert_relative_eq!(obb.center, Point::new(2.5, 0.5, 0.5), epsilon = 1.0e-4);
        assert_relative_eq!(obb.half_extents[obb.longest_axis_id()], 2.5, epsilon = 1.0e-4);
    }
}
