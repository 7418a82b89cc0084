use crate::math::{Matrix, Point, Real};

/// The covariance matrix of a point cloud, relative to its mean.
///
/// Returns the zero matrix for an empty cloud.
pub fn covariance(pts: &[Point<Real>]) -> Matrix<Real> {
    if pts.is_empty() {
        return Matrix::zeros();
    }

    let mean = crate::utils::center(pts);
    let weight = 1.0 / pts.len() as Real;

    pts.iter().fold(Matrix::zeros(), |acc, pt| {
        let d = *pt - mean;
        acc + d * (d * weight).transpose()
    })
}
