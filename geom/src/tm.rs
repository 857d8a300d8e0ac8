use nalgebra::{Matrix4, Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("matrix is not invertible")]
    NonInvertibleMatrix,
}

/// An affine transform between voxel indices and patient-space (world) coordinates.
///
/// Grounded on the row/column/slice direction cosines DICOM provides: columns of the
/// forward matrix are `rowDir * spacingX`, `colDir * spacingY`, `sliceDir * spacingZ`, with
/// `origin` as the translation column.
#[derive(Debug, Clone)]
pub struct Transform {
    matrix: Matrix4<f64>,
    inverse: Matrix4<f64>,
}

impl Transform {
    /// Builds a transform from an already-assembled 4x4 matrix.
    pub fn new(matrix: Matrix4<f64>) -> Result<Self, TransformError> {
        let inverse = matrix
            .try_inverse()
            .ok_or(TransformError::NonInvertibleMatrix)?;
        Ok(Self { matrix, inverse })
    }

    pub fn identity() -> Self {
        let matrix = Matrix4::identity();
        Self {
            matrix,
            inverse: matrix,
        }
    }

    /// Builds the voxel-index → patient-space transform from DICOM orientation metadata:
    /// `rowDir`, `colDir` (unit 3-vectors), `sliceDir` (unit 3-vector, usually `rowDir ×
    /// colDir`), `spacing` `(sx, sy, sz)`, and `origin` (position of voxel `(0,0,0)`).
    pub fn from_orientation(
        row_dir: &Vector3<f64>,
        col_dir: &Vector3<f64>,
        slice_dir: &Vector3<f64>,
        spacing: (f64, f64, f64),
        origin: &Vector3<f64>,
    ) -> Result<Self, TransformError> {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            row_dir.x * spacing.0, col_dir.x * spacing.1, slice_dir.x * spacing.2, origin.x,
            row_dir.y * spacing.0, col_dir.y * spacing.1, slice_dir.y * spacing.2, origin.y,
            row_dir.z * spacing.0, col_dir.z * spacing.1, slice_dir.z * spacing.2, origin.z,
            0.0, 0.0, 0.0, 1.0,
        );
        Self::new(matrix)
    }

    pub fn with_translation(x: f64, y: f64, z: f64) -> Self {
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = x;
        matrix[(1, 3)] = y;
        matrix[(2, 3)] = z;

        let mut inverse = Matrix4::identity();
        inverse[(0, 3)] = -x;
        inverse[(1, 3)] = -y;
        inverse[(2, 3)] = -z;

        Self { matrix, inverse }
    }

    /// Converts a voxel index `(x, y, z)` to patient-space millimetres.
    pub fn index_to_world(&self, indices: (f64, f64, f64)) -> Point3<f64> {
        let point = Point3::new(indices.0, indices.1, indices.2);
        self.matrix.transform_point(&point)
    }

    /// Converts patient-space millimetres back to a voxel index.
    pub fn world_to_index(&self, coords: Point3<f64>) -> (f64, f64, f64) {
        let point = self.inverse.transform_point(&coords);
        (point.x, point.y, point.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_roundtrips() {
        let t = Transform::with_translation(10.0, 20.0, 30.0);
        let world = t.index_to_world((5.0, 6.0, 7.0));
        assert_eq!((world.x, world.y, world.z), (15.0, 26.0, 37.0));
        let back = t.world_to_index(world);
        assert_eq!(back, (5.0, 6.0, 7.0));
    }

    #[test]
    fn from_orientation_axis_aligned() {
        let t = Transform::from_orientation(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 0.0, 1.0),
            (1.171875, 1.171875, 2.0),
            &Vector3::new(-299.4140625, -545.9140625, 402.0),
        )
        .unwrap();
        let world = t.index_to_world((1.0, 1.0, 1.0));
        assert!((world.x - (-299.4140625 + 1.171875)).abs() < 1e-9);
        assert!((world.y - (-545.9140625 + 1.171875)).abs() < 1e-9);
        assert!((world.z - (402.0 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn non_invertible_matrix_errors() {
        assert_eq!(
            Transform::new(Matrix4::zeros()).unwrap_err(),
            TransformError::NonInvertibleMatrix
        );
    }
}
