use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector3};

/// Builds a unit quaternion from an axis and an angle in radians.
///
/// `axis` need not be normalized; a zero-length axis yields the identity rotation.
pub fn axis_angle(axis: &Vector3<f64>, angle_rad: f64) -> UnitQuaternion<f64> {
    if axis.norm() == 0.0 {
        return UnitQuaternion::identity();
    }
    UnitQuaternion::from_axis_angle(&nalgebra::Unit::new_normalize(*axis), angle_rad)
}

/// Quaternion multiplication `a * b`, applying `b` first then `a`.
pub fn multiply(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    a * b
}

/// Converts a unit quaternion to a column-major 4x4 rotation matrix.
pub fn to_matrix4(q: &UnitQuaternion<f64>) -> Matrix4<f64> {
    q.to_homogeneous()
}

/// Raw Hamilton product, exposed for callers holding a non-unit `Quaternion` (e.g. during
/// incremental arcball accumulation before renormalizing).
pub fn raw_multiply(a: &Quaternion<f64>, b: &Quaternion<f64>) -> Quaternion<f64> {
    a * b
}
