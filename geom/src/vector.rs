use nalgebra::Vector3;

/// Returns the unit vector in the direction of `v`.
///
/// A zero-length input maps to `(0, 0, 1)` rather than producing `NaN`s, so callers never
/// have to special-case a degenerate scan normal before using it.
///
/// # Examples
///
/// ```
/// use mpr_geom::vector::normalize;
/// use nalgebra::Vector3;
///
/// let v = normalize(&Vector3::new(0.0, 3.0, 4.0));
/// assert!((v.norm() - 1.0).abs() < 1e-12);
///
/// let zero = normalize(&Vector3::new(0.0, 0.0, 0.0));
/// assert_eq!(zero, Vector3::new(0.0, 0.0, 1.0));
/// ```
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let n = v.norm();
    if n == 0.0 {
        Vector3::new(0.0, 0.0, 1.0)
    } else {
        v / n
    }
}

/// Cross product `a × b`.
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Dot product `a · b`.
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_axes() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&x, &y), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn dot_of_orthogonal_axes_is_zero() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(dot(&x, &y), 0.0);
    }

    #[test]
    fn normalize_preserves_direction() {
        let v = Vector3::new(2.0, 0.0, 0.0);
        assert_eq!(normalize(&v), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn normalize_zero_is_safe() {
        assert_eq!(normalize(&Vector3::zeros()), Vector3::new(0.0, 0.0, 1.0));
    }
}
