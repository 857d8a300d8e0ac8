use mpr_common::Validate;
use mpr_geom::vector::{cross, dot, normalize};
use mpr_model::Instance;
use nalgebra::Vector3;
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons `validate_stackability` can reject a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailureKind {
    MixedDimensions,
    MixedOrientation,
    DegenerateNormal,
    NonUniformSpacing,
    TooFewSlices,
}

pub type ValidationFailures = Vec<ValidationFailureKind>;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("cannot sort an empty instance list")]
    EmptySeries,
}

/// Result of [`sort_slices_by_position`].
#[derive(Debug, Clone)]
pub struct SortedSeries {
    pub instances: Vec<Instance>,
    pub normal: Vector3<f64>,
    pub spacing: f64,
    pub positions: Vec<f64>,
}

const SPACING_TOLERANCE_FRACTION: f64 = 0.01;
const SPACING_TOLERANCE_FLOOR_MM: f64 = 0.01;

fn scan_normal(first: &Instance) -> Vector3<f64> {
    normalize(&cross(&first.row_dir, &first.col_dir))
}

fn is_degenerate(row_dir: &Vector3<f64>, col_dir: &Vector3<f64>) -> bool {
    cross(row_dir, col_dir).norm() == 0.0
}

fn spacing_tolerance(median_spacing: f64) -> f64 {
    (median_spacing.abs() * SPACING_TOLERANCE_FRACTION).max(SPACING_TOLERANCE_FLOOR_MM)
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Validates that `instances` can be stacked into a `Volume`.
pub struct Stackability<'a>(pub &'a [Instance]);

impl Validate<Result<(), ValidationFailures>> for Stackability<'_> {
    fn validate(&self) -> Result<(), ValidationFailures> {
        validate_stackability(self.0)
    }
}

pub fn validate_stackability(instances: &[Instance]) -> Result<(), ValidationFailures> {
    let mut failures = ValidationFailures::new();

    if instances.len() < 2 {
        failures.push(ValidationFailureKind::TooFewSlices);
        warn!("stackability check: fewer than 2 instances in series");
        return Err(failures);
    }

    let first = &instances[0];
    let mixed_dims = instances
        .iter()
        .any(|i| i.rows != first.rows || i.columns != first.columns);
    if mixed_dims {
        failures.push(ValidationFailureKind::MixedDimensions);
    }

    let mixed_orientation = instances.iter().any(|i| {
        (i.row_dir - first.row_dir).norm() > 1e-6 || (i.col_dir - first.col_dir).norm() > 1e-6
    });
    if mixed_orientation {
        failures.push(ValidationFailureKind::MixedOrientation);
    }

    if is_degenerate(&first.row_dir, &first.col_dir) {
        failures.push(ValidationFailureKind::DegenerateNormal);
        debug!("stackability check: degenerate scan normal, skipping spacing check");
        return Err(failures);
    }

    if !failures.is_empty() {
        return Err(failures);
    }

    let n = scan_normal(first);
    let mut positions: Vec<f64> = instances
        .iter()
        .map(|i| dot(&i.image_position_patient, &n))
        .collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let diffs: Vec<f64> = positions.windows(2).map(|w| w[1] - w[0]).collect();
    if diffs.iter().any(|d| *d <= 0.0) {
        failures.push(ValidationFailureKind::NonUniformSpacing);
        return Err(failures);
    }

    let med = median(diffs.clone());
    let tol = spacing_tolerance(med);
    if diffs.iter().any(|d| (d - med).abs() > tol) {
        failures.push(ValidationFailureKind::NonUniformSpacing);
        return Err(failures);
    }

    Ok(())
}

/// Sorts `instances` by their projected position along the scan normal.
///
/// Callers must first call [`validate_stackability`] and only proceed on `Ok`.
pub fn sort_slices_by_position(instances: &[Instance]) -> Result<SortedSeries, SortError> {
    if instances.is_empty() {
        return Err(SortError::EmptySeries);
    }
    let normal = scan_normal(&instances[0]);

    let mut indexed: Vec<(usize, f64, Instance)> = instances
        .iter()
        .enumerate()
        .map(|(idx, inst)| (idx, dot(&inst.image_position_patient, &normal), inst.clone()))
        .collect();
    // Stable sort on projected position; ties keep input order, no warning emitted.
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.0.cmp(&b.0)));

    let positions: Vec<f64> = indexed.iter().map(|(_, t, _)| *t).collect();
    let sorted: Vec<Instance> = indexed.into_iter().map(|(_, _, inst)| inst).collect();

    let diffs: Vec<f64> = positions.windows(2).map(|w| w[1] - w[0]).collect();
    let spacing = median(diffs);

    Ok(SortedSeries {
        instances: sorted,
        normal,
        spacing,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpr_model::InstanceBuilder;

    fn axial_instance(id: &str, z: f64) -> Instance {
        InstanceBuilder::default()
            .identifier(id.to_string())
            .rows(2u16)
            .columns(2u16)
            .pixel_spacing((1.0, 1.0))
            .slice_thickness(2.0)
            .image_position_patient(Vector3::new(0.0, 0.0, z))
            .row_dir(Vector3::new(1.0, 0.0, 0.0))
            .col_dir(Vector3::new(0.0, 1.0, 0.0))
            .pixel_data_ref(format!("blob://{id}"))
            .build()
            .unwrap()
    }

    #[test]
    fn s1_validation_happy_path() {
        let instances = vec![
            axial_instance("a", 0.0),
            axial_instance("b", 2.0),
            axial_instance("c", 4.0),
        ];
        assert!(validate_stackability(&instances).is_ok());
        let sorted = sort_slices_by_position(&instances).unwrap();
        assert_eq!(sorted.spacing, 2.0);
        assert_eq!(sorted.normal, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(
            sorted.instances.iter().map(|i| i.identifier.clone()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn s2_validation_non_uniform_spacing() {
        let instances = vec![
            axial_instance("a", 0.0),
            axial_instance("b", 2.0),
            axial_instance("c", 5.0),
        ];
        let err = validate_stackability(&instances).unwrap_err();
        assert_eq!(err, vec![ValidationFailureKind::NonUniformSpacing]);
    }

    #[test]
    fn too_few_slices() {
        let instances = vec![axial_instance("a", 0.0)];
        let err = validate_stackability(&instances).unwrap_err();
        assert_eq!(err, vec![ValidationFailureKind::TooFewSlices]);
    }

    #[test]
    fn mixed_dimensions_detected() {
        let mut b = axial_instance("b", 2.0);
        b.columns = 3;
        let instances = vec![axial_instance("a", 0.0), b, axial_instance("c", 4.0)];
        let err = validate_stackability(&instances).unwrap_err();
        assert!(err.contains(&ValidationFailureKind::MixedDimensions));
    }

    #[test]
    fn degenerate_normal_detected() {
        let mut a = axial_instance("a", 0.0);
        a.col_dir = a.row_dir;
        let instances = vec![a.clone(), { let mut b = a.clone(); b.identifier = "b".into(); b.image_position_patient.z = 2.0; b }];
        let err = validate_stackability(&instances).unwrap_err();
        assert!(err.contains(&ValidationFailureKind::DegenerateNormal));
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let instances = vec![axial_instance("a", 0.0), axial_instance("b", 0.0)];
        let sorted = sort_slices_by_position(&instances).unwrap();
        assert_eq!(
            sorted.instances.iter().map(|i| i.identifier.clone()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }
}
