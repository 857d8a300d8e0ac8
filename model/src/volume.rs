use crate::index::voxel_index;
use derive_builder::Builder;
use nalgebra::Vector3;
use thiserror::Error;

/// HU sentinel returned by [`Volume::get_voxel`] outside the volume bounds.
pub const AIR_HU: i16 = -1000;

#[derive(Debug, Error, PartialEq)]
pub enum VolumeBuildError {
    #[error("uninitialized field: {0}")]
    UninitializedField(String),
    #[error("dimensions ({cols}, {rows}, {slices}) imply {expected} voxels, data has {actual}")]
    DataLengthMismatch {
        cols: usize,
        rows: usize,
        slices: usize,
        expected: usize,
        actual: usize,
    },
    #[error("dimensions must all be positive, got ({0}, {1}, {2})")]
    NonPositiveDimensions(usize, usize, usize),
}

impl From<derive_builder::UninitializedFieldError> for VolumeBuildError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(e.field_name().to_string())
    }
}

/// Row/column/slice direction cosines for a `Volume`.
#[derive(Debug, Clone, Copy)]
pub struct Orientation {
    pub row_dir: Vector3<f64>,
    pub col_dir: Vector3<f64>,
    pub slice_dir: Vector3<f64>,
}

/// The assembled, immutable 3D voxel buffer produced by the volume builder.
///
/// A signed 16-bit HU buffer stored z-major / row-major / column-minor.
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate", error = "VolumeBuildError"))]
pub struct Volume {
    pub cols: usize,
    pub rows: usize,
    pub slices: usize,
    /// `(sx, sy, sz)` in mm; `sz` is the median inter-slice distance.
    pub spacing: (f64, f64, f64),
    /// Patient-space position of voxel `(0, 0, 0)`, in mm.
    pub origin: Vector3<f64>,
    pub orientation: Orientation,
    pub data: Vec<i16>,
    pub window_center: f64,
    pub window_width: f64,
    pub min_hu: i16,
    pub max_hu: i16,
}

impl VolumeBuilder {
    fn validate(&self) -> Result<(), VolumeBuildError> {
        let cols = self.cols.unwrap_or_default();
        let rows = self.rows.unwrap_or_default();
        let slices = self.slices.unwrap_or_default();
        if cols == 0 || rows == 0 || slices == 0 {
            return Err(VolumeBuildError::NonPositiveDimensions(cols, rows, slices));
        }
        if let Some(data) = &self.data {
            let expected = cols * rows * slices;
            if data.len() != expected {
                return Err(VolumeBuildError::DataLengthMismatch {
                    cols,
                    rows,
                    slices,
                    expected,
                    actual: data.len(),
                });
            }
        }
        Ok(())
    }
}

impl Volume {
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.cols, self.rows, self.slices)
    }

    /// Returns the voxel at `(x, y, z)`, or [`AIR_HU`] when out of bounds.
    pub fn get_voxel(&self, x: i64, y: i64, z: i64) -> i16 {
        if x < 0 || y < 0 || z < 0 {
            return AIR_HU;
        }
        match voxel_index(self.dimensions(), x as usize, y as usize, z as usize) {
            Ok(idx) => self.data[idx],
            Err(_) => AIR_HU,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orientation() -> Orientation {
        Orientation {
            row_dir: Vector3::new(1.0, 0.0, 0.0),
            col_dir: Vector3::new(0.0, 1.0, 0.0),
            slice_dir: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    fn sample_volume() -> Volume {
        VolumeBuilder::default()
            .cols(2usize)
            .rows(2usize)
            .slices(3usize)
            .spacing((1.0, 1.0, 2.0))
            .origin(Vector3::new(0.0, 0.0, 0.0))
            .orientation(orientation())
            .data(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
            .window_center(0.0)
            .window_width(400.0)
            .min_hu(1)
            .max_hu(12)
            .build()
            .unwrap()
    }

    #[test]
    fn builds_valid_volume() {
        let v = sample_volume();
        assert_eq!(v.dimensions(), (2, 2, 3));
    }

    #[test]
    fn rejects_mismatched_data_length() {
        let mut b = VolumeBuilder::default();
        b.cols(2usize)
            .rows(2usize)
            .slices(3usize)
            .spacing((1.0, 1.0, 2.0))
            .origin(Vector3::new(0.0, 0.0, 0.0))
            .orientation(orientation())
            .data(vec![1, 2, 3])
            .window_center(0.0)
            .window_width(400.0)
            .min_hu(1)
            .max_hu(3);
        assert!(matches!(
            b.build().unwrap_err(),
            VolumeBuildError::DataLengthMismatch { .. }
        ));
    }

    #[test]
    fn get_voxel_in_bounds() {
        let v = sample_volume();
        assert_eq!(v.get_voxel(1, 1, 2), 12);
    }

    #[test]
    fn get_voxel_out_of_bounds_is_air() {
        let v = sample_volume();
        assert_eq!(v.get_voxel(-1, 0, 0), AIR_HU);
        assert_eq!(v.get_voxel(5, 0, 0), AIR_HU);
    }
}
