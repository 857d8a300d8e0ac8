use crate::value_types::{PhotometricInterpretation, PixelRepresentation};
use derive_builder::Builder;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InstanceBuildError {
    #[error("uninitialized field: {0}")]
    UninitializedField(String),
    #[error("rows and columns must both be positive, got ({rows}, {columns})")]
    NonPositiveDimensions { rows: u16, columns: u16 },
    #[error("pixel spacing must be positive, got ({0}, {1})")]
    NonPositiveSpacing(f64, f64),
    #[error("window width must be positive, got {0}")]
    NonPositiveWindowWidth(f64),
}

impl From<derive_builder::UninitializedFieldError> for InstanceBuildError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(e.field_name().to_string())
    }
}

/// Metadata for one 2D slice instance, plus the decode-dispatch fields every CT/MR instance
/// carries.
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate", error = "InstanceBuildError"))]
pub struct Instance {
    pub identifier: String,
    pub rows: u16,
    pub columns: u16,
    /// `(sx, sy)` in mm.
    pub pixel_spacing: (f64, f64),
    pub slice_thickness: f64,
    /// Origin of the top-left pixel, in mm.
    pub image_position_patient: Vector3<f64>,
    pub row_dir: Vector3<f64>,
    pub col_dir: Vector3<f64>,
    #[builder(default = "0.0")]
    pub window_center: f64,
    #[builder(default = "400.0")]
    pub window_width: f64,
    #[builder(default = "1.0")]
    pub rescale_slope: f64,
    #[builder(default = "0.0")]
    pub rescale_intercept: f64,
    #[builder(default = "PhotometricInterpretation::Monochrome2")]
    pub photometric_interpretation: PhotometricInterpretation,
    #[builder(default = "PixelRepresentation::Signed")]
    pub pixel_representation: PixelRepresentation,
    #[builder(default = "16")]
    pub bits_allocated: u16,
    #[builder(default = "16")]
    pub bits_stored: u16,
    #[builder(default = "15")]
    pub high_bit: u16,
    #[builder(default = "1")]
    pub samples_per_pixel: u16,
    #[builder(default = "String::from(\"CT\")")]
    pub modality: String,
    /// Handle/URL the fetch interface (§6) resolves to raw pixel bytes.
    pub pixel_data_ref: String,
}

impl InstanceBuilder {
    fn validate(&self) -> Result<(), InstanceBuildError> {
        let rows = self.rows.unwrap_or_default();
        let columns = self.columns.unwrap_or_default();
        if rows == 0 || columns == 0 {
            return Err(InstanceBuildError::NonPositiveDimensions { rows, columns });
        }
        if let Some((sx, sy)) = self.pixel_spacing {
            if sx <= 0.0 || sy <= 0.0 {
                return Err(InstanceBuildError::NonPositiveSpacing(sx, sy));
            }
        }
        if let Some(width) = self.window_width {
            if width <= 0.0 {
                return Err(InstanceBuildError::NonPositiveWindowWidth(width));
            }
        }
        Ok(())
    }
}
