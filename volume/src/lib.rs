use mpr_common::fetch::{FetchError, InstanceFetcher};
use mpr_geom::{Transform, TransformError};
use mpr_ingest::SortedSeries;
use mpr_model::volume::{Orientation, VolumeBuildError};
use mpr_model::{Volume, VolumeBuilder};
use mpr_pixel::{decode_raw, rescale_to_hu, DecodeError, DecodeParams};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that abort a volume build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("instance {identifier} has shape ({rows}, {columns}), expected ({expected_rows}, {expected_columns})")]
    ShapeMismatch {
        identifier: String,
        rows: u16,
        columns: u16,
        expected_rows: u16,
        expected_columns: u16,
    },
    #[error("failed to allocate {requested_bytes} bytes for the volume buffer")]
    AllocationFailed { requested_bytes: usize },
    #[error(transparent)]
    Model(#[from] VolumeBuildError),
    #[error(transparent)]
    InvalidOrientation(#[from] TransformError),
}

/// Progress callback invoked after every slice is decoded: `(loaded, total)`.
pub type BuildProgress<'a> = dyn FnMut(usize, usize) + 'a;

const YIELD_EVERY_N_SLICES: usize = 10;

/// Decodes, rescales and packs a sorted, validated series into one column-major/z-major
/// [`Volume`] buffer.
///
/// Every [`YIELD_EVERY_N_SLICES`] slices, a caller running this inside an async executor
/// should insert its own yield point; this synchronous implementation has no executor to
/// yield to, so it only calls `progress`.
pub fn build_volume(
    series: &SortedSeries,
    fetcher: &dyn InstanceFetcher,
    mut progress: impl FnMut(usize, usize),
) -> Result<Volume, BuildError> {
    let instances = &series.instances;
    let total = instances.len();
    let first = &instances[0];
    let cols = first.columns as usize;
    let rows = first.rows as usize;
    let slices = total;

    let requested_bytes = cols
        .checked_mul(rows)
        .and_then(|cr| cr.checked_mul(slices))
        .and_then(|n| n.checked_mul(std::mem::size_of::<i16>()))
        .ok_or(BuildError::AllocationFailed {
            requested_bytes: usize::MAX,
        })?;

    let mut data = Vec::new();
    if data.try_reserve_exact(cols * rows * slices).is_err() {
        return Err(BuildError::AllocationFailed { requested_bytes });
    }
    data.resize(cols * rows * slices, 0i16);

    let mut min_hu = i16::MAX;
    let mut max_hu = i16::MIN;

    for (z, instance) in instances.iter().enumerate() {
        if instance.rows as usize != rows || instance.columns as usize != cols {
            return Err(BuildError::ShapeMismatch {
                identifier: instance.identifier.clone(),
                rows: instance.rows,
                columns: instance.columns,
                expected_rows: first.rows,
                expected_columns: first.columns,
            });
        }

        let bytes = fetcher.fetch_instance_bytes(&instance.pixel_data_ref)?;
        let params = DecodeParams {
            rows: instance.rows,
            columns: instance.columns,
            bits_allocated: instance.bits_allocated,
            high_bit: instance.high_bit,
            pixel_representation: instance.pixel_representation,
        };
        let raw = decode_raw(&bytes, &params)?;
        let hu = rescale_to_hu(&raw, instance.rescale_slope, instance.rescale_intercept);

        let offset = z * cols * rows;
        data[offset..offset + cols * rows].copy_from_slice(&hu);

        for &v in &hu {
            min_hu = min_hu.min(v);
            max_hu = max_hu.max(v);
        }

        progress(z + 1, total);
        if (z + 1) % YIELD_EVERY_N_SLICES == 0 {
            debug!("volume build: {} / {} slices decoded", z + 1, total);
        }
    }

    let slice_dir = series.normal
        * if last_minus_first(series) >= 0.0 {
            1.0
        } else {
            -1.0
        };

    let spacing = (first.pixel_spacing.0, first.pixel_spacing.1, series.spacing);
    Transform::from_orientation(
        &first.row_dir,
        &first.col_dir,
        &slice_dir,
        spacing,
        &first.image_position_patient,
    )?;

    let volume = VolumeBuilder::default()
        .cols(cols)
        .rows(rows)
        .slices(slices)
        .spacing(spacing)
        .origin(first.image_position_patient)
        .orientation(Orientation {
            row_dir: first.row_dir,
            col_dir: first.col_dir,
            slice_dir,
        })
        .data(data)
        .window_center(first.window_center)
        .window_width(first.window_width)
        .min_hu(min_hu)
        .max_hu(max_hu)
        .build()?;

    if min_hu > max_hu {
        warn!("volume build produced an empty HU range");
    }

    Ok(volume)
}

fn last_minus_first(series: &SortedSeries) -> f64 {
    match (series.positions.first(), series.positions.last()) {
        (Some(&first), Some(&last)) => last - first,
        _ => 0.0,
    }
}
