use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("voxel index ({x}, {y}, {z}) out of bounds for dimensions ({cols}, {rows}, {slices})")]
    OutOfBounds {
        x: i64,
        y: i64,
        z: i64,
        cols: usize,
        rows: usize,
        slices: usize,
    },
}

/// Linear index for voxel `(x, y, z)` into a `Volume`'s z-major, row-major, column-minor
/// buffer: `z * (cols * rows) + y * cols + x`.
///
/// # Examples
///
/// ```
/// use mpr_model::index::voxel_index;
///
/// assert_eq!(voxel_index((2, 2, 3), 0, 0, 0).unwrap(), 0);
/// assert_eq!(voxel_index((2, 2, 3), 1, 0, 0).unwrap(), 1);
/// assert_eq!(voxel_index((2, 2, 3), 0, 1, 0).unwrap(), 2);
/// assert_eq!(voxel_index((2, 2, 3), 0, 0, 1).unwrap(), 4);
/// ```
pub fn voxel_index(
    dims: (usize, usize, usize),
    x: usize,
    y: usize,
    z: usize,
) -> Result<usize, IndexError> {
    let (cols, rows, slices) = dims;
    if x >= cols || y >= rows || z >= slices {
        return Err(IndexError::OutOfBounds {
            x: x as i64,
            y: y as i64,
            z: z as i64,
            cols,
            rows,
            slices,
        });
    }
    Ok(z * (cols * rows) + y * cols + x)
}
