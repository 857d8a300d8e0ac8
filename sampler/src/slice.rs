use mpr_model::{Plane, Volume, AIR_HU};

/// A 2D HU buffer sampled from a [`Volume`], plus the physical pixel spacing of that buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceImage {
    pub width: usize,
    pub height: usize,
    pub pixel_spacing: (f64, f64),
    pub data: Vec<i16>,
}

fn clamp_index(i: f64, max: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let rounded = i.round();
    if rounded < 0.0 {
        0
    } else if rounded as usize > max - 1 {
        max - 1
    } else {
        rounded as usize
    }
}

/// Extracts a single orthogonal slice.
pub fn extract_slice(volume: &Volume, plane: Plane, index: f64) -> SliceImage {
    let (cols, rows, slices) = volume.dimensions();
    let (sx, sy, sz) = volume.spacing;

    match plane {
        Plane::Axial => {
            let z = clamp_index(index, slices);
            let start = z * cols * rows;
            SliceImage {
                width: cols,
                height: rows,
                pixel_spacing: (sx, sy),
                data: volume.data[start..start + cols * rows].to_vec(),
            }
        }
        Plane::Coronal => {
            let y = clamp_index(index, rows);
            let mut data = vec![AIR_HU; cols * slices];
            for z in 0..slices {
                for x in 0..cols {
                    let out_pos = (slices - 1 - z) * cols + x;
                    data[out_pos] = volume.get_voxel(x as i64, y as i64, z as i64);
                }
            }
            SliceImage {
                width: cols,
                height: slices,
                pixel_spacing: (sx, sz),
                data,
            }
        }
        Plane::Sagittal => {
            let x = clamp_index(index, cols);
            let mut data = vec![AIR_HU; rows * slices];
            for z in 0..slices {
                for y in 0..rows {
                    let out_pos = (slices - 1 - z) * rows + y;
                    data[out_pos] = volume.get_voxel(x as i64, y as i64, z as i64);
                }
            }
            SliceImage {
                width: rows,
                height: slices,
                pixel_spacing: (sy, sz),
                data,
            }
        }
    }
}

/// Thin-slab Maximum Intensity Projection centered on `center`, radius `half`. Radius 0 equals
/// [`extract_slice`] at `center`.
pub fn mip_slab(volume: &Volume, plane: Plane, center: f64, half: usize) -> SliceImage {
    let dim_along_plane = match plane {
        Plane::Axial => volume.slices,
        Plane::Coronal => volume.rows,
        Plane::Sagittal => volume.cols,
    };
    let c = clamp_index(center, dim_along_plane) as i64;
    let lo = (c - half as i64).max(0) as usize;
    let hi = ((c + half as i64) as usize).min(dim_along_plane - 1);

    match plane {
        Plane::Axial => {
            // Cheap path: initialize from the first slab slice, then max subsequent slices in
            // place; valid because HU >= -32768 always holds.
            let mut acc = extract_slice(volume, plane, lo as f64);
            for idx in (lo + 1)..=hi {
                let slice = extract_slice(volume, plane, idx as f64);
                for (a, b) in acc.data.iter_mut().zip(slice.data.iter()) {
                    *a = (*a).max(*b);
                }
            }
            acc
        }
        Plane::Coronal | Plane::Sagittal => {
            let mut acc: Option<SliceImage> = None;
            for idx in lo..=hi {
                let slice = extract_slice(volume, plane, idx as f64);
                match &mut acc {
                    None => {
                        let mut init = slice;
                        for v in init.data.iter_mut() {
                            *v = i16::MIN;
                        }
                        acc = Some(init);
                    }
                    Some(_) => {}
                }
                let a = acc.as_mut().unwrap();
                for (out, v) in a.data.iter_mut().zip(slice.data.iter()) {
                    *out = (*out).max(*v);
                }
            }
            acc.unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpr_model::{Orientation, VolumeBuilder};
    use nalgebra::Vector3;

    fn sample_volume() -> Volume {
        VolumeBuilder::default()
            .cols(2usize)
            .rows(2usize)
            .slices(3usize)
            .spacing((1.0, 1.0, 2.0))
            .origin(Vector3::new(0.0, 0.0, 0.0))
            .orientation(Orientation {
                row_dir: Vector3::new(1.0, 0.0, 0.0),
                col_dir: Vector3::new(0.0, 1.0, 0.0),
                slice_dir: Vector3::new(0.0, 0.0, 1.0),
            })
            .data(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
            .window_center(0.0)
            .window_width(400.0)
            .min_hu(1)
            .max_hu(12)
            .build()
            .unwrap()
    }

    #[test]
    fn s3_axial_extraction() {
        let v = sample_volume();
        let slice = extract_slice(&v, Plane::Axial, 1.0);
        assert_eq!(slice.data, vec![5, 6, 7, 8]);
        assert_eq!((slice.width, slice.height), (2, 2));
    }

    #[test]
    fn s4_coronal_flip() {
        let v = sample_volume();
        let slice = extract_slice(&v, Plane::Coronal, 0.0);
        assert_eq!(slice.data, vec![9, 10, 5, 6, 1, 2]);
        assert_eq!((slice.width, slice.height), (2, 3));
    }

    #[test]
    fn mip_radius_zero_equals_extract_slice() {
        let v = sample_volume();
        for plane in [Plane::Axial, Plane::Coronal, Plane::Sagittal] {
            let mip = mip_slab(&v, plane, 1.0, 0);
            let direct = extract_slice(&v, plane, 1.0);
            assert_eq!(mip.data, direct.data);
        }
    }

    #[test]
    fn s7_axial_mip_matches_slab_max() {
        let v = VolumeBuilder::default()
            .cols(2usize)
            .rows(2usize)
            .slices(3usize)
            .spacing((1.0, 1.0, 2.0))
            .origin(Vector3::new(0.0, 0.0, 0.0))
            .orientation(Orientation {
                row_dir: Vector3::new(1.0, 0.0, 0.0),
                col_dir: Vector3::new(0.0, 1.0, 0.0),
                slice_dir: Vector3::new(0.0, 0.0, 1.0),
            })
            .data(vec![0, 0, 0, 0, 5, 5, 5, 5, 1, 1, 1, 1])
            .window_center(0.0)
            .window_width(400.0)
            .min_hu(0)
            .max_hu(5)
            .build()
            .unwrap();

        let mip = mip_slab(&v, Plane::Axial, 1.0, 1);
        assert_eq!(mip.data, vec![5, 5, 5, 5]);
    }
}
