use crate::interp::trilinear;
use mpr_geom::quaternion::axis_angle;
use mpr_model::Volume;
use nalgebra::Vector3;

/// Samples `volume` at a single voxel-space coordinate via trilinear interpolation.
/// Out-of-bounds corners fall back to the air sentinel via [`Volume::get_voxel`], so this
/// never errors.
pub fn trilerp(volume: &Volume, x: f64, y: f64, z: f64) -> f64 {
    let x0 = x.floor();
    let y0 = y.floor();
    let z0 = z.floor();
    let x1 = x0 + 1.0;
    let y1 = y0 + 1.0;
    let z1 = z0 + 1.0;

    let v = |ix: f64, iy: f64, iz: f64| {
        volume.get_voxel(ix as i64, iy as i64, iz as i64) as f64
    };

    trilinear(
        x,
        y,
        z,
        x0,
        x1,
        y0,
        y1,
        z0,
        z1,
        v(x0, y0, z0),
        v(x1, y0, z0),
        v(x0, y1, z0),
        v(x1, y1, z0),
        v(x0, y0, z1),
        v(x1, y0, z1),
        v(x0, y1, z1),
        v(x1, y1, z1),
    )
}

/// An arbitrarily-oriented sampling plane through voxel space. `u_dir`/`v_dir` are kept
/// orthonormal across rotation.
#[derive(Debug, Clone, Copy)]
pub struct ObliquePlane {
    pub origin: Vector3<f64>,
    pub normal: Vector3<f64>,
    pub u_dir: Vector3<f64>,
    pub v_dir: Vector3<f64>,
}

impl ObliquePlane {
    /// Rotates `normal`, `u_dir` and `v_dir` uniformly around `axis` by `angle_rad`.
    pub fn rotate(&self, axis: &Vector3<f64>, angle_rad: f64) -> Self {
        let q = axis_angle(axis, angle_rad);
        Self {
            origin: self.origin,
            normal: q * self.normal,
            u_dir: q * self.u_dir,
            v_dir: q * self.v_dir,
        }
    }
}

/// Renders `plane` into a `width * height` buffer of rounded int16 samples.
pub fn sample_oblique(volume: &Volume, plane: &ObliquePlane, width: usize, height: usize) -> Vec<i16> {
    let mut out = vec![0i16; width * height];
    let half_w = (width as f64 - 1.0) / 2.0;
    let half_h = (height as f64 - 1.0) / 2.0;

    for v in 0..height {
        for u in 0..width {
            let voxel = plane.origin
                + (u as f64 - half_w) * plane.u_dir
                + (v as f64 - half_h) * plane.v_dir;
            let sample = trilerp(volume, voxel.x, voxel.y, voxel.z);
            out[v * width + u] = sample.round() as i16;
        }
    }
    out
}
