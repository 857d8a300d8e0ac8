use mpr_geom::quaternion::{axis_angle, multiply};
use nalgebra::{UnitQuaternion, Vector3};

/// Arcball camera for the volume renderer.
///
/// Orientation is tracked as an `f64` unit quaternion via [`mpr_geom::quaternion`], matching
/// the rest of the core's geometry; [`ArcballCamera::view_matrix`] converts to `f32`/`glam`
/// only at the GPU boundary.
#[derive(Debug, Clone, Copy)]
pub struct ArcballCamera {
    pub orientation: UnitQuaternion<f64>,
    pub distance: f64,
    pub pan: (f64, f64),
    pub fov_y_rad: f64,
    initial_distance: f64,
}

impl ArcballCamera {
    pub fn new(initial_distance: f64, fov_y_rad: f64) -> Self {
        Self {
            orientation: UnitQuaternion::identity(),
            distance: initial_distance,
            pan: (0.0, 0.0),
            fov_y_rad,
            initial_distance,
        }
    }

    /// Combines a yaw/pitch increment (radians) with the current orientation:
    /// `yaw · pitch · current`.
    pub fn rotate(&mut self, yaw_rad: f64, pitch_rad: f64) {
        let yaw = axis_angle(&Vector3::y(), yaw_rad);
        let pitch = axis_angle(&Vector3::x(), pitch_rad);
        self.orientation = multiply(&multiply(&yaw, &pitch), &self.orientation);
    }

    /// `distance *= 1 + delta * 0.001`, clamped to `[10, 10 * initial_distance]`.
    pub fn zoom(&mut self, delta: f64) {
        let scaled = self.distance * (1.0 + delta * 0.001);
        self.distance = scaled.clamp(10.0, 10.0 * self.initial_distance);
    }

    /// Screen-aligned pan, scaled by `distance` so apparent speed stays stable.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.0 += dx * self.distance;
        self.pan.1 += dy * self.distance;
    }

    /// World-space camera position: `distance` back along the rotated +Z axis, plus pan.
    pub fn eye_position(&self) -> Vector3<f64> {
        let back = self.orientation * Vector3::z();
        let right = self.orientation * Vector3::x();
        let up = self.orientation * Vector3::y();
        back * self.distance + right * self.pan.0 + up * self.pan.1
    }

    pub fn view_matrix_f32(&self) -> glam::Mat4 {
        let eye = self.eye_position();
        let eye = glam::Vec3::new(eye.x as f32, eye.y as f32, eye.z as f32);
        let up = self.orientation * Vector3::y();
        let up = glam::Vec3::new(up.x as f32, up.y as f32, up.z as f32);
        glam::Mat4::look_at_rh(eye, glam::Vec3::ZERO, up)
    }

    pub fn projection_matrix_f32(&self, aspect_ratio: f32) -> glam::Mat4 {
        glam::Mat4::perspective_rh(self.fov_y_rad as f32, aspect_ratio, 1.0, 100_000.0)
    }
}
