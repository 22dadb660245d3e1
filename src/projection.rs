//! Perspective projection of world points onto the layer plane.
//!
//! The transform is a translate, three fixed-axis rotations (X, then Y,
//! then Z) and a single-point perspective divide:
//!
//! ```text
//! p  = point - camera.position
//! y1 = cosX·p.y − sinX·p.z        z1 = sinX·p.y + cosX·p.z
//! z2 = cosY·z1  − sinY·p.x        x1 = sinY·z1  + cosY·p.x
//! x2 = cosZ·x1  − sinZ·y1         y2 = sinZ·x1  + cosZ·y1
//! scale = f / (f + z2)
//! ```
//!
//! The depth key is `-point.z` in world space, not the rotated `z2`, so
//! paint order follows the layer's own forward axis whatever the camera
//! is doing.

use crate::camera::Camera;
use glam::DVec3;

/// Smallest denominator allowed in the perspective divide.
///
/// Points at or behind the eye plane (`f + z2 <= 0`) are projected as if
/// they sat this close to it, which keeps `scale` finite and positive.
pub const MIN_PERSPECTIVE_DENOMINATOR: f64 = 1e-6;

/// Screen-space result of projecting one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Horizontal offset from the layer origin.
    pub screen_x: f64,
    /// Vertical offset from the layer origin.
    pub screen_y: f64,
    /// Uniform perspective scale.
    pub scale: f64,
    /// Paint-order key; smaller paints first.
    pub depth_key: f64,
    /// Whether the perspective denominator had to be clamped.
    pub clamped: bool,
}

/// Camera trigonometry, computed once per tick and shared by every particle.
#[derive(Clone, Copy, Debug)]
pub struct CameraBasis {
    position: DVec3,
    sin: DVec3,
    cos: DVec3,
    focal_length: f64,
}

impl CameraBasis {
    /// Precompute the sines and cosines of the camera rotation.
    pub fn new(camera: &Camera) -> Self {
        let r = camera.rotation;
        Self {
            position: camera.position,
            sin: DVec3::new(r.x.sin(), r.y.sin(), r.z.sin()),
            cos: DVec3::new(r.x.cos(), r.y.cos(), r.z.cos()),
            focal_length: camera.focal_length(),
        }
    }

    /// Project a world-space point.
    pub fn project(&self, point: DVec3) -> Projection {
        let p = point - self.position;
        let (s, c) = (self.sin, self.cos);

        let y1 = c.x * p.y - s.x * p.z;
        let z1 = s.x * p.y + c.x * p.z;

        let z2 = c.y * z1 - s.y * p.x;
        let x1 = s.y * z1 + c.y * p.x;

        let x2 = c.z * x1 - s.z * y1;
        let y2 = s.z * x1 + c.z * y1;

        let raw = self.focal_length + z2;
        // `max` also maps a NaN denominator onto the floor.
        let denominator = raw.max(MIN_PERSPECTIVE_DENOMINATOR);
        let scale = self.focal_length / denominator;

        Projection {
            screen_x: x2 * scale,
            screen_y: y2 * scale,
            scale,
            depth_key: -point.z,
            clamped: !(raw > MIN_PERSPECTIVE_DENOMINATOR),
        }
    }
}

/// Project a single point through `camera`.
///
/// Convenience wrapper; when projecting many points with the same camera,
/// build a [`CameraBasis`] once instead.
pub fn project(camera: &Camera, point: DVec3) -> Projection {
    CameraBasis::new(camera).project(point)
}
