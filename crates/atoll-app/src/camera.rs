//! Showcase camera that slowly orbits the island.

use atoll_config::CameraConfig;
use glam::{EulerRot, Quat, Vec3};

/// Camera rig rotating about the world Y axis at a constant rate.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Orientation of the rig as a unit quaternion.
    pub rotation: Quat,
    /// Yaw rate in degrees per second.
    pub rotate_speed: f32,
    /// Zoom rate. Carried for configuration parity; the orbit never zooms.
    pub zoom_speed: f32,
    total_yaw_degrees: f32,
}

impl OrbitCamera {
    /// A camera at identity orientation.
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotation: Quat::IDENTITY,
            rotate_speed,
            zoom_speed,
            total_yaw_degrees: 0.0,
        }
    }

    /// A camera using the speeds from the `camera` config section.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.rotate_speed, config.zoom_speed)
    }

    /// Advance the orbit by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let degrees = self.rotate_speed * dt;
        self.rotation = (self.rotation * Quat::from_rotation_y(degrees.to_radians())).normalize();
        self.total_yaw_degrees += degrees;
    }

    /// Current yaw in radians, wrapped to `(-pi, pi]`.
    pub fn yaw(&self) -> f32 {
        self.rotation.to_euler(EulerRot::YXZ).0
    }

    /// Yaw accumulated over every update, in degrees, without wrapping.
    pub fn total_yaw_degrees(&self) -> f32 {
        self.total_yaw_degrees
    }

    /// Forward direction (-Z rotated by the rig).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Take new speeds from a reloaded config without resetting the orbit.
    pub fn apply_config(&mut self, config: &CameraConfig) {
        self.rotate_speed = config.rotate_speed;
        self.zoom_speed = config.zoom_speed;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
