//! Interactive orbit controls
//!
//! Damped orbit/pan/zoom around the camera's look target. Input arrives as
//! impulses from the host (pointer deltas, wheel steps); the residual
//! velocities decay every active tick whether or not interaction is
//! enabled, so enabling it later never releases stored-up motion.

use nalgebra::UnitQuaternion;

use crate::config::InteractionConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::render::camera::Camera;

/// Exponential decay rate of residual velocities, per second.
/// Matches a 0.05 per-frame damping factor at 60 Hz.
const DAMPING_RATE: f32 = 3.0;

/// Keep the orbit away from the poles so the up vector stays meaningful.
const MAX_POLE_ALIGNMENT: f32 = 0.995;

/// Distance limits for zoom, in world units.
const MIN_DISTANCE: f32 = 0.05;
const MAX_DISTANCE: f32 = 1.0e4;

/// Damped orbit/pan/zoom camera controls
pub struct OrbitControls {
    enabled: bool,
    pan_enabled: bool,
    zoom_enabled: bool,
    orbit_velocity: Vec2,
    pan_velocity: Vec2,
    zoom_velocity: f32,
    disposed: bool,
}

impl OrbitControls {
    /// Create controls from the interaction configuration
    pub fn new(interaction: &InteractionConfig) -> Self {
        Self {
            enabled: interaction.enabled,
            pan_enabled: interaction.pan,
            zoom_enabled: interaction.zoom,
            orbit_velocity: Vec2::zeros(),
            pan_velocity: Vec2::zeros(),
            zoom_velocity: 0.0,
            disposed: false,
        }
    }

    /// Whether interaction currently moves the camera
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.disposed
    }

    /// Enable or disable interaction without touching residual motion
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Feed an orbit impulse (yaw, pitch) in radians per second
    pub fn impulse_orbit(&mut self, yaw: f32, pitch: f32) {
        if self.disposed {
            return;
        }
        self.orbit_velocity += Vec2::new(yaw, pitch);
    }

    /// Feed a pan impulse in world units per second (screen-plane x/y)
    pub fn impulse_pan(&mut self, x: f32, y: f32) {
        if self.disposed || !self.pan_enabled {
            return;
        }
        self.pan_velocity += Vec2::new(x, y);
    }

    /// Feed a zoom impulse (positive moves closer), log-scale per second
    pub fn impulse_zoom(&mut self, amount: f32) {
        if self.disposed || !self.zoom_enabled {
            return;
        }
        self.zoom_velocity += amount;
    }

    /// Advance damping and apply residual motion to the camera
    ///
    /// Called once per active tick. When interaction is disabled the
    /// velocities still decay but the camera is left alone.
    pub fn update(&mut self, camera: &mut Camera, delta: f32) {
        if self.disposed || delta <= 0.0 {
            return;
        }

        if self.enabled {
            self.apply_orbit(camera, delta);
            self.apply_pan(camera, delta);
            self.apply_zoom(camera, delta);
        }

        let decay = (-DAMPING_RATE * delta).exp();
        self.orbit_velocity *= decay;
        self.pan_velocity *= decay;
        self.zoom_velocity *= decay;
    }

    fn apply_orbit(&self, camera: &mut Camera, delta: f32) {
        let offset = camera.position - camera.target;
        if offset.norm() < MIN_DISTANCE {
            return;
        }

        let yaw = UnitQuaternion::from_axis_angle(&Vec3::y_axis(), -self.orbit_velocity.x * delta);
        let mut rotated = yaw * offset;

        let right = camera.up.cross(&rotated);
        if let Some(right_axis) = nalgebra::Unit::try_new(right, 1e-6) {
            let pitch = UnitQuaternion::from_axis_angle(&right_axis, self.orbit_velocity.y * delta);
            let pitched = pitch * rotated;
            // Refuse pitch that would carry the orbit over a pole.
            if pitched.normalize().dot(&camera.up).abs() < MAX_POLE_ALIGNMENT {
                rotated = pitched;
            }
        }

        camera.position = camera.target + rotated;
    }

    fn apply_pan(&self, camera: &mut Camera, delta: f32) {
        let offset = camera.target - camera.position;
        if offset.norm() < MIN_DISTANCE {
            return;
        }
        let forward = offset / offset.norm();
        let right = forward.cross(&camera.up).normalize();
        let shift = (right * self.pan_velocity.x + camera.up * self.pan_velocity.y) * delta;
        camera.position += shift;
        camera.target += shift;
    }

    fn apply_zoom(&self, camera: &mut Camera, delta: f32) {
        let offset = camera.position - camera.target;
        if offset.norm() < MIN_DISTANCE {
            return;
        }
        let distance = (offset.norm() * (-self.zoom_velocity * delta).exp())
            .clamp(MIN_DISTANCE, MAX_DISTANCE);
        camera.position = camera.target + offset.normalize() * distance;
    }

    /// Release interactive-control resources
    ///
    /// Detaches the controls from further input; calling again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::trace!("Disposing orbit controls");
        self.orbit_velocity = Vec2::zeros();
        self.pan_velocity = Vec2::zeros();
        self.zoom_velocity = 0.0;
        self.disposed = true;
    }

    /// Whether the controls have been disposed
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
