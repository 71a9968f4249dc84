//! Lighting system
//!
//! A small fixed rig suited to presenting a single object: soft ambient
//! fill, one animated key light, and two colored accents that drift slowly
//! to keep reflections alive while the object spins.

use crate::foundation::math::Vec3;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (like a lightbulb)
    Point,
}

/// Light source
#[derive(Debug, Clone)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position (for point lights; origin of a directional light)
    pub position: Vec3,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// Light range (point lights; 0 = unbounded)
    pub range: f32,
}

impl Light {
    /// Create a directional light shining from `position` towards the origin
    pub fn directional(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            light_type: LightType::Directional,
            position,
            color,
            intensity,
            range: 0.0,
        }
    }

    /// Create a point light
    pub fn point(position: Vec3, color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            color,
            intensity,
            range,
        }
    }
}

/// Three-light presentation rig with ambient fill
#[derive(Debug, Clone)]
pub struct LightRig {
    /// Ambient light color
    pub ambient_color: Vec3,
    /// Ambient light intensity
    pub ambient_intensity: f32,
    key: Light,
    accent: Light,
    fill: Light,
}

impl LightRig {
    /// Create a rig from explicit lights
    pub fn new(ambient_color: Vec3, ambient_intensity: f32, key: Light, accent: Light, fill: Light) -> Self {
        Self {
            ambient_color,
            ambient_intensity,
            key,
            accent,
            fill,
        }
    }

    /// Advance the rig's animation
    ///
    /// Positions follow slow sinusoids of the cumulative active time, so a
    /// suspended viewer resumes the motion where it paused.
    pub fn animate(&mut self, elapsed: f32) {
        self.key.position.x = (elapsed * 0.4).sin() * 4.0;
        self.accent.position.y = (elapsed * 0.8).sin() * 2.0 + 1.5;
        self.fill.position.z = (elapsed * 0.5).cos() * 3.0;
    }

    /// The animated key light
    pub fn key(&self) -> &Light {
        &self.key
    }

    /// The animated accent light
    pub fn accent(&self) -> &Light {
        &self.accent
    }

    /// The animated fill light
    pub fn fill(&self) -> &Light {
        &self.fill
    }

    /// All three animated lights
    pub fn lights(&self) -> [&Light; 3] {
        [&self.key, &self.accent, &self.fill]
    }
}

impl Default for LightRig {
    /// Cinematic soft defaults: cool ambient, warm white key, icy accents
    fn default() -> Self {
        Self::new(
            Vec3::new(0.333, 0.467, 0.6),
            0.6,
            Light::directional(Vec3::new(4.0, 4.0, 2.0), Vec3::new(1.0, 1.0, 1.0), 2.0),
            Light::point(Vec3::new(-3.0, 1.5, -2.0), Vec3::new(0.353, 0.784, 0.98), 3.0, 10.0),
            Light::point(Vec3::new(0.0, -1.0, 3.0), Vec3::new(0.6, 0.8, 1.0), 1.0, 8.0),
        )
    }
}
