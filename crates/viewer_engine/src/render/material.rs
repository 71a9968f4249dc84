//! Material system for rendering

/// Material properties for 3D rendering
///
/// Parameter set for a metallic/roughness material with an optional
/// clearcoat layer. The per-material GPU resources (uniform blocks, shader
/// permutations) are owned through this struct and released on disposal.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color (RGB)
    pub base_color: [f32; 3],

    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metallic: f32,

    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,

    /// Clearcoat layer strength (0.0 = none)
    pub clearcoat: f32,

    /// Roughness of the clearcoat layer
    pub clearcoat_roughness: f32,

    /// Alpha/transparency (0.0 = transparent, 1.0 = opaque)
    pub alpha: f32,

    released: bool,
}

impl Material {
    /// Create a new material with default properties
    pub fn new() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0], // White
            metallic: 0.0,
            roughness: 0.5,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            alpha: 1.0,
            released: false,
        }
    }

    /// Set the base color
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b];
        self
    }

    /// Set the metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the clearcoat layer strength and roughness
    pub fn with_clearcoat(mut self, clearcoat: f32, roughness: f32) -> Self {
        self.clearcoat = clearcoat.clamp(0.0, 1.0);
        self.clearcoat_roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the alpha/transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Release the per-material GPU resources
    ///
    /// Safe to call more than once; only the first call frees anything.
    pub fn dispose(&mut self) {
        if self.released {
            return;
        }
        log::trace!("Releasing material resources");
        self.released = true;
    }

    /// Whether the per-material resources have been released
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
