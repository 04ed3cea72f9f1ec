//! Surface description used by the shading model.

use rex_math::Color;

/// Lambertian-style surface parameters.
///
/// The shading model is `ka * color * ambient + Σ kd * color * radiance * (n·l)`
/// plus, for tracers that recurse, `kr * color * reflected`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base surface color
    pub color: Color,
    /// Ambient reflection coefficient (ka)
    pub ambient: f32,
    /// Diffuse reflection coefficient (kd)
    pub diffuse: f32,
    /// Mirror reflection coefficient (kr), 0 = matte
    pub reflectivity: f32,
}

impl Material {
    /// A plain diffuse surface.
    pub fn matte(color: Color) -> Self {
        Self {
            color,
            ambient: 1.0,
            diffuse: 1.0,
            reflectivity: 0.0,
        }
    }

    /// A diffuse surface that also reflects a fraction of incoming light.
    ///
    /// `reflectivity` is clamped to [0, 1].
    pub fn mirror(color: Color, reflectivity: f32) -> Self {
        Self {
            reflectivity: reflectivity.clamp(0.0, 1.0),
            ..Self::matte(color)
        }
    }

    /// Override the ambient and diffuse coefficients.
    pub fn with_coefficients(mut self, ambient: f32, diffuse: f32) -> Self {
        self.ambient = ambient.max(0.0);
        self.diffuse = diffuse.max(0.0);
        self
    }

    /// Whether a recursive tracer should spawn a reflection ray.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::matte(Color::splat(0.5)) // Grey default
    }
}
