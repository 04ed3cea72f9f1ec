//! Camera for ray generation.

use crate::ViewPlane;
use rex_math::{Ray, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// How view-plane points map to rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Rays fan out from the eye through the view plane.
    #[default]
    Perspective,
    /// Parallel rays along the viewing direction.
    Orthographic,
}

/// Camera for generating rays into the scene.
///
/// The orthonormal basis is recomputed by every setter, so generating a ray
/// only reads the camera and is safe from many threads at once.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    position: Vec3,
    target: Vec3,
    up: Vec3,

    /// Distance from the eye to the view plane
    view_distance: f32,
    zoom: f32,
    projection: Projection,

    // Cached basis (w points from the target back to the eye)
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a perspective camera at (0, 0, 500) looking at the origin.
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 500.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            view_distance: 500.0,
            zoom: 1.0,
            projection: Projection::Perspective,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        };
        camera.update_basis();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3, target: Vec3, up: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self.up = up;
        self.update_basis();
        self
    }

    pub fn with_view_distance(mut self, view_distance: f32) -> Self {
        self.view_distance = view_distance;
        self
    }

    /// Zoom factor; values above 1 magnify the image.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_basis();
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_basis();
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
        self.update_basis();
    }

    pub fn set_view_distance(&mut self, view_distance: f32) {
        self.view_distance = view_distance;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Recompute the u, v, w basis from position, target and up.
    fn update_basis(&mut self) {
        let w = (self.position - self.target).normalize_or_zero();
        self.w = if w == Vec3::ZERO { Vec3::Z } else { w };

        // Up parallel to the view direction: pick any perpendicular
        let u = self.up.cross(self.w).normalize_or_zero();
        self.u = if u == Vec3::ZERO {
            self.w.any_orthonormal_vector()
        } else {
            u
        };
        self.v = self.w.cross(self.u);
    }

    /// Generate the ray through pixel (x, y) at sub-pixel `offset` in `[0, 1)²`.
    ///
    /// Pixel (0, 0) is the top-left corner of the image.
    pub fn generate_ray(&self, x: u32, y: u32, offset: Vec2, view: &ViewPlane) -> Ray {
        let scale = view.pixel_size / self.zoom;
        let px = scale * (x as f32 - 0.5 * view.width as f32 + offset.x);
        let py = scale * (0.5 * view.height as f32 - y as f32 - offset.y);

        match self.projection {
            Projection::Perspective => {
                let direction = px * self.u + py * self.v - self.view_distance * self.w;
                Ray::new(self.position, direction)
            }
            Projection::Orthographic => {
                let origin = self.position + px * self.u + py * self.v;
                Ray::new(origin, -self.w)
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
