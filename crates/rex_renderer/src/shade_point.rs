//! Transient hit record passed through the shading pipeline.

use crate::Material;
use rex_math::{Color, Ray, Vec3};

/// Record of a ray evaluation: where (and whether) it hit, and the color
/// gathered there so far.
///
/// A fresh `ShadePoint` is created for every trace call and dropped when it
/// returns. Scene-wide queries (shadow rays, secondary rays) go through an
/// explicit [`SceneContext`](crate::SceneContext) rather than a back-pointer.
#[derive(Debug, Clone, Copy)]
pub struct ShadePoint {
    /// Whether the ray hit anything
    pub has_hit: bool,
    /// Distance along the ray to the hit
    pub t: f32,
    /// Point of intersection
    pub hit_point: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Direction of the ray that produced this hit
    pub ray_direction: Vec3,
    /// Material of the surface that was hit
    pub material: Material,
    /// Index of the hit object in the scene's geometry list
    pub geometry: Option<usize>,
    /// Color accumulated by shading
    pub color: Color,
}

impl Default for ShadePoint {
    fn default() -> Self {
        Self {
            has_hit: false,
            t: f32::INFINITY,
            hit_point: Vec3::ZERO,
            normal: Vec3::ZERO,
            ray_direction: Vec3::ZERO,
            material: Material::default(),
            geometry: None,
            color: Color::ZERO,
        }
    }
}

impl ShadePoint {
    /// An empty record for `ray`, before any intersection test.
    pub fn miss(ray: &Ray) -> Self {
        Self {
            ray_direction: ray.direction(),
            ..Self::default()
        }
    }

    /// Set the normal so it faces against the incoming ray.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.normal = if ray.direction().dot(outward_normal) < 0.0 {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_record() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        let sp = ShadePoint::miss(&ray);

        assert!(!sp.has_hit);
        assert_eq!(sp.t, f32::INFINITY);
        assert_eq!(sp.ray_direction, -Vec3::Z);
        assert!(sp.geometry.is_none());
    }

    #[test]
    fn test_face_normal_points_against_ray() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut sp = ShadePoint::miss(&ray);

        sp.set_face_normal(&ray, Vec3::Z);
        assert_eq!(sp.normal, Vec3::Z);

        sp.set_face_normal(&ray, -Vec3::Z);
        assert_eq!(sp.normal, Vec3::Z);
    }
}
