//! Sphere primitive for ray tracing.

use crate::{Hittable, Material, ShadePoint};
use rex_math::{BoundingBox, Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    bbox: BoundingBox,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = BoundingBox::new(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, sp: &mut ShadePoint) -> bool {
        if self.is_degenerate() || ray.is_degenerate() {
            return false;
        }

        // Direction is unit length, so the quadratic's `a` term is 1
        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = h - sqrtd;
        if !ray_t.surrounds(root) {
            root = h + sqrtd;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        sp.t = root;
        sp.hit_point = ray.at(root);
        let outward_normal = (sp.hit_point - self.center) / self.radius;
        sp.set_face_normal(ray, outward_normal);
        sp.material = self.material;
        sp.has_hit = true;

        true
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    fn is_degenerate(&self) -> bool {
        !(self.radius > 0.0 && self.radius.is_finite() && self.center.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rex_math::Color;

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::matte(Color::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit_matches_analytic_distance() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut sp = ShadePoint::miss(&ray);

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));
        assert!((sp.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!((sp.normal - Vec3::Z).length() < 1e-5);
        assert!(sp.has_hit);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = grey_sphere(Vec3::ZERO, 2.0);

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut sp = ShadePoint::miss(&ray);

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));
        assert!((sp.t - 2.0).abs() < 1e-5);
        // Normal is flipped to face the ray
        assert!((sp.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut sp = ShadePoint::miss(&ray);

        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));
        assert!(!sp.has_hit);
    }

    #[test]
    fn test_sphere_respects_interval_max() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -10.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut sp = ShadePoint::miss(&ray);

        assert!(!sphere.hit(&ray, Interval::new(0.001, 5.0), &mut sp));
    }

    #[test]
    fn test_zero_radius_sphere_never_hits() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), -3.0);
        assert!(sphere.is_degenerate());

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut sp = ShadePoint::miss(&ray);
        assert!(!sphere.hit(&ray, Interval::new(0.0, f32::INFINITY), &mut sp));
    }

    #[test]
    fn test_sphere_bounds() {
        let sphere = grey_sphere(Vec3::new(1.0, 2.0, 3.0), 2.0);
        let bbox = sphere.bounding_box();
        assert_eq!(bbox.min, Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(bbox.max, Vec3::new(3.0, 4.0, 5.0));
    }
}
