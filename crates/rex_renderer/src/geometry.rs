//! Hittable trait and the closed set of scene geometry.

use crate::{Cuboid, Material, ShadePoint, Sphere, Triangle};
use rex_math::{BoundingBox, Interval, Ray};

/// Trait for shapes that can be hit by rays.
pub trait Hittable {
    /// Test if a ray hits this shape within the given interval.
    ///
    /// Returns true if hit, and fills in the distance, point, normal and
    /// material of the shade point. Malformed shapes report no hit.
    fn hit(&self, ray: &Ray, ray_t: Interval, sp: &mut ShadePoint) -> bool;

    /// Get the axis-aligned bounding box of this shape.
    fn bounding_box(&self) -> BoundingBox;

    /// Whether the shape is malformed and can never be hit.
    fn is_degenerate(&self) -> bool;
}

/// A piece of scene geometry.
///
/// Using an enum keeps per-ray dispatch a plain `match` in the hot loops
/// instead of a virtual call.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Triangle(Triangle),
    Cuboid(Cuboid),
}

impl Geometry {
    /// Get the material of this geometry.
    pub fn material(&self) -> &Material {
        match self {
            Geometry::Sphere(s) => s.material(),
            Geometry::Triangle(t) => t.material(),
            Geometry::Cuboid(c) => c.material(),
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Sphere(_) => "sphere",
            Geometry::Triangle(_) => "triangle",
            Geometry::Cuboid(_) => "cuboid",
        }
    }
}

impl Hittable for Geometry {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval, sp: &mut ShadePoint) -> bool {
        match self {
            Geometry::Sphere(s) => s.hit(ray, ray_t, sp),
            Geometry::Triangle(t) => t.hit(ray, ray_t, sp),
            Geometry::Cuboid(c) => c.hit(ray, ray_t, sp),
        }
    }

    fn bounding_box(&self) -> BoundingBox {
        match self {
            Geometry::Sphere(s) => s.bounding_box(),
            Geometry::Triangle(t) => t.bounding_box(),
            Geometry::Cuboid(c) => c.bounding_box(),
        }
    }

    fn is_degenerate(&self) -> bool {
        match self {
            Geometry::Sphere(s) => s.is_degenerate(),
            Geometry::Triangle(t) => t.is_degenerate(),
            Geometry::Cuboid(c) => c.is_degenerate(),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Self {
        Geometry::Triangle(triangle)
    }
}

impl From<Cuboid> for Geometry {
    fn from(cuboid: Cuboid) -> Self {
        Geometry::Cuboid(cuboid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rex_math::{Color, Vec3};

    #[test]
    fn test_geometry_dispatch() {
        let material = Material::matte(Color::new(1.0, 0.0, 0.0));
        let geometry: Geometry = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, material).into();

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut sp = ShadePoint::miss(&ray);
        assert!(geometry.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));
        assert!((sp.t - 4.0).abs() < 1e-4);
        assert_eq!(sp.material, material);
        assert_eq!(geometry.kind(), "sphere");
        assert_eq!(geometry.material(), &material);
    }
}
