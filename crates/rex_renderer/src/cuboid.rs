//! Axis-aligned box primitive.

use crate::{Hittable, Material, ShadePoint};
use rex_math::{BoundingBox, Interval, Ray, Vec3};

const PARALLEL_EPSILON: f32 = 1e-8;

/// A solid axis-aligned box.
#[derive(Debug, Clone)]
pub struct Cuboid {
    bounds: BoundingBox,
    material: Material,
}

impl Cuboid {
    /// Create a box spanning the two corners.
    pub fn new(a: Vec3, b: Vec3, material: Material) -> Self {
        Self {
            bounds: BoundingBox::new(a, b),
            material,
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval, sp: &mut ShadePoint) -> bool {
        if self.is_degenerate() || ray.is_degenerate() {
            return false;
        }

        let (min, max) = (self.bounds.min, self.bounds.max);
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut near_axis = 0;
        let mut far_axis = 0;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];

            if dir.abs() < PARALLEL_EPSILON {
                if origin < min[axis] || origin > max[axis] {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (min[axis] - origin) * inv;
            let mut t1 = (max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_near {
                t_near = t0;
                near_axis = axis;
            }
            if t1 < t_far {
                t_far = t1;
                far_axis = axis;
            }
            if t_near > t_far {
                return false;
            }
        }

        // Entering face first, exit face when starting inside
        let (t, axis) = if ray_t.surrounds(t_near) {
            (t_near, near_axis)
        } else if ray_t.surrounds(t_far) {
            (t_far, far_axis)
        } else {
            return false;
        };

        let hit_point = ray.at(t);
        let mut outward_normal = Vec3::ZERO;
        outward_normal[axis] = if hit_point[axis] > self.bounds.center()[axis] {
            1.0
        } else {
            -1.0
        };

        sp.t = t;
        sp.hit_point = hit_point;
        sp.set_face_normal(ray, outward_normal);
        sp.material = self.material;
        sp.has_hit = true;

        true
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    fn is_degenerate(&self) -> bool {
        let size = self.bounds.size();
        !(size.min_element() > 0.0 && size.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cuboid() -> Cuboid {
        Cuboid::new(Vec3::splat(-1.0), Vec3::splat(1.0), Material::default())
    }

    #[test]
    fn test_cuboid_hit_front_face() {
        let cuboid = unit_cuboid();
        let ray = Ray::new(Vec3::new(0.2, 0.3, 5.0), -Vec3::Z);
        let mut sp = ShadePoint::miss(&ray);

        assert!(cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));
        assert!((sp.t - 4.0).abs() < 1e-5);
        assert_eq!(sp.normal, Vec3::Z);
    }

    #[test]
    fn test_cuboid_hit_from_inside() {
        let cuboid = unit_cuboid();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let mut sp = ShadePoint::miss(&ray);

        assert!(cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));
        assert!((sp.t - 1.0).abs() < 1e-5);
        assert_eq!(sp.normal, -Vec3::Y);
    }

    #[test]
    fn test_cuboid_miss_and_flat_box() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), -Vec3::Z);
        let mut sp = ShadePoint::miss(&ray);
        assert!(!unit_cuboid().hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));

        let flat = Cuboid::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Material::default());
        assert!(flat.is_degenerate());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        assert!(!flat.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut sp));
    }
}
