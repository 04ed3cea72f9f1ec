//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{Hittable, Material, ShadePoint};
use rex_math::{BoundingBox, Interval, Ray, Vec3};

/// Determinants below this are treated as a ray parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, zero for degenerate triangles)
    normal: Vec3,
    material: Material,
    bbox: BoundingBox,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        // Pad thin dimensions to avoid zero-volume boxes
        let bbox = BoundingBox::from_points([v0, v1, v2]).expand(0.0002);

        Self {
            v0,
            v1,
            v2,
            normal,
            material,
            bbox,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval, sp: &mut ShadePoint) -> bool {
        if self.is_degenerate() || ray.is_degenerate() {
            return false;
        }

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return false;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return false;
        }

        sp.t = t;
        sp.hit_point = ray.at(t);
        sp.set_face_normal(ray, self.normal);
        sp.material = self.material;
        sp.has_hit = true;

        true
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO || !self.normal.is_finite()
    }
}
