//! Read-only view of a built scene, shared by every unit of render work.

use crate::{AmbientLight, Geometry, Light, LightSource, Octree, ShadePoint};
use rex_math::{Color, Ray};

/// Everything a tracer or light needs to query the scene.
///
/// This is passed explicitly down the call chain instead of hit records
/// pointing back at their scene. It only borrows immutable data, so one
/// context can be shared across all render threads.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    pub geometry: &'a [Geometry],
    pub octree: &'a Octree,
    pub lights: &'a [Light],
    pub ambient: Option<&'a AmbientLight>,
    pub background: Color,
}

impl<'a> SceneContext<'a> {
    /// A context with no lights and a black background.
    pub fn new(geometry: &'a [Geometry], octree: &'a Octree) -> Self {
        Self {
            geometry,
            octree,
            lights: &[],
            ambient: None,
            background: Color::ZERO,
        }
    }

    pub fn with_lights(mut self, lights: &'a [Light]) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_ambient(mut self, ambient: Option<&'a AmbientLight>) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Nearest intersection of `ray` with the scene.
    #[inline]
    pub fn hit_objects(&self, ray: &Ray) -> ShadePoint {
        self.octree.intersect(ray, self.geometry)
    }

    /// Whether anything blocks `ray` closer than `max_distance`.
    #[inline]
    pub fn occluded(&self, ray: &Ray, max_distance: f32) -> bool {
        self.octree.occluded(ray, max_distance, self.geometry)
    }

    /// Accumulate direct lighting at a hit into `sp.color`.
    ///
    /// The ambient term is always added. Each other light adds
    /// `kd * color * radiance * (n·l)` when it faces the surface and is not
    /// shadowed; lights behind the surface contribute nothing.
    pub fn shade_direct(&self, sp: &mut ShadePoint) {
        let material = sp.material;
        let mut color = Color::ZERO;

        if let Some(ambient) = self.ambient {
            color += material.ambient * material.color * ambient.radiance(sp);
        }

        for light in self.lights {
            let wi = light.direction(sp);
            let n_dot_wi = sp.normal.dot(wi);
            if n_dot_wi <= 0.0 {
                continue;
            }
            if light.casts_shadows() && light.in_shadow(&light.shadow_ray(sp), sp, self) {
                continue;
            }
            color += material.diffuse * material.color * light.radiance(sp) * n_dot_wi;
        }

        sp.color += color;
    }
}
