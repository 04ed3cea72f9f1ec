//! Tracers turn a ray into a color.
//!
//! All tracers share the same first steps (nearest hit, background on a
//! miss); they differ in how they shade the hit and whether they recurse.

use crate::{SceneContext, HIT_EPSILON};
use rex_math::{Color, Ray, Vec3};

/// Default recursion cap for [`WhittedTracer`].
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Shading entry point for a single ray.
///
/// Implementations are called concurrently from many render threads and
/// must not hold per-call mutable state.
pub trait Tracer: Send + Sync {
    /// Compute the color seen along `ray`. `depth` is 0 for camera rays.
    fn trace(&self, ray: &Ray, ctx: &SceneContext<'_>, depth: u32) -> Color;
}

/// Returns the surface color of the nearest object, unlit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTracer;

impl Tracer for FlatTracer {
    fn trace(&self, ray: &Ray, ctx: &SceneContext<'_>, _depth: u32) -> Color {
        let sp = ctx.hit_objects(ray);
        if sp.has_hit {
            sp.material.color
        } else {
            ctx.background
        }
    }
}

/// Direct lighting only: ambient plus unshadowed lights, no secondary rays.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayCastTracer;

impl Tracer for RayCastTracer {
    fn trace(&self, ray: &Ray, ctx: &SceneContext<'_>, _depth: u32) -> Color {
        let mut sp = ctx.hit_objects(ray);
        if !sp.has_hit {
            return ctx.background;
        }
        ctx.shade_direct(&mut sp);
        sp.color
    }
}

/// Direct lighting plus mirror reflections, recursing up to `max_depth`.
#[derive(Debug, Clone, Copy)]
pub struct WhittedTracer {
    max_depth: u32,
}

impl WhittedTracer {
    /// Create a tracer that stops recursing at `max_depth` (at least 1).
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

impl Default for WhittedTracer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Tracer for WhittedTracer {
    fn trace(&self, ray: &Ray, ctx: &SceneContext<'_>, depth: u32) -> Color {
        // If we've reached max depth, return black (no light)
        if depth >= self.max_depth {
            return Color::ZERO;
        }

        let mut sp = ctx.hit_objects(ray);
        if !sp.has_hit {
            return ctx.background;
        }

        ctx.shade_direct(&mut sp);

        if sp.material.is_reflective() {
            let direction = reflect(sp.ray_direction, sp.normal);
            let reflected = Ray::new(sp.hit_point + sp.normal * HIT_EPSILON, direction);
            let incoming = self.trace(&reflected, ctx, depth + 1);
            sp.color += sp.material.reflectivity * sp.material.color * incoming;
        }

        sp.color
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
