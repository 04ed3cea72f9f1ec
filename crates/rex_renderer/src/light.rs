//! Light sources.
//!
//! Every light exposes the same capability set through [`LightSource`]. The
//! scene keeps at most one [`AmbientLight`] plus a list of [`Light`]s, a
//! closed enum dispatched with `match`.

use crate::{SceneContext, ShadePoint, HIT_EPSILON};
use rex_math::{Color, Ray, Vec3};

/// Capabilities shared by all lights.
pub trait LightSource {
    /// Unit direction from the hit point toward the light.
    fn direction(&self, sp: &ShadePoint) -> Vec3;

    /// Incident radiance at the hit point.
    fn radiance(&self, sp: &ShadePoint) -> Color;

    /// Whether `ray` (a shadow ray leaving the hit point) is blocked before
    /// reaching the light.
    fn in_shadow(&self, ray: &Ray, sp: &ShadePoint, ctx: &SceneContext<'_>) -> bool;

    /// Whether this light takes part in occlusion testing.
    fn casts_shadows(&self) -> bool;

    fn set_cast_shadows(&mut self, value: bool);

    /// Shadow ray toward this light, nudged off the surface to avoid self-hits.
    fn shadow_ray(&self, sp: &ShadePoint) -> Ray {
        Ray::new(sp.hit_point + sp.normal * HIT_EPSILON, self.direction(sp))
    }
}

/// Constant, directionless light filling the whole scene.
///
/// [`SceneContext::shade_direct`] always adds the ambient term and never
/// consults [`LightSource::in_shadow`] for it, so enabling shadows here has
/// no effect on the built-in tracers. The flag only changes what
/// `in_shadow` reports to callers that query it directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    color: Color,
    radiance_scale: f32,
    cast_shadows: bool,
}

impl AmbientLight {
    /// Create a new ambient light. Ambient occlusion is off by default.
    pub fn new(color: Color, radiance_scale: f32) -> Self {
        Self {
            color,
            radiance_scale,
            cast_shadows: false,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radiance_scale(&self) -> f32 {
        self.radiance_scale
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_radiance_scale(&mut self, radiance_scale: f32) {
        self.radiance_scale = radiance_scale;
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(Color::ONE, 1.0)
    }
}

impl LightSource for AmbientLight {
    /// Ambient light has no single incoming direction; callers must not
    /// build shadow rays from this.
    fn direction(&self, _sp: &ShadePoint) -> Vec3 {
        Vec3::ZERO
    }

    fn radiance(&self, _sp: &ShadePoint) -> Color {
        self.color * self.radiance_scale
    }

    /// With shadows enabled, the point is occluded when anything at all lies along `ray`.
    fn in_shadow(&self, ray: &Ray, _sp: &ShadePoint, ctx: &SceneContext<'_>) -> bool {
        self.cast_shadows && ctx.occluded(ray, f32::INFINITY)
    }

    fn casts_shadows(&self) -> bool {
        self.cast_shadows
    }

    fn set_cast_shadows(&mut self, value: bool) {
        self.cast_shadows = value;
    }
}

/// Omnidirectional light at a point, with constant intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    position: Vec3,
    color: Color,
    radiance_scale: f32,
    cast_shadows: bool,
}

impl PointLight {
    /// Create a white point light of unit scale that casts shadows.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: Color::ONE,
            radiance_scale: 1.0,
            cast_shadows: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_radiance_scale(mut self, radiance_scale: f32) -> Self {
        self.radiance_scale = radiance_scale;
        self
    }

    pub fn with_cast_shadows(mut self, value: bool) -> Self {
        self.cast_shadows = value;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radiance_scale(&self) -> f32 {
        self.radiance_scale
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_radiance_scale(&mut self, radiance_scale: f32) {
        self.radiance_scale = radiance_scale;
    }
}

impl LightSource for PointLight {
    fn direction(&self, sp: &ShadePoint) -> Vec3 {
        (self.position - sp.hit_point).normalize_or_zero()
    }

    fn radiance(&self, _sp: &ShadePoint) -> Color {
        self.color * self.radiance_scale
    }

    fn in_shadow(&self, ray: &Ray, _sp: &ShadePoint, ctx: &SceneContext<'_>) -> bool {
        if !self.cast_shadows {
            return false;
        }
        let distance = self.position.distance(ray.origin());
        ctx.occluded(ray, distance)
    }

    fn casts_shadows(&self) -> bool {
        self.cast_shadows
    }

    fn set_cast_shadows(&mut self, value: bool) {
        self.cast_shadows = value;
    }
}

/// Light arriving from a fixed direction, as from a very distant source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing toward the light
    direction: Vec3,
    color: Color,
    radiance_scale: f32,
    cast_shadows: bool,
}

impl DirectionalLight {
    /// `toward_light` is normalized; the light shines along its negation.
    pub fn new(toward_light: Vec3) -> Self {
        Self {
            direction: toward_light.normalize_or_zero(),
            color: Color::ONE,
            radiance_scale: 1.0,
            cast_shadows: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_radiance_scale(mut self, radiance_scale: f32) -> Self {
        self.radiance_scale = radiance_scale;
        self
    }

    pub fn with_cast_shadows(mut self, value: bool) -> Self {
        self.cast_shadows = value;
        self
    }
}

impl LightSource for DirectionalLight {
    fn direction(&self, _sp: &ShadePoint) -> Vec3 {
        self.direction
    }

    fn radiance(&self, _sp: &ShadePoint) -> Color {
        self.color * self.radiance_scale
    }

    fn in_shadow(&self, ray: &Ray, _sp: &ShadePoint, ctx: &SceneContext<'_>) -> bool {
        self.cast_shadows && ctx.occluded(ray, f32::INFINITY)
    }

    fn casts_shadows(&self) -> bool {
        self.cast_shadows
    }

    fn set_cast_shadows(&mut self, value: bool) {
        self.cast_shadows = value;
    }
}

/// A non-ambient scene light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
}

impl LightSource for Light {
    #[inline]
    fn direction(&self, sp: &ShadePoint) -> Vec3 {
        match self {
            Light::Point(l) => l.direction(sp),
            Light::Directional(l) => l.direction(sp),
        }
    }

    #[inline]
    fn radiance(&self, sp: &ShadePoint) -> Color {
        match self {
            Light::Point(l) => l.radiance(sp),
            Light::Directional(l) => l.radiance(sp),
        }
    }

    fn in_shadow(&self, ray: &Ray, sp: &ShadePoint, ctx: &SceneContext<'_>) -> bool {
        match self {
            Light::Point(l) => l.in_shadow(ray, sp, ctx),
            Light::Directional(l) => l.in_shadow(ray, sp, ctx),
        }
    }

    fn casts_shadows(&self) -> bool {
        match self {
            Light::Point(l) => l.casts_shadows(),
            Light::Directional(l) => l.casts_shadows(),
        }
    }

    fn set_cast_shadows(&mut self, value: bool) {
        match self {
            Light::Point(l) => l.set_cast_shadows(value),
            Light::Directional(l) => l.set_cast_shadows(value),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometry, Material, Octree, Sphere};

    fn hit_at(point: Vec3, normal: Vec3) -> ShadePoint {
        ShadePoint {
            has_hit: true,
            t: 1.0,
            hit_point: point,
            normal,
            ..ShadePoint::default()
        }
    }

    fn occluder_scene() -> (Vec<Geometry>, Octree) {
        // Occluding sphere between the origin and a light at z = 20
        let geometry: Vec<Geometry> =
            vec![Sphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0, Material::default()).into()];
        let octree = Octree::build(&geometry);
        (geometry, octree)
    }

    #[test]
    fn test_ambient_radiance_ignores_shade_point() {
        let ambient = AmbientLight::new(Color::new(0.1, 0.2, 0.3), 2.0);
        let expected = Color::new(0.2, 0.4, 0.6);

        let points = [
            ShadePoint::default(),
            hit_at(Vec3::new(5.0, -3.0, 1.0), Vec3::Y),
            hit_at(Vec3::splat(1e6), -Vec3::X),
        ];
        for sp in points {
            assert!((ambient.radiance(&sp) - expected).length() < 1e-6);
            assert_eq!(ambient.direction(&sp), Vec3::ZERO);
        }
    }

    #[test]
    fn test_ambient_not_in_shadow_unless_enabled() {
        let (geometry, octree) = occluder_scene();
        let ctx = SceneContext::new(&geometry, &octree);
        let sp = hit_at(Vec3::ZERO, Vec3::Z);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let mut ambient = AmbientLight::default();
        assert!(!ambient.casts_shadows());
        assert!(!ambient.in_shadow(&ray, &sp, &ctx));

        ambient.set_cast_shadows(true);
        assert!(ambient.in_shadow(&ray, &sp, &ctx));
    }

    #[test]
    fn test_point_light_direction_and_radiance() {
        let light = PointLight::new(Vec3::new(0.0, 10.0, 0.0))
            .with_color(Color::new(1.0, 0.5, 0.0))
            .with_radiance_scale(3.0);
        let sp = hit_at(Vec3::ZERO, Vec3::Y);

        assert!((light.direction(&sp) - Vec3::Y).length() < 1e-6);
        assert_eq!(light.radiance(&sp), Color::new(3.0, 1.5, 0.0));

        // Constant intensity: no falloff with distance
        let far = hit_at(Vec3::new(0.0, -1000.0, 0.0), Vec3::Y);
        assert_eq!(light.radiance(&far), light.radiance(&sp));
    }

    #[test]
    fn test_point_light_shadowed_by_occluder() {
        let (geometry, octree) = occluder_scene();
        let ctx = SceneContext::new(&geometry, &octree);
        let light = PointLight::new(Vec3::new(0.0, 0.0, 20.0));

        let sp = hit_at(Vec3::ZERO, Vec3::Z);
        let ray = light.shadow_ray(&sp);
        assert!(light.in_shadow(&ray, &sp, &ctx));

        // Off to the side, nothing in between
        let clear = hit_at(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        let ray = light.shadow_ray(&clear);
        assert!(!light.in_shadow(&ray, &clear, &ctx));
    }

    #[test]
    fn test_point_light_ignores_geometry_beyond_light() {
        let (geometry, octree) = occluder_scene();
        let ctx = SceneContext::new(&geometry, &octree);

        // Light sits in front of the sphere
        let light = PointLight::new(Vec3::new(0.0, 0.0, 5.0));
        let sp = hit_at(Vec3::ZERO, Vec3::Z);
        assert!(!light.in_shadow(&light.shadow_ray(&sp), &sp, &ctx));
    }

    #[test]
    fn test_disabled_shadows_skip_occlusion() {
        let (geometry, octree) = occluder_scene();
        let ctx = SceneContext::new(&geometry, &octree);
        let mut light: Light = PointLight::new(Vec3::new(0.0, 0.0, 20.0)).into();
        light.set_cast_shadows(false);

        let sp = hit_at(Vec3::ZERO, Vec3::Z);
        assert!(!light.casts_shadows());
        assert!(!light.in_shadow(&light.shadow_ray(&sp), &sp, &ctx));
    }

    #[test]
    fn test_directional_light() {
        let (geometry, octree) = occluder_scene();
        let ctx = SceneContext::new(&geometry, &octree);
        let light: Light = DirectionalLight::new(Vec3::new(0.0, 0.0, 2.0)).into();

        let sp = hit_at(Vec3::ZERO, Vec3::Z);
        assert_eq!(light.direction(&sp), Vec3::Z);
        assert_eq!(light.radiance(&sp), Color::ONE);
        assert!(light.in_shadow(&light.shadow_ray(&sp), &sp, &ctx));

        let clear = hit_at(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(!light.in_shadow(&light.shadow_ray(&clear), &clear, &ctx));
    }
}
