//! Scene assembly and the build/render lifecycle.
//!
//! A [`Scene`] collects geometry, lights and a camera, then goes through two
//! steps:
//! - [`Scene::build`] validates the setup, builds the sampler and octree and
//!   allocates the output image.
//! - [`Scene::render_to_image`] renders buckets in parallel with rayon and
//!   writes each pixel exactly once.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use rex_math::{Color, Ray, Vec3};

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::renderer::{RenderConfig, RenderJob};
use crate::{
    AmbientLight, Camera, Geometry, Hittable, Image, Light, Octree, Result, Sampler, SceneContext,
    SceneError, ShadePoint, Tracer, ViewPlane, WhittedTracer, MAX_SAMPLES_PER_PIXEL,
};

/// Largest accepted image edge, in pixels.
pub const MAX_IMAGE_SIZE: u32 = 2048;

/// Everything needed to render one image.
pub struct Scene {
    config: RenderConfig,
    view_plane: ViewPlane,
    camera: Option<Camera>,
    geometry: Vec<Geometry>,
    lights: Vec<Light>,
    ambient_light: Option<AmbientLight>,
    /// Falls back to a [`WhittedTracer`] capped at `config.max_depth`
    tracer: Option<Box<dyn Tracer>>,
    sampler: Sampler,

    // Produced by build()
    octree: Option<Octree>,
    image: Option<Image>,
}

impl Scene {
    /// Create an empty scene with the default configuration.
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
            view_plane: ViewPlane::default(),
            camera: None,
            geometry: Vec::new(),
            lights: Vec::new(),
            ambient_light: None,
            tracer: None,
            sampler: Sampler::default(),
            octree: None,
            image: None,
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the render configuration. Takes effect on the next build.
    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Add an object and return its index.
    ///
    /// Degenerate objects are kept but can never be hit. Adding geometry
    /// invalidates a previous build.
    pub fn add_geometry(&mut self, object: impl Into<Geometry>) -> usize {
        let object = object.into();
        if object.is_degenerate() {
            log::warn!(
                "Degenerate {} added to scene; it will never be hit",
                object.kind()
            );
        }

        self.geometry.push(object);
        self.octree = None;
        self.geometry.len() - 1
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn set_ambient_light(&mut self, ambient: AmbientLight) {
        self.ambient_light = Some(ambient);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    /// Move the camera, creating a default one looking at the origin if needed.
    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera
            .get_or_insert_with(Camera::new)
            .set_position(position);
    }

    pub fn set_tracer(&mut self, tracer: impl Tracer + 'static) {
        self.tracer = Some(Box::new(tracer));
    }

    pub fn set_background(&mut self, background: Color) {
        self.config.background = background;
    }

    pub fn background(&self) -> Color {
        self.config.background
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn geometry(&self) -> &[Geometry] {
        &self.geometry
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn ambient_light(&self) -> Option<&AmbientLight> {
        self.ambient_light.as_ref()
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn view_plane(&self) -> &ViewPlane {
        &self.view_plane
    }

    /// The octree from the last successful build.
    pub fn octree(&self) -> Option<&Octree> {
        self.octree.as_ref()
    }

    /// The output image, once built.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Validate the scene and prepare it for a `width × height` render.
    pub fn build(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 || width > MAX_IMAGE_SIZE || height > MAX_IMAGE_SIZE {
            return Err(SceneError::InvalidDimensions { width, height });
        }
        if self.camera.is_none() {
            return Err(SceneError::MissingCamera);
        }
        if self.config.samples_per_pixel == 0 {
            return Err(SceneError::NoSamples);
        }
        if self.config.samples_per_pixel > MAX_SAMPLES_PER_PIXEL {
            return Err(SceneError::TooManySamples {
                count: self.config.samples_per_pixel,
            });
        }

        let image = Image::try_new(width, height)?;

        self.sampler = Sampler::new(
            self.config.sampler,
            self.config.samples_per_pixel,
            self.config.seed,
        );
        self.view_plane = ViewPlane {
            width,
            height,
            pixel_size: self.config.pixel_size,
            sample_count: self.sampler.len() as u32,
        };

        let octree = Octree::build(&self.geometry);
        log::info!(
            "Built scene: {}x{}, {} objects, {} lights, {} samples/pixel",
            width,
            height,
            self.geometry.len(),
            self.lights.len(),
            self.sampler.len()
        );
        log::info!(
            "Octree: {} nodes, {} leaves, max depth {}",
            octree.node_count(),
            octree.leaf_count(),
            octree.max_depth()
        );

        self.octree = Some(octree);
        self.image = Some(image);
        Ok(())
    }

    /// Shared read-only view of the built scene.
    pub fn context(&self) -> Result<SceneContext<'_>> {
        let octree = self.octree.as_ref().ok_or(SceneError::NotBuilt)?;
        Ok(SceneContext::new(&self.geometry, octree)
            .with_lights(&self.lights)
            .with_ambient(self.ambient_light.as_ref())
            .with_background(self.config.background))
    }

    /// Nearest intersection of `ray` with the built scene.
    pub fn hit_objects(&self, ray: &Ray) -> Result<ShadePoint> {
        Ok(self.context()?.hit_objects(ray))
    }

    /// Render every pixel into the image allocated by [`Scene::build`].
    pub fn render_to_image(&mut self) -> Result<()> {
        let results = self.render_buckets()?;
        let image = self.image.as_mut().ok_or(SceneError::NotBuilt)?;

        for result in &results {
            result.write_into(image);
        }
        Ok(())
    }

    fn render_buckets(&self) -> Result<Vec<BucketResult>> {
        let ctx = self.context()?;
        let camera = self.camera.as_ref().ok_or(SceneError::MissingCamera)?;

        let default_tracer;
        let tracer: &dyn Tracer = match &self.tracer {
            Some(tracer) => tracer.as_ref(),
            None => {
                default_tracer = WhittedTracer::new(self.config.max_depth);
                &default_tracer
            }
        };

        let job = RenderJob {
            camera,
            sampler: &self.sampler,
            view_plane: &self.view_plane,
            tracer,
            ctx,
        };

        let buckets = generate_buckets(
            self.view_plane.width,
            self.view_plane.height,
            self.config.bucket_size,
        );
        log::info!(
            "Rendering {}x{} in {} buckets",
            self.view_plane.width,
            self.view_plane.height,
            buckets.len()
        );

        let start = Instant::now();
        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, &job))
            .collect();
        log::info!("Render finished in {:.2?}", start.elapsed());

        Ok(results)
    }

    /// Save the rendered image; the format follows the file extension.
    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let image = self.image.as_ref().ok_or(SceneError::NotBuilt)?;
        image.save(path.as_ref())?;
        log::info!("Saved image to {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatTracer, Material, PointLight, SamplerKind, Sphere, Triangle};

    fn camera() -> Camera {
        Camera::new()
            .with_position(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, Vec3::Y)
            .with_view_distance(100.0)
    }

    #[test]
    fn test_build_rejects_bad_dimensions() {
        let mut scene = Scene::new();
        scene.set_camera(camera());

        for (w, h) in [(0, 10), (10, 0), (MAX_IMAGE_SIZE + 1, 10), (10, MAX_IMAGE_SIZE + 1)] {
            assert!(matches!(
                scene.build(w, h),
                Err(SceneError::InvalidDimensions { .. })
            ));
        }
        assert!(scene.build(MAX_IMAGE_SIZE, 1).is_ok());
    }

    #[test]
    fn test_build_requires_camera_and_samples() {
        let mut scene = Scene::new();
        assert!(matches!(scene.build(4, 4), Err(SceneError::MissingCamera)));

        scene.set_camera(camera());
        scene.set_config(RenderConfig {
            samples_per_pixel: 0,
            ..RenderConfig::default()
        });
        assert!(matches!(scene.build(4, 4), Err(SceneError::NoSamples)));
    }

    #[test]
    fn test_build_rejects_oversized_sample_count() {
        let mut scene = Scene::new().with_config(RenderConfig {
            samples_per_pixel: u32::MAX,
            ..RenderConfig::default()
        });
        scene.set_camera(camera());

        assert!(matches!(
            scene.build(4, 4),
            Err(SceneError::TooManySamples { count: u32::MAX })
        ));
        assert!(scene.image().is_none());

        scene.set_config(RenderConfig {
            samples_per_pixel: MAX_SAMPLES_PER_PIXEL,
            ..RenderConfig::default()
        });
        assert!(scene.build(1, 1).is_ok());
        assert_eq!(scene.sampler().len(), MAX_SAMPLES_PER_PIXEL as usize);
    }

    #[test]
    fn test_render_before_build_fails() {
        let mut scene = Scene::new();
        scene.set_camera(camera());

        assert!(matches!(scene.render_to_image(), Err(SceneError::NotBuilt)));
        assert!(matches!(
            scene.hit_objects(&Ray::new(Vec3::ZERO, Vec3::Z)),
            Err(SceneError::NotBuilt)
        ));
        assert!(scene.image().is_none());
    }

    #[test]
    fn test_adding_geometry_invalidates_build() {
        let mut scene = Scene::new();
        scene.set_camera(camera());
        scene.build(2, 2).unwrap();
        assert!(scene.octree().is_some());

        let index = scene.add_geometry(Sphere::new(Vec3::ZERO, 1.0, Material::default()));
        assert_eq!(index, 0);
        assert!(scene.octree().is_none());
        assert!(matches!(scene.render_to_image(), Err(SceneError::NotBuilt)));

        // The image survives a failed render
        assert!(scene.image().is_some());
    }

    #[test]
    fn test_build_applies_config() {
        let mut scene = Scene::new().with_config(RenderConfig {
            samples_per_pixel: 9,
            sampler: SamplerKind::Jittered,
            seed: 3,
            pixel_size: 0.5,
            ..RenderConfig::default()
        });
        scene.set_camera(camera());
        scene.build(8, 6).unwrap();

        assert_eq!(scene.sampler().len(), 9);
        assert_eq!(scene.sampler().kind(), SamplerKind::Jittered);
        assert_eq!(scene.view_plane().pixel_size, 0.5);
        assert_eq!(scene.view_plane().sample_count, 9);
        let image = scene.image().unwrap();
        assert_eq!((image.width(), image.height()), (8, 6));
    }

    #[test]
    fn test_hit_objects_after_build() {
        let mut scene = Scene::new();
        scene.set_camera(camera());
        scene.add_geometry(Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Material::default(),
        ));
        let sphere = scene.add_geometry(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Material::default()));
        scene.build(2, 2).unwrap();

        let sp = scene
            .hit_objects(&Ray::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z))
            .unwrap();
        assert!(sp.has_hit);
        assert_eq!(sp.geometry, Some(sphere));
        assert!((sp.t - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_flat_render_fills_every_pixel() {
        let red = Color::new(1.0, 0.0, 0.0);
        let mut scene = Scene::new();
        scene.set_camera(camera());
        scene.set_tracer(FlatTracer);
        scene.set_background(Color::Z);
        // Big enough to cover the whole view
        scene.add_geometry(Sphere::new(Vec3::ZERO, 50.0, Material::matte(red)));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 200.0)));
        scene.build(5, 3).unwrap();
        scene.render_to_image().unwrap();

        let image = scene.image().unwrap();
        assert!(image.pixels().iter().all(|c| *c == red));
    }

    #[test]
    fn test_set_camera_position_creates_camera() {
        let mut scene = Scene::new();
        scene.set_camera_position(Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(scene.camera().map(Camera::position), Some(Vec3::new(0.0, 0.0, 10.0)));
    }
}
