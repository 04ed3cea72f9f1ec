//! Rex renderer - CPU Whitted-style ray tracing
//!
//! An offline ray tracer over spheres, triangles and axis-aligned boxes.
//! Nearest-hit queries go through an octree, and pixels are rendered in
//! parallel buckets with rayon.

mod bucket;
mod camera;
mod context;
mod cuboid;
mod error;
mod geometry;
mod image_buffer;
mod light;
mod material;
mod octree;
mod renderer;
mod sampler;
mod scene;
mod shade_point;
mod sphere;
mod tracer;
mod triangle;
mod view_plane;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, Projection};
pub use context::SceneContext;
pub use cuboid::Cuboid;
pub use error::{Result, SceneError};
pub use geometry::{Geometry, Hittable};
pub use image_buffer::Image;
pub use light::{AmbientLight, DirectionalLight, Light, LightSource, PointLight};
pub use material::Material;
pub use octree::{Octree, MAX_DEPTH, SPLIT_THRESHOLD};
pub use renderer::{color_to_rgba, linear_to_gamma, render_pixel, RenderConfig, RenderJob};
pub use sampler::{Sampler, SamplerKind, MAX_SAMPLES_PER_PIXEL};
pub use scene::{Scene, MAX_IMAGE_SIZE};
pub use shade_point::ShadePoint;
pub use sphere::Sphere;
pub use tracer::{FlatTracer, RayCastTracer, Tracer, WhittedTracer, DEFAULT_MAX_DEPTH};
pub use triangle::Triangle;
pub use view_plane::ViewPlane;

/// Re-export the math types used throughout the public API
pub use rex_math::{BoundingBox, Color, Interval, Ray, Vec2, Vec3};

/// Offset applied along the surface normal when spawning shadow and
/// reflection rays, and the minimum accepted hit distance.
pub const HIT_EPSILON: f32 = 1e-3;
