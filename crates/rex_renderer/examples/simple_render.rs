//! Simple ray tracer example.
//!
//! Renders spheres, boxes and a triangle floor with shadows and
//! reflections, then saves the result as a PNG.

use anyhow::Result;
use rex_renderer::{
    AmbientLight, Camera, Color, Cuboid, DirectionalLight, Material, PointLight, RenderConfig,
    SamplerKind, Scene, Sphere, Triangle, Vec3,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = RenderConfig {
        samples_per_pixel: 16,
        sampler: SamplerKind::Jittered,
        seed: 7,
        max_depth: 5,
        background: Color::new(0.05, 0.07, 0.1),
        pixel_size: 1.0,
        ..RenderConfig::default()
    };

    let mut scene = Scene::new().with_config(config);
    build_scene(&mut scene);

    scene.set_camera(
        Camera::new()
            .with_position(
                Vec3::new(0.0, 150.0, 500.0), // look_from
                Vec3::new(0.0, 20.0, 0.0),    // look_at
                Vec3::Y,                      // vup
            )
            .with_view_distance(600.0),
    );

    let start = std::time::Instant::now();
    scene.build(640, 400)?;
    scene.render_to_image()?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    scene.save_image(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene(scene: &mut Scene) {
    // Floor: two large triangles
    let floor = Material::matte(Color::new(0.6, 0.6, 0.55)).with_coefficients(0.3, 0.8);
    let (a, b, c, d) = (
        Vec3::new(-400.0, -40.0, -400.0),
        Vec3::new(400.0, -40.0, -400.0),
        Vec3::new(400.0, -40.0, 400.0),
        Vec3::new(-400.0, -40.0, 400.0),
    );
    scene.add_geometry(Triangle::new(a, c, b, floor));
    scene.add_geometry(Triangle::new(a, d, c, floor));

    // Three main spheres
    scene.add_geometry(Sphere::new(
        Vec3::new(0.0, 20.0, 0.0),
        60.0,
        Material::mirror(Color::new(0.9, 0.9, 0.9), 0.6).with_coefficients(0.1, 0.3),
    ));
    scene.add_geometry(Sphere::new(
        Vec3::new(-140.0, 0.0, 40.0),
        40.0,
        Material::matte(Color::new(0.8, 0.3, 0.2)),
    ));
    scene.add_geometry(Sphere::new(
        Vec3::new(140.0, 0.0, 40.0),
        40.0,
        Material::matte(Color::new(0.2, 0.4, 0.8)),
    ));

    // A ring of small boxes
    for i in 0..12 {
        let angle = i as f32 / 12.0 * std::f32::consts::TAU;
        let center = Vec3::new(angle.cos() * 220.0, -25.0, angle.sin() * 220.0);
        let hue = i as f32 / 12.0;
        scene.add_geometry(Cuboid::new(
            center - Vec3::splat(15.0),
            center + Vec3::splat(15.0),
            Material::matte(Color::new(hue, 1.0 - hue, 0.5)),
        ));
    }

    scene.set_ambient_light(AmbientLight::new(Color::ONE, 0.15));
    scene.add_light(PointLight::new(Vec3::new(200.0, 300.0, 250.0)).with_radiance_scale(0.8));
    scene.add_light(
        DirectionalLight::new(Vec3::new(-1.0, 1.0, 0.5))
            .with_color(Color::new(0.4, 0.45, 0.6))
            .with_cast_shadows(false),
    );
}
