//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it on all cores and saves the
//! result in PPM format.

use prism_core::{Material, Pattern};
use prism_renderer::{
    render_parallel, Camera, Color, ImageBuffer, Light, Plane, RenderConfig, Scene,
    SceneBuilder, SceneResult, Sphere, Vec3, DEFAULT_BUCKET_SIZE,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Prism Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!(
        "Scene with {} primitives built in {:?}",
        scene.primitives().len(),
        start.elapsed()
    );

    let config = RenderConfig {
        max_depth: 4,
        ..Default::default()
    };

    let camera = scene.camera();
    println!(
        "Rendering {}x{} @ depth {}...",
        camera.image_width(),
        camera.image_height(),
        config.max_depth
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&scene, &config, DEFAULT_BUCKET_SIZE);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> SceneResult<Scene> {
    let camera = Camera::builder()
        .with_position(Vec3::new(-40.0, 10.0, 0.0), Vec3::new(1.0, -0.1, 0.0))
        .with_viewport(64.0, 36.0, 40.0)
        .with_resolution(800, 450)
        .build()?;
    let mut builder = SceneBuilder::new().with_camera(camera);

    // Checkered floor
    builder.add(
        Plane::new(Vec3::new(0.0, -10.0, 0.0), Vec3::Y)?,
        Material::new(Color::new(0.9, 0.9, 0.9)).with_pattern(Pattern::Checker { scale: 8.0 }),
    );

    // Mirror, matte and glass spheres
    builder.add(
        Sphere::new(Vec3::new(80.0, 5.0, -25.0), 15.0)?,
        Material::new(Color::new(0.7, 0.6, 0.5)).with_reflective(0.7),
    );
    builder.add(
        Sphere::new(Vec3::new(100.0, 0.0, 20.0), 10.0)?,
        Material::new(Color::new(0.8, 0.3, 0.2)),
    );
    builder.add(
        Sphere::new(Vec3::new(50.0, -2.0, 5.0), 8.0)?,
        Material::new(Color::ONE).with_refraction(0.9, 1.5),
    );

    builder.add_light(Light::point(Vec3::new(40.0, 80.0, 30.0), Color::ONE, 200_000.0));
    builder.add_light(Light::distant(
        Vec3::new(1.0, -1.0, -0.5),
        Color::new(0.2, 0.2, 0.25),
    )?);

    builder.build()
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = image.get(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}
