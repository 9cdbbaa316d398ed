//! Built-in demo scene.

use prism_core::{Material, Mesh, MeshTransform, Pattern};
use prism_math::{Color, Vec3};
use prism_renderer::{Camera, Light, Plane, Scene, SceneBuilder, SceneResult, Sphere};

/// Viewport distance; the rest of the layout scales with it.
const M: f64 = 50.0;

/// Square-based pyramid, apex up, unit half-width.
fn pyramid() -> Mesh {
    Mesh {
        positions: vec![
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(0.0, 1.5, 0.0),
        ],
        polygons: vec![
            vec![0, 1, 4],
            vec![1, 2, 4],
            vec![2, 3, 4],
            vec![3, 0, 4],
            vec![0, 3, 2, 1],
        ],
    }
}

/// Mixed spheres between a checkered floor and a back wall, plus a pyramid.
pub fn demo_scene() -> SceneResult<Scene> {
    let camera = Camera::builder()
        .with_position(Vec3::ZERO, Vec3::X)
        .with_viewport(M, M, M)
        .with_resolution(600, 600)
        .build()?;
    let mut builder = SceneBuilder::new().with_camera(camera);

    // Glass
    builder.add(
        Sphere::new(Vec3::new(3.0 * M - 14.0, M / 2.0 - 8.0, -4.0), M / 3.0)?,
        Material::new(Color::new(0.3, 0.6, 0.6)).with_refraction(0.8, 1.3),
    );
    builder.add(
        Sphere::new(Vec3::new(3.0 * M, M / 2.0, 0.0), M / 2.0)?,
        Material::new(Color::new(1.0, 0.0, 0.0)).with_reflective(0.05),
    );
    // Mirror
    builder.add(
        Sphere::new(Vec3::new(3.0 * M, -M / 2.0, -M / 4.0), M / 4.0)?,
        Material::new(Color::ZERO).with_reflective(1.0),
    );
    builder.add(
        Sphere::new(Vec3::new(3.0 * M, 0.2 * M, M), M / 3.0)?,
        Material::new(Color::new(0.0, 1.0, 0.0)).with_reflective(0.1),
    );
    // Glowing orb, unaffected by lighting
    builder.add(
        Sphere::new(Vec3::new(2.5 * M, -0.6 * M, 0.8 * M), 4.0)?,
        Material::constant(Color::new(1.0, 1.0, 0.8)),
    );

    let floor_y = -0.75 * M;
    builder.add(
        Plane::new(Vec3::new(0.0, floor_y, 0.0), Vec3::Y)?,
        Material::new(Color::new(1.0, 0.9, 0.8))
            .with_reflective(0.3)
            .with_pattern(Pattern::Checker { scale: 8.0 }),
    );
    builder.add(
        Plane::new(Vec3::new(4.0 * M + M / 3.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0))?,
        Material::new(Color::new(0.0, 1.0, 1.0)),
    );

    let transform = MeshTransform {
        translation: Vec3::new(2.0 * M, floor_y, -0.9 * M),
        scale: 12.0,
        rotation: Vec3::new(0.0, 0.4, 0.0),
    };
    let added = builder.add_triangles(
        &pyramid().triangulate(&transform),
        Material::new(Color::new(0.9, 0.7, 0.2)).with_reflective(0.2),
    );
    log::debug!("Demo pyramid added {} triangles", added);

    builder.add_light(Light::point(
        Vec3::new(2.0 * M, 1.2 * M, -M),
        Color::ONE,
        prism_core::scene::DEFAULT_DISTANCE_COEF,
    ));
    builder.add_light(Light::distant(
        Vec3::new(1.0, -1.0, 0.5),
        Color::new(0.17, 0.25, 0.4),
    )?);

    builder.build()
}
