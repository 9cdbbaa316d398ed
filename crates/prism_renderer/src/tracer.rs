//! Recursive Whitted tracer.
//!
//! A ray picks up the direct lighting at its nearest hit, then spawns at
//! most one reflected and one refracted ray. Recursion is bounded only
//! by `depth`.

use prism_math::{Color, Ray, VectorExt};

use crate::{RenderConfig, Scene};

/// Compute the color seen along `ray` with `depth` bounces left.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32, config: &RenderConfig) -> Color {
    if depth == 0 {
        return config.background;
    }

    let Some(hit) = scene.nearest_hit(ray, &[]) else {
        return config.background;
    };

    let material = hit.material();
    if material.constant_color {
        return material.color;
    }

    let light: Color = scene
        .lights()
        .iter()
        .map(|l| l.contribution(scene, &hit, config))
        .sum();
    let local = material.surface_color(hit.point) * light;

    let mut reflected = Color::ZERO;
    if material.reflective > 0.0 {
        let direction = ray.direction().mirror(hit.normal).unit_or_zero();
        let bounce = Ray::biased(hit.point, direction, config.bias);
        reflected = trace(&bounce, scene, depth - 1, config) * material.reflective;
    }

    let mut refracted = Color::ZERO;
    if material.is_transparent() {
        // Total internal reflection drops the term
        if let Some(direction) = ray
            .direction()
            .refract_through(hit.normal, material.refractive_index)
        {
            let through = Ray::biased(hit.point, direction, config.bias);
            refracted = trace(&through, scene, depth - 1, config);
        }
    }

    local * (1.0 - material.reflective) * (1.0 - material.refractive)
        + reflected
        + refracted * material.refractive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Light, Plane, SceneBuilder, Sphere};
    use prism_core::{Material, Pattern};
    use prism_math::Vec3;

    fn builder() -> SceneBuilder {
        let camera = Camera::builder()
            .with_position(Vec3::ZERO, Vec3::X)
            .with_resolution(4, 4)
            .build()
            .unwrap();
        SceneBuilder::new().with_camera(camera)
    }

    fn close(a: Color, b: Color) -> bool {
        (a - b).abs().max_element() < 1e-9
    }

    #[test]
    fn test_depth_zero_returns_background() {
        let mut b = builder();
        b.add(
            Sphere::new(Vec3::new(50.0, 0.0, 0.0), 5.0).unwrap(),
            Material::constant(Color::ONE),
        );
        let scene = b.build().unwrap();
        let config = RenderConfig::default();

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(trace(&ray, &scene, 0, &config), config.background);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = builder().build().unwrap();
        let config = RenderConfig {
            background: Color::new(0.3, 0.2, 0.1),
            ..Default::default()
        };

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(trace(&ray, &scene, 5, &config), config.background);
    }

    #[test]
    fn test_constant_color_bypasses_lighting() {
        let color = Color::new(0.9, 0.1, 0.4);
        let mut b = builder();
        // Reflective too, still returned as-is
        b.add(
            Sphere::new(Vec3::new(50.0, 0.0, 0.0), 5.0).unwrap(),
            Material::constant(color).with_reflective(0.5),
        );
        b.add_light(Light::point(Vec3::new(0.0, 50.0, 0.0), Color::ONE, 200_000.0));
        let scene = b.build().unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(trace(&ray, &scene, 3, &RenderConfig::default()), color);
    }

    #[test]
    fn test_unlit_surface_is_black() {
        let mut b = builder();
        b.add(
            Sphere::new(Vec3::new(50.0, 0.0, 0.0), 5.0).unwrap(),
            Material::new(Color::ONE),
        );
        let scene = b.build().unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(trace(&ray, &scene, 2, &RenderConfig::default()), Color::ZERO);
    }

    #[test]
    fn test_diffuse_uses_surface_color_times_light() {
        let mut b = builder();
        b.add(
            Sphere::new(Vec3::new(50.0, 0.0, 0.0), 5.0).unwrap(),
            Material::new(Color::new(0.5, 0.25, 1.0)),
        );
        // Behind the camera, straight in line with the hit normal
        b.add_light(Light::distant(Vec3::X, Color::ONE).unwrap());
        let scene = b.build().unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let c = trace(&ray, &scene, 1, &RenderConfig::default());
        assert!(close(c, Color::new(0.5, 0.25, 1.0)));
    }

    #[test]
    fn test_checker_pattern_darkens_cells() {
        let mut b = builder();
        // Hit point is (45, 0, 0); sin(0) counts as positive for y and z
        let material = Material::new(Color::ONE).with_pattern(Pattern::Checker { scale: 1.0 });
        b.add(Sphere::new(Vec3::new(50.0, 0.0, 0.0), 5.0).unwrap(), material);
        b.add_light(Light::distant(Vec3::X, Color::ONE).unwrap());
        let scene = b.build().unwrap();

        let expected = Color::ONE * material.pattern.factor(Vec3::new(45.0, 0.0, 0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let c = trace(&ray, &scene, 1, &RenderConfig::default());
        assert!(close(c, expected));
    }

    #[test]
    fn test_mirror_at_normal_incidence_reflects_back() {
        let behind = Color::new(0.2, 0.4, 0.6);
        let mut b = builder();
        b.add(
            Plane::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)).unwrap(),
            Material::new(Color::ONE).with_reflective(1.0),
        );
        // Behind the camera, only visible in the mirror
        b.add(
            Sphere::new(Vec3::new(-20.0, 0.0, 0.0), 5.0).unwrap(),
            Material::constant(behind),
        );
        let scene = b.build().unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let c = trace(&ray, &scene, 2, &RenderConfig::default());
        assert!(close(c, behind));

        // Not enough depth for the bounce to reach the sphere
        let c = trace(&ray, &scene, 1, &RenderConfig::default());
        assert!(close(c, RenderConfig::default().background));
    }

    #[test]
    fn test_glass_with_unit_index_is_invisible() {
        let behind = Color::new(0.7, 0.3, 0.1);
        let mut b = builder();
        b.add(
            Sphere::new(Vec3::new(50.0, 0.0, 0.0), 5.0).unwrap(),
            Material::new(Color::ONE).with_refraction(1.0, 1.0),
        );
        b.add(
            Sphere::new(Vec3::new(100.0, 0.0, 0.0), 5.0).unwrap(),
            Material::constant(behind),
        );
        let scene = b.build().unwrap();

        // In through the front, out through the back, then the target
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let c = trace(&ray, &scene, 3, &RenderConfig::default());
        assert!(close(c, behind));
    }

    #[test]
    fn test_refraction_bends_towards_normal() {
        let target = Color::new(0.1, 0.8, 0.3);
        let mut b = builder();
        // Half-space of glass starting at x = 10
        b.add(
            Plane::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)).unwrap(),
            Material::new(Color::ONE).with_refraction(1.0, 1.5),
        );

        // Snell: sin(t) = sin(45) / 1.5; the bent ray crosses y = -20 here
        let sin_t = std::f64::consts::FRAC_1_SQRT_2 / 1.5;
        let cos_t = (1.0 - sin_t * sin_t).sqrt();
        let center = Vec3::new(10.0 + 10.0 * cos_t / sin_t, -20.0, 0.0);
        // The undeviated ray passes more than 6 units away
        b.add(Sphere::new(center, 3.0).unwrap(), Material::constant(target));
        let scene = b.build().unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -1.0, 0.0));
        let c = trace(&ray, &scene, 2, &RenderConfig::default());
        assert!(close(c, target));
    }

    #[test]
    fn test_blend_weights() {
        let behind = Color::new(0.5, 0.5, 0.5);
        let mut b = builder();
        b.add(
            Plane::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)).unwrap(),
            Material::new(Color::ONE).with_reflective(0.25),
        );
        b.add(
            Sphere::new(Vec3::new(-20.0, 0.0, 0.0), 5.0).unwrap(),
            Material::constant(behind),
        );
        // Oblique, so the sphere does not shadow the mirror
        b.add_light(Light::distant(Vec3::new(1.0, -1.0, 0.0), Color::ONE).unwrap());
        let scene = b.build().unwrap();

        // local = cos(45) * (1 - 0.25); reflected = 0.5 * 0.25
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let c = trace(&ray, &scene, 2, &RenderConfig::default());
        let expected = std::f64::consts::FRAC_1_SQRT_2 * 0.75 + 0.125;
        assert!(close(c, Color::splat(expected)));
    }

    #[test]
    fn test_total_internal_reflection_drops_refraction() {
        let mut b = builder();
        // Dense glass sphere around the ray origin; the ray exits at a
        // grazing angle, so nothing is transmitted
        b.add(
            Sphere::new(Vec3::ZERO, 10.0).unwrap(),
            Material::new(Color::ONE).with_refraction(1.0, 2.0),
        );
        let scene = b.build().unwrap();

        let ray = Ray::new(Vec3::new(0.0, 9.9, 0.0), Vec3::X);
        let c = trace(&ray, &scene, 2, &RenderConfig::default());
        assert_eq!(c, Color::ZERO);
    }
}
