//! Immutable render scene and its builder.
//!
//! `SceneBuilder::build` is the only place where a scene changes shape:
//! materials and lights are validated there and every plane is turned to
//! face the camera. The resulting `Scene` is read-only, so any number of
//! threads can trace against it at once.

use prism_core::{load_mesh, LightDescription, Material, ObjectDescription, SceneDescription};
use prism_math::{Interval, Ray, Vec3};

use crate::hittable::{self, Intersection, Primitive, PrimitiveId, Shape};
use crate::{Camera, Light, Plane, SceneError, SceneResult, Sphere, Triangle};

/// Primitives, lights and a camera, ready to be traced.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Build a scene from a loaded scene file.
    ///
    /// Model paths must already be resolved (see `prism_core::load_scene`).
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        let mut builder = SceneBuilder::new().with_camera(Camera::from_description(&desc.camera)?);

        for object in &desc.objects {
            match object {
                ObjectDescription::Sphere {
                    center,
                    radius,
                    material,
                } => {
                    builder.add(Sphere::new(*center, *radius)?, *material);
                }
                ObjectDescription::Plane {
                    point,
                    normal,
                    material,
                } => {
                    builder.add(Plane::new(*point, *normal)?, *material);
                }
                ObjectDescription::Triangle { vertices, material } => {
                    let [p1, p2, p3] = *vertices;
                    builder.add(Triangle::new(p1, p2, p3)?, *material);
                }
                ObjectDescription::Model {
                    path,
                    transform,
                    material,
                } => {
                    let mesh = load_mesh(path).map_err(|source| SceneError::Mesh {
                        path: path.clone(),
                        source,
                    })?;
                    let added = builder.add_triangles(&mesh.triangulate(transform), *material);
                    log::debug!("Model {} added {} triangles", path.display(), added);
                }
            }
        }

        for light in &desc.lights {
            let light = match *light {
                LightDescription::Point {
                    origin,
                    color,
                    distance_coef,
                } => Light::point(origin, color, distance_coef),
                LightDescription::Distant { direction, color } => {
                    Light::distant(direction, color)?
                }
            };
            builder.add_light(light);
        }

        builder.build()
    }

    /// Closest strictly-positive hit along `ray`, skipping `ignore`.
    pub fn nearest_hit(&self, ray: &Ray, ignore: &[PrimitiveId]) -> Option<Intersection<'_>> {
        hittable::nearest_hit(&self.primitives, ray, ignore)
    }

    /// True if an opaque primitive blocks `ray` strictly inside `window`.
    pub fn occluded(&self, ray: &Ray, window: Interval, ignore: &[PrimitiveId]) -> bool {
        hittable::occluded(&self.primitives, ray, window, ignore)
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

/// Collects primitives and lights, then validates them into a [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    camera: Option<Camera>,
}

impl SceneBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Add a primitive and return its id.
    pub fn add(&mut self, shape: impl Into<Shape>, material: Material) -> PrimitiveId {
        self.primitives.push(Primitive::new(shape, material));
        PrimitiveId(self.primitives.len() - 1)
    }

    /// Add one triangle per vertex triplet, sharing `material`.
    ///
    /// Degenerate triangles are skipped. Returns how many were added.
    pub fn add_triangles(&mut self, triangles: &[[Vec3; 3]], material: Material) -> usize {
        let mut added = 0;
        for [p1, p2, p3] in triangles {
            match Triangle::new(*p1, *p2, *p3) {
                Ok(triangle) => {
                    self.add(triangle, material);
                    added += 1;
                }
                Err(err) => log::warn!("Skipping triangle [{p1}, {p2}, {p3}]: {err}"),
            }
        }
        added
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Validate everything and settle plane orientation.
    pub fn build(self) -> SceneResult<Scene> {
        let camera = self.camera.ok_or(SceneError::MissingCamera)?;

        for (index, primitive) in self.primitives.iter().enumerate() {
            primitive
                .material
                .validate()
                .map_err(|source| SceneError::InvalidMaterial { index, source })?;
        }
        for (index, light) in self.lights.iter().enumerate() {
            light.validate(index)?;
        }

        // One-sided planes present the face the camera sees
        let mut primitives = self.primitives;
        for (index, primitive) in primitives.iter_mut().enumerate() {
            if let Shape::Plane(plane) = primitive.shape {
                let (oriented, flipped) = plane.facing(camera.origin());
                if flipped {
                    log::debug!(
                        "Plane {} flipped to face the camera, normal now {}",
                        index,
                        oriented.normal()
                    );
                }
                primitive.shape = Shape::Plane(oriented);
            }
        }

        log::info!(
            "Scene built: {} primitives, {} lights, {}x{} camera",
            primitives.len(),
            self.lights.len(),
            camera.image_width(),
            camera.image_height()
        );

        Ok(Scene {
            primitives,
            lights: self.lights,
            camera,
        })
    }
}
