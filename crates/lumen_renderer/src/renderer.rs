//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by `max_depth`
//! - Explicit light sampling at diffuse vertices
//! - Anti-aliasing via jittered multi-sampling

use crate::camera::Camera;
use crate::hittable::{Backend, Hittable};
use crate::material::scatter;
use crate::random::gen_f32;
use lumen_core::{Color, Scene};
use lumen_math::{Interval, Ray};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nearest accepted intersection distance. Keeps bounces off their own surface.
pub const T_MIN: f32 = 0.001;

/// Farthest accepted intersection distance.
pub const T_MAX: f32 = 1.0e7;

/// Hard ceiling on path length.
pub const MAX_DEPTH: u32 = 10;

/// Brightness of the sky gradient.
pub const SKY_AMBIENT: f32 = 0.3;

/// Extra damping of the history weight while animating.
pub const ANIMATE_SMOOTHING: f32 = 0.9;

/// Errors reported before any work is done.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Framebuffer has zero width or height")]
    EmptyImage,

    #[error("Framebuffer holds {actual} pixels, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("samples_per_pixel must be at least 1")]
    InvalidSamples,

    #[error("max_depth {requested} exceeds the limit of {limit}")]
    DepthTooLarge { requested: u32, limit: u32 },

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(&'static str),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel per frame
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth, at most [`MAX_DEPTH`]
    pub max_depth: u32,
    /// Shoot shadow rays at emitters from diffuse surfaces
    pub enable_light_sampling: bool,
    /// Jitter ray origins over the lens aperture
    pub enable_depth_of_field: bool,
    /// Favour the newest frame so moving geometry does not smear
    pub animate: bool,
    /// Blend each frame into the history. Off overwrites every frame.
    pub progressive: bool,
    /// Intersection backend
    pub backend: Backend,
    /// Worker threads; 0 lets rayon decide
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 4,
            max_depth: MAX_DEPTH,
            enable_light_sampling: true,
            enable_depth_of_field: true,
            animate: false,
            progressive: true,
            backend: Backend::default(),
            threads: 0,
        }
    }
}

impl RenderConfig {
    /// Check the settings are usable.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSamples);
        }
        if self.max_depth > MAX_DEPTH {
            return Err(RenderError::DepthTooLarge {
                requested: self.max_depth,
                limit: MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// History weight for blending frame `frame_index` into the buffer.
    pub fn blend_factor(&self, frame_index: u32) -> f32 {
        if !self.progressive {
            return 0.0;
        }
        let f = frame_index as f32;
        let lerp = f / (f + 1.0);
        if self.animate {
            lerp * ANIMATE_SMOOTHING
        } else {
            lerp
        }
    }
}

/// Everything a path needs that stays fixed for the whole frame.
#[derive(Clone, Copy)]
pub struct TraceContext<'a> {
    pub scene: &'a Scene,
    pub world: &'a dyn Hittable,
    pub config: &'a RenderConfig,
}

/// Compute the radiance arriving along `ray`.
///
/// `include_emission` is false when the previous vertex already sampled the
/// emitters directly, so hitting one now would count it twice. Every call
/// adds one to `ray_count`.
pub fn trace(
    ray: &Ray,
    depth: u32,
    ctx: &TraceContext,
    rng: &mut dyn RngCore,
    include_emission: bool,
    ray_count: &mut u64,
) -> Color {
    *ray_count += 1;

    let Some(rec) = ctx.world.hit(ray, Interval::new(T_MIN, T_MAX)) else {
        return sky_color(ray);
    };

    let material = ctx.scene.material(rec.sphere);
    if depth < ctx.config.max_depth {
        if let Some(result) = scatter(material, ray, &rec, ctx, rng, ray_count) {
            let sampled_lights = ctx.config.enable_light_sampling && material.is_lambert();
            let emission = if include_emission {
                material.emissive
            } else {
                Color::ZERO
            };
            let incoming = trace(
                &result.scattered,
                depth + 1,
                ctx,
                rng,
                !sampled_lights,
                ray_count,
            );
            return emission + result.direct_light + result.attenuation * incoming;
        }
    }
    material.emissive
}

/// Vertical white to blue gradient, dimmed to [`SKY_AMBIENT`].
pub fn sky_color(ray: &Ray) -> Color {
    let a = 0.5 * (ray.direction.y + 1.0);
    let white = Color::ONE;
    let blue = Color::new(0.5, 0.7, 1.0);
    (white * (1.0 - a) + blue * a) * SKY_AMBIENT
}

/// Average `samples_per_pixel` jittered paths through pixel `(x, y)`.
///
/// Row 0 is the top of the image.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    ctx: &TraceContext,
    camera: &Camera,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rng: &mut dyn RngCore,
    ray_count: &mut u64,
) -> Color {
    let inv_width = 1.0 / width as f32;
    let inv_height = 1.0 / height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..ctx.config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) * inv_width;
        let t = 1.0 - (y as f32 + gen_f32(rng)) * inv_height;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += trace(&ray, 0, ctx, rng, true, ray_count);
    }

    pixel_color / ctx.config.samples_per_pixel as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraParams;
    use crate::random::XorShift32;
    use lumen_core::{Material, Sphere};
    use lumen_math::Vec3;

    fn single_sphere(material: Material) -> Scene {
        Scene::new(vec![Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5)], vec![material]).unwrap()
    }

    fn toward_sphere() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_color(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = sky_color(&Ray::new(Vec3::ZERO, -Vec3::Y));
        let side = sky_color(&Ray::new(Vec3::ZERO, Vec3::X));

        assert!((up - Color::new(0.5, 0.7, 1.0) * 0.3).length() < 1e-6);
        assert!((down - Color::splat(0.3)).length() < 1e-6);
        assert!((side - Color::new(0.75, 0.85, 1.0) * 0.3).length() < 1e-6);
    }

    #[test]
    fn test_miss_returns_sky_and_counts_one_ray() {
        let scene = single_sphere(Material::lambert(Color::splat(0.5)));
        let world = Backend::Scalar.build(&scene);
        let config = RenderConfig::default();
        let ctx = TraceContext {
            scene: &scene,
            world: world.as_ref(),
            config: &config,
        };
        let mut rng = XorShift32::new(1);
        let mut rays = 0;

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let color = trace(&ray, 0, &ctx, &mut rng, true, &mut rays);
        assert_eq!(color, sky_color(&ray));
        assert_eq!(rays, 1);
    }

    #[test]
    fn test_single_sphere_depth_one_counts_two_rays() {
        let scene = single_sphere(Material::lambert(Color::splat(0.5)));
        let config = RenderConfig {
            max_depth: 1,
            ..RenderConfig::default()
        };
        for backend in [Backend::Scalar, Backend::Wide] {
            let world = backend.build(&scene);
            let ctx = TraceContext {
                scene: &scene,
                world: world.as_ref(),
                config: &config,
            };
            let mut rng = XorShift32::new(77);
            let mut rays = 0;

            // primary ray hits, its bounce escapes to the sky
            let color = trace(&toward_sphere(), 0, &ctx, &mut rng, true, &mut rays);
            assert_eq!(rays, 2, "{backend:?}");
            assert!(color.min_element() >= 0.0);
            assert!(color.max_element() <= 0.5 * SKY_AMBIENT + 1e-6);
        }
    }

    #[test]
    fn test_depth_limit_returns_emission_only() {
        let scene = single_sphere(Material::lambert(Color::splat(0.5)).with_emission(Color::splat(2.0)));
        let world = Backend::Scalar.build(&scene);
        let config = RenderConfig {
            max_depth: 0,
            ..RenderConfig::default()
        };
        let ctx = TraceContext {
            scene: &scene,
            world: world.as_ref(),
            config: &config,
        };
        let mut rng = XorShift32::new(3);
        let mut rays = 0;

        let color = trace(&toward_sphere(), 0, &ctx, &mut rng, true, &mut rays);
        assert_eq!(color, Color::splat(2.0));
        assert_eq!(rays, 1);
    }

    #[test]
    fn test_sampled_emission_is_not_counted_twice() {
        let scene = single_sphere(Material::lambert(Color::splat(0.5)).with_emission(Color::splat(2.0)));
        let world = Backend::Scalar.build(&scene);
        let config = RenderConfig {
            max_depth: 0,
            ..RenderConfig::default()
        };
        let ctx = TraceContext {
            scene: &scene,
            world: world.as_ref(),
            config: &config,
        };
        let mut rng = XorShift32::new(3);
        let mut rays = 0;

        // At the depth limit the emissive term is returned regardless
        let color = trace(&toward_sphere(), 0, &ctx, &mut rng, false, &mut rays);
        assert_eq!(color, Color::splat(2.0));

        // Below it, a suppressed vertex contributes no emission of its own
        let config = RenderConfig {
            max_depth: 1,
            ..RenderConfig::default()
        };
        let ctx = TraceContext { config: &config, ..ctx };
        let with = trace(&toward_sphere(), 0, &ctx, &mut XorShift32::new(3), true, &mut rays);
        let without = trace(&toward_sphere(), 0, &ctx, &mut XorShift32::new(3), false, &mut rays);
        assert!((with - without - Color::splat(2.0)).length() < 1e-5);
    }

    #[test]
    fn test_light_sampling_is_a_no_op_without_emitters() {
        let scene = Scene::new(
            vec![
                Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0),
                Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5),
                Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5),
                Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5),
            ],
            vec![
                Material::lambert(Color::new(0.8, 0.8, 0.8)),
                Material::lambert(Color::new(0.8, 0.4, 0.4)),
                Material::metal(Color::new(0.8, 0.8, 0.8), 0.2),
                Material::dielectric(Color::ONE, 1.5),
            ],
        )
        .unwrap();
        let world = Backend::Wide.build(&scene);
        let camera = Camera::new(&CameraParams {
            aspect: 2.0,
            ..CameraParams::default()
        })
        .unwrap();

        let render = |enable_light_sampling: bool| {
            let config = RenderConfig {
                enable_light_sampling,
                ..RenderConfig::default()
            };
            let ctx = TraceContext {
                scene: &scene,
                world: world.as_ref(),
                config: &config,
            };
            let mut rays = 0;
            let mut pixels = Vec::new();
            for y in 0..8 {
                let mut rng = XorShift32::for_row(y, 0);
                for x in 0..16 {
                    pixels.push(render_pixel(&ctx, &camera, x, y, 16, 8, &mut rng, &mut rays));
                }
            }
            (pixels, rays)
        };

        let (on, rays_on) = render(true);
        let (off, rays_off) = render(false);
        assert_eq!(on, off);
        assert_eq!(rays_on, rays_off);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = single_sphere(Material::lambert(Color::splat(0.5)).with_emission(Color::new(1.0, 0.0, 0.0)));
        let world = Backend::Wide.build(&scene);
        let config = RenderConfig::default();
        let ctx = TraceContext {
            scene: &scene,
            world: world.as_ref(),
            config: &config,
        };
        let camera = Camera::new(&CameraParams {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vertical_fov: 20.0,
            aspect: 1.0,
            aperture: 0.0,
            ..CameraParams::default()
        })
        .unwrap();
        let mut rng = XorShift32::new(42);
        let mut rays = 0;

        // centre pixel of a 9x9 image sees only the emitter
        let color = render_pixel(&ctx, &camera, 4, 4, 9, 9, &mut rng, &mut rays);
        assert!(color.x >= 1.0);
        assert!(rays >= config.samples_per_pixel as u64);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());

        let zero_spp = RenderConfig {
            samples_per_pixel: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(zero_spp.validate(), Err(RenderError::InvalidSamples)));

        let too_deep = RenderConfig {
            max_depth: 11,
            ..RenderConfig::default()
        };
        assert!(matches!(
            too_deep.validate(),
            Err(RenderError::DepthTooLarge { requested: 11, limit: 10 })
        ));
    }

    #[test]
    fn test_blend_factor() {
        let config = RenderConfig::default();
        assert_eq!(config.blend_factor(0), 0.0);
        assert!((config.blend_factor(3) - 0.75).abs() < 1e-6);

        let animated = RenderConfig {
            animate: true,
            ..RenderConfig::default()
        };
        assert!((animated.blend_factor(3) - 0.675).abs() < 1e-6);

        let single = RenderConfig {
            progressive: false,
            ..RenderConfig::default()
        };
        assert_eq!(single.blend_factor(100), 0.0);
    }

    #[test]
    fn test_config_from_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"samples_per_pixel": 16, "backend": "scalar"}"#).unwrap();
        assert_eq!(config.samples_per_pixel, 16);
        assert_eq!(config.backend, Backend::Scalar);
        assert_eq!(config.max_depth, MAX_DEPTH);
        assert!(config.enable_light_sampling);
    }
}
