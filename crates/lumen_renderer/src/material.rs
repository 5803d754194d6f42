//! Surface scattering for the three material kinds.

use crate::hittable::HitRecord;
use crate::light::sample_lights;
use crate::random::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::renderer::TraceContext;
use lumen_core::{Color, Material, MaterialKind};
use lumen_math::{is_normalized, reflect, refract, schlick, Ray};
use rand::RngCore;

/// Result of scattering a ray off a surface.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Colour filter applied to light arriving along `scattered`
    pub attenuation: Color,
    /// Continuation of the path
    pub scattered: Ray,
    /// Light gathered by explicit light sampling at this vertex
    pub direct_light: Color,
}

/// Scatter an incoming ray.
///
/// Returns `None` if the ray is absorbed. Shadow rays traced by the light
/// sampler are added to `ray_count`.
pub fn scatter(
    material: &Material,
    ray_in: &Ray,
    rec: &HitRecord,
    ctx: &TraceContext,
    rng: &mut dyn RngCore,
    ray_count: &mut u64,
) -> Option<ScatterResult> {
    match material.kind {
        MaterialKind::Lambert => {
            // Cosine-weighted bounce: unit normal plus a point on the unit sphere
            let scattered = Ray::try_new(rec.p, rec.normal + random_unit_vector(rng))?;
            let direct_light = if ctx.config.enable_light_sampling {
                sample_lights(ctx, ray_in, rec, material.albedo, rng, ray_count)
            } else {
                Color::ZERO
            };
            Some(ScatterResult {
                attenuation: material.albedo,
                scattered,
                direct_light,
            })
        }
        MaterialKind::Metal { roughness } => {
            debug_assert!(is_normalized(ray_in.direction) && is_normalized(rec.normal));
            let reflected = reflect(ray_in.direction, rec.normal);
            let scattered =
                Ray::try_new(rec.p, reflected + roughness * random_in_unit_sphere(rng))?;

            // Fuzzed below the surface: absorbed
            if scattered.direction.dot(rec.normal) <= 0.0 {
                return None;
            }
            Some(ScatterResult {
                attenuation: material.albedo,
                scattered,
                direct_light: Color::ZERO,
            })
        }
        MaterialKind::Dielectric { refractive_index } => {
            debug_assert!(is_normalized(ray_in.direction) && is_normalized(rec.normal));
            let rdir = ray_in.direction;
            let d_dot_n = rdir.dot(rec.normal);

            let (outward_normal, nint, cosine) = if d_dot_n > 0.0 {
                // leaving the medium
                (-rec.normal, refractive_index, refractive_index * d_dot_n)
            } else {
                (rec.normal, 1.0 / refractive_index, -d_dot_n)
            };

            let refracted = refract(rdir, outward_normal, nint);
            let reflect_prob = match refracted {
                Some(_) => schlick(cosine, refractive_index),
                None => 1.0,
            };

            let direction = match refracted {
                Some(refr) if gen_f32(rng) >= reflect_prob => refr,
                _ => reflect(rdir, rec.normal),
            };
            let scattered = Ray::try_new(rec.p, direction)?;
            Some(ScatterResult {
                attenuation: Color::ONE,
                scattered,
                direct_light: Color::ZERO,
            })
        }
    }
}
