//! Explicit sampling of spherical emitters.
//!
//! At a diffuse vertex one shadow ray is aimed at each emissive sphere,
//! uniformly inside the cone the sphere subtends. The sample counts only if
//! the shadow ray reaches that same sphere first.

use crate::hittable::HitRecord;
use crate::random::gen_f32;
use crate::renderer::{TraceContext, T_MAX, T_MIN};
use lumen_core::Color;
use lumen_math::{orthonormal_basis, Interval, Ray};
use rand::RngCore;
use std::f32::consts::PI;

/// Direct light reaching `rec` from every emitter except the sphere that
/// was hit. Each shadow ray is added to `ray_count`.
pub fn sample_lights(
    ctx: &TraceContext,
    ray_in: &Ray,
    rec: &HitRecord,
    albedo: Color,
    rng: &mut dyn RngCore,
    ray_count: &mut u64,
) -> Color {
    // Normal facing the side the ray came from
    let nl = if rec.normal.dot(ray_in.direction) < 0.0 {
        rec.normal
    } else {
        -rec.normal
    };

    let mut total = Color::ZERO;
    for &light in ctx.scene.emissive() {
        if light == rec.sphere {
            continue;
        }
        let sphere = ctx.scene.sphere(light);
        let to_center = sphere.center - rec.p;
        let dist_sq = to_center.length_squared();
        let Some(sw) = to_center.try_normalize() else {
            continue;
        };
        let (su, sv, sw) = orthonormal_basis(sw);

        let radius = sphere.radius();
        let cos_a_max = (1.0 - radius * radius / dist_sq).max(0.0).sqrt();
        let eps1 = gen_f32(rng);
        let eps2 = gen_f32(rng);
        let cos_a = 1.0 - eps1 + eps1 * cos_a_max;
        let sin_a = (1.0 - cos_a * cos_a).max(0.0).sqrt();
        let phi = 2.0 * PI * eps2;
        let Some(l) = (su * (phi.cos() * sin_a) + sv * (phi.sin() * sin_a) + sw * cos_a)
            .try_normalize()
        else {
            continue;
        };

        *ray_count += 1;
        let shadow = Ray::new(rec.p, l);
        let Some(shadow_hit) = ctx.world.hit(&shadow, Interval::new(T_MIN, T_MAX)) else {
            continue;
        };
        if shadow_hit.sphere != light {
            continue;
        }

        let omega = 2.0 * PI * (1.0 - cos_a_max);
        let emissive = ctx.scene.material(light).emissive;
        total += albedo * (emissive * (l.dot(nl).max(0.0) * omega)) / PI;
    }
    total
}
