//! Reflection, refraction and the other vector helpers used by the materials.

use crate::Vec3;

/// How far `|v|` may drift from 1.0 and still count as unit length.
pub const NORMALIZED_TOLERANCE: f32 = 0.01;

/// Returns true if `v` is unit length within [`NORMALIZED_TOLERANCE`].
#[inline]
pub fn is_normalized(v: Vec3) -> bool {
    (v.length() - 1.0).abs() <= NORMALIZED_TOLERANCE
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` facing the incoming side.
///
/// `nint` is the ratio of refractive indices (incident over transmitted).
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(v: Vec3, n: Vec3, nint: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discr = 1.0 - nint * nint * (1.0 - dt * dt);
    if discr > 0.0 {
        Some(nint * (uv - n * dt) - n * discr.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for Fresnel reflectance.
#[inline]
pub fn schlick(cosine: f32, ri: f32) -> f32 {
    let r0 = (1.0 - ri) / (1.0 + ri);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Build an orthonormal frame `(u, v, w)` whose `w` axis is `w`.
///
/// `w` must already be unit length.
#[inline]
pub fn orthonormal_basis(w: Vec3) -> (Vec3, Vec3, Vec3) {
    let helper = if w.x.abs() > 0.01 { Vec3::Y } else { Vec3::X };
    let u = helper.cross(w).normalize();
    let v = w.cross(u);
    (u, v, w)
}
