//! Hittable trait, HitRecord and the scalar sphere backend.

use crate::lanes::SphereLanes;
use lumen_core::Scene;
use lumen_math::{is_normalized, Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Record of an accepted ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit surface normal (not flipped towards the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index of the sphere (and its material) in the scene
    pub sphere: usize,
}

/// Nearest-hit query against a set of spheres.
pub trait Hittable: Send + Sync {
    /// Find the closest intersection with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Number of real (non-padding) spheres.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which intersection backend to trace against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One sphere at a time.
    Scalar,
    /// Four spheres per step, structure-of-arrays.
    #[default]
    Wide,
}

impl Backend {
    /// Snapshot the scene's geometry into this backend's layout. Built once
    /// per frame, so edits made between frames are always picked up.
    pub fn build(self, scene: &Scene) -> Box<dyn Hittable> {
        match self {
            Backend::Scalar => Box::new(SphereList::from_scene(scene)),
            Backend::Wide => Box::new(SphereLanes::from_scene(scene)),
        }
    }
}

/// Per-sphere data in the layout the scalar test wants.
#[derive(Debug, Clone, Copy)]
struct SphereEntry {
    center: Vec3,
    sq_radius: f32,
    inv_radius: f32,
}

/// Scalar backend: a linear scan over every sphere.
#[derive(Debug, Clone, Default)]
pub struct SphereList {
    spheres: Vec<SphereEntry>,
}

impl SphereList {
    /// Copy the geometry out of a scene, deriving the reciprocal radii from
    /// the current radii.
    pub fn from_scene(scene: &Scene) -> Self {
        let spheres = scene
            .spheres()
            .iter()
            .map(|s| SphereEntry {
                center: s.center,
                sq_radius: s.radius() * s.radius(),
                inv_radius: 1.0 / s.radius(),
            })
            .collect();
        Self { spheres }
    }
}

impl Hittable for SphereList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        debug_assert!(is_normalized(ray.direction));
        let mut closest: Option<(f32, usize)> = None;
        let mut closest_so_far = ray_t.max;

        for (index, sphere) in self.spheres.iter().enumerate() {
            let interval = ray_t.with_max(closest_so_far);
            if let Some(t) = hit_sphere(ray, sphere.center, sphere.sq_radius, interval) {
                closest_so_far = t;
                closest = Some((t, index));
            }
        }

        closest.map(|(t, index)| {
            let sphere = &self.spheres[index];
            make_record(ray, t, sphere.center, sphere.inv_radius, index)
        })
    }

    fn len(&self) -> usize {
        self.spheres.len()
    }
}

/// Ray-sphere root selection.
///
/// Solves `t² - 2bt + c = 0` with `oc = center - origin`, `b = oc·d` and
/// `c = oc·oc - r²` (the direction is unit length). Returns the smaller root
/// if it lies inside `ray_t`, otherwise the larger one if that does.
#[inline]
pub fn hit_sphere(ray: &Ray, center: Vec3, sq_radius: f32, ray_t: Interval) -> Option<f32> {
    let oc = center - ray.origin;
    let b = oc.x * ray.direction.x + oc.y * ray.direction.y + oc.z * ray.direction.z;
    let c = oc.x * oc.x + oc.y * oc.y + oc.z * oc.z - sq_radius;
    let discr = b * b - c;
    if discr <= 0.0 {
        return None;
    }

    let discr_sq = discr.sqrt();
    let t0 = b - discr_sq;
    if ray_t.surrounds(t0) {
        return Some(t0);
    }
    let t1 = b + discr_sq;
    if ray_t.surrounds(t1) {
        return Some(t1);
    }
    None
}

/// Fill in a hit record. Shared by both backends so they agree bit for bit.
#[inline]
pub(crate) fn make_record(ray: &Ray, t: f32, center: Vec3, inv_radius: f32, sphere: usize) -> HitRecord {
    let p = ray.at(t);
    let normal = (p - center) * inv_radius;
    debug_assert!(is_normalized(normal));
    HitRecord { p, normal, t, sphere }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::presets::{preset_scene, PresetSize};
    use lumen_core::{Color, Material, Sphere};

    const RAY_T: Interval = Interval::new(0.001, 1.0e7);

    fn scene_of(spheres: Vec<Sphere>) -> Scene {
        let materials = vec![Material::lambert(Color::splat(0.5)); spheres.len()];
        Scene::new(spheres, materials).unwrap()
    }

    fn unit_sphere_scene() -> Scene {
        scene_of(vec![Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5)])
    }

    fn backends(scene: &Scene) -> Vec<(Backend, Box<dyn Hittable>)> {
        [Backend::Scalar, Backend::Wide]
            .into_iter()
            .map(|b| (b, b.build(scene)))
            .collect()
    }

    #[test]
    fn test_sphere_hit() {
        let scene = unit_sphere_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for (backend, world) in backends(&scene) {
            let rec = world.hit(&ray, RAY_T).unwrap();
            assert!((rec.t - 0.5).abs() < 1e-6, "{backend:?}");
            assert_eq!(rec.sphere, 0);
            assert!((rec.normal - Vec3::Z).length() < 1e-6);
            assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-6);
        }
    }

    #[test]
    fn test_sphere_miss() {
        let scene = unit_sphere_scene();
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        for (backend, world) in backends(&scene) {
            assert!(world.hit(&ray, RAY_T).is_none(), "{backend:?}");
        }
    }

    #[test]
    fn test_tangent_ray_misses() {
        // discriminant exactly zero is not a hit
        let scene = scene_of(vec![Sphere::new(Vec3::new(0.0, 1.0, -2.0), 1.0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for (backend, world) in backends(&scene) {
            assert!(world.hit(&ray, RAY_T).is_none(), "{backend:?}");
        }
    }

    #[test]
    fn test_root_selection() {
        // Roots at t = 2 and t = 4
        let center = Vec3::new(0.0, 0.0, -3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let near = hit_sphere(&ray, center, 1.0, Interval::new(0.001, 100.0)).unwrap();
        assert!((near - 2.0).abs() < 1e-6);

        // near root excluded by t_min, far root returned
        let far = hit_sphere(&ray, center, 1.0, Interval::new(2.5, 100.0)).unwrap();
        assert!((far - 4.0).abs() < 1e-6);

        // both excluded
        assert!(hit_sphere(&ray, center, 1.0, Interval::new(0.001, 1.5)).is_none());
        assert!(hit_sphere(&ray, center, 1.0, Interval::new(4.5, 100.0)).is_none());
    }

    #[test]
    fn test_hit_from_inside_returns_far_root() {
        let scene = unit_sphere_scene();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        for (backend, world) in backends(&scene) {
            let rec = world.hit(&ray, RAY_T).unwrap();
            assert!((rec.t - 0.5).abs() < 1e-6, "{backend:?}");
            // outward normal, same side as the ray
            assert!(rec.normal.dot(ray.direction) > 0.0);
        }
    }

    #[test]
    fn test_nearest_of_several() {
        let scene = scene_of(vec![
            Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0),
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0),
            Sphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0),
            Sphere::new(Vec3::new(0.0, 5.0, -5.0), 1.0),
            Sphere::new(Vec3::new(0.0, 0.0, -3.0), 0.5),
        ]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for (backend, world) in backends(&scene) {
            let rec = world.hit(&ray, RAY_T).unwrap();
            assert_eq!(rec.sphere, 4, "{backend:?}");
            assert!((rec.t - 2.5).abs() < 1e-6);

            let limited = world.hit(&ray, Interval::new(0.001, 2.0));
            assert!(limited.is_none());
        }
    }

    #[test]
    fn test_resized_sphere_gets_unit_normals() {
        let mut scene = unit_sphere_scene();
        scene.set_sphere_radius(0, 0.25).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for (backend, world) in backends(&scene) {
            let rec = world.hit(&ray, RAY_T).unwrap();
            assert!((rec.t - 0.75).abs() < 1e-6, "{backend:?}");
            assert!((rec.normal - Vec3::Z).length() < 1e-6, "{backend:?}");
        }
    }

    #[test]
    fn test_backends_agree_on_preset() {
        let scene = preset_scene(PresetSize::Big).unwrap();
        let scalar = Backend::Scalar.build(&scene);
        let wide = Backend::Wide.build(&scene);
        assert_eq!(scalar.len(), 46);
        assert_eq!(wide.len(), 46);

        let origin = Vec3::new(0.0, 2.0, 3.0);
        for i in 0..64 {
            for j in 0..32 {
                let target = Vec3::new(
                    -6.0 + 12.0 * i as f32 / 63.0,
                    -1.0 + 4.0 * j as f32 / 31.0,
                    -4.0,
                );
                let ray = Ray::new(origin, (target - origin).normalize());
                assert_eq!(scalar.hit(&ray, RAY_T), wide.hit(&ray, RAY_T), "ray {i},{j}");
            }
        }
    }
}
