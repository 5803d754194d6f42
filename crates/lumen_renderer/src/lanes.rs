//! Wide sphere backend: four spheres per step.
//!
//! Sphere data is stored as separate coordinate arrays padded to a multiple of
//! four. Padding slots hold radius-zero spheres parked far outside the scene
//! bounds, further away than any accepted `t`, so they can never win a lane.

use crate::hittable::{make_record, HitRecord, Hittable};
use glam::Vec4;
use lumen_core::Scene;
use lumen_math::{is_normalized, Interval, Ray, Vec3};

/// Number of spheres tested per step.
pub const LANES: usize = 4;

/// Distance beyond the scene bounds at which padding spheres are parked.
const PHANTOM_DISTANCE: f32 = 1.0e8;

/// Structure-of-arrays sphere set.
#[derive(Debug, Clone, Default)]
pub struct SphereLanes {
    center_x: Vec<f32>,
    center_y: Vec<f32>,
    center_z: Vec<f32>,
    sq_radius: Vec<f32>,
    inv_radius: Vec<f32>,
    count: usize,
}

impl SphereLanes {
    /// Copy the geometry out of a scene into padded lanes, deriving the
    /// reciprocal radii from the current radii.
    pub fn from_scene(scene: &Scene) -> Self {
        let count = scene.len();
        let padded = count.div_ceil(LANES) * LANES;

        let bounds = scene.bounds();
        let phantom = if bounds.is_empty() {
            Vec3::splat(PHANTOM_DISTANCE)
        } else {
            bounds.max() + Vec3::splat(PHANTOM_DISTANCE)
        };

        let mut lanes = Self {
            center_x: Vec::with_capacity(padded),
            center_y: Vec::with_capacity(padded),
            center_z: Vec::with_capacity(padded),
            sq_radius: Vec::with_capacity(padded),
            inv_radius: Vec::with_capacity(padded),
            count,
        };
        for sphere in scene.spheres() {
            let radius = sphere.radius();
            lanes.push(sphere.center, radius * radius, 1.0 / radius);
        }
        for _ in count..padded {
            lanes.push(phantom, 0.0, 0.0);
        }
        lanes
    }

    fn push(&mut self, center: Vec3, sq_radius: f32, inv_radius: f32) {
        self.center_x.push(center.x);
        self.center_y.push(center.y);
        self.center_z.push(center.z);
        self.sq_radius.push(sq_radius);
        self.inv_radius.push(inv_radius);
    }

    /// Number of slots including padding.
    pub fn padded_len(&self) -> usize {
        self.center_x.len()
    }

    fn center(&self, index: usize) -> Vec3 {
        Vec3::new(self.center_x[index], self.center_y[index], self.center_z[index])
    }
}

impl Hittable for SphereLanes {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        debug_assert!(is_normalized(ray.direction));
        let t_min = Vec4::splat(ray_t.min);
        let mut hit_t = Vec4::splat(ray_t.max);
        let mut ids = [usize::MAX; LANES];

        let orig_x = Vec4::splat(ray.origin.x);
        let orig_y = Vec4::splat(ray.origin.y);
        let orig_z = Vec4::splat(ray.origin.z);
        let dir_x = Vec4::splat(ray.direction.x);
        let dir_y = Vec4::splat(ray.direction.y);
        let dir_z = Vec4::splat(ray.direction.z);

        let blocks = self
            .center_x
            .chunks_exact(LANES)
            .zip(self.center_y.chunks_exact(LANES))
            .zip(self.center_z.chunks_exact(LANES))
            .zip(self.sq_radius.chunks_exact(LANES));

        for (block, (((cx, cy), cz), sq_r)) in blocks.enumerate() {
            let co_x = Vec4::from_slice(cx) - orig_x;
            let co_y = Vec4::from_slice(cy) - orig_y;
            let co_z = Vec4::from_slice(cz) - orig_z;
            let b = co_x * dir_x + co_y * dir_y + co_z * dir_z;
            let c = co_x * co_x + co_y * co_y + co_z * co_z - Vec4::from_slice(sq_r);
            let discr = b * b - c;
            let discr_pos = discr.cmpgt(Vec4::ZERO);
            if !discr_pos.any() {
                continue;
            }

            let discr_sq = Vec4::from_array(discr.to_array().map(f32::sqrt));
            let t0 = b - discr_sq;
            let t1 = b + discr_sq;
            // earlier root if it is past t_min, otherwise the later one
            let t = Vec4::select(t0.cmpgt(t_min), t0, t1);
            let mask = discr_pos & t.cmpgt(t_min) & t.cmplt(hit_t);

            hit_t = Vec4::select(mask, t, hit_t);
            let bits = mask.bitmask();
            for (lane, id) in ids.iter_mut().enumerate() {
                if bits & (1 << lane) != 0 {
                    *id = block * LANES + lane;
                }
            }
        }

        let min_t = hit_t.min_element();
        if min_t >= ray_t.max {
            return None;
        }

        // on an exact tie the lowest sphere index wins, as in the scalar scan
        let tied = hit_t.cmpeq(Vec4::splat(min_t)).bitmask();
        let index = (0..LANES)
            .filter(|lane| tied & (1 << lane) != 0)
            .map(|lane| ids[lane])
            .min()
            .unwrap_or(usize::MAX);
        if index >= self.count {
            return None;
        }

        Some(make_record(ray, min_t, self.center(index), self.inv_radius[index], index))
    }

    fn len(&self) -> usize {
        self.count
    }
}
