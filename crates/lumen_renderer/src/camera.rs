//! Thin-lens camera for ray generation.

use crate::random::random_in_unit_disk;
use crate::renderer::{RenderError, RenderResult};
use lumen_core::presets::PresetView;
use lumen_math::{Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// User-facing camera placement and lens settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view, top to bottom, in degrees
    pub vertical_fov: f32,
    /// Image width over height
    pub aspect: f32,
    /// Lens diameter. 0 gives a pinhole camera.
    pub aperture: f32,
    /// Distance from the lens to the plane of perfect focus
    pub focus_distance: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(0.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            vertical_fov: 60.0,
            aspect: 16.0 / 9.0,
            aperture: 0.1,
            focus_distance: 3.0,
        }
    }
}

impl CameraParams {
    /// Place the camera where a preset scene expects it.
    pub fn from_preset(view: &PresetView, aspect: f32) -> Self {
        Self {
            look_from: view.look_from,
            look_at: view.look_at,
            up: view.up,
            vertical_fov: view.vertical_fov,
            aspect,
            aperture: view.aperture,
            focus_distance: view.focus_distance,
        }
    }
}

/// Camera with its image plane precomputed. Immutable once built.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Build the camera basis and image plane.
    ///
    /// Fails when the lens settings are out of range or the view direction
    /// is zero or parallel to `up`, since no basis exists then.
    pub fn new(params: &CameraParams) -> RenderResult<Self> {
        if !(params.vertical_fov > 0.0 && params.vertical_fov < 180.0) {
            return Err(RenderError::DegenerateCamera("vertical_fov must be inside (0, 180)"));
        }
        if !(params.aspect > 0.0 && params.aspect.is_finite()) {
            return Err(RenderError::DegenerateCamera("aspect must be positive"));
        }
        if !(params.aperture >= 0.0 && params.aperture.is_finite()) {
            return Err(RenderError::DegenerateCamera("aperture must not be negative"));
        }
        if !(params.focus_distance > 0.0 && params.focus_distance.is_finite()) {
            return Err(RenderError::DegenerateCamera("focus_distance must be positive"));
        }
        let w = (params.look_from - params.look_at)
            .try_normalize()
            .ok_or(RenderError::DegenerateCamera("look_from and look_at coincide"))?;
        let u = params
            .up
            .cross(w)
            .try_normalize()
            .ok_or(RenderError::DegenerateCamera("up is parallel to the view direction"))?;
        let v = w.cross(u);

        let lens_radius = params.aperture / 2.0;
        let theta = params.vertical_fov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = params.aspect * half_height;
        let focus = params.focus_distance;
        let origin = params.look_from;

        let lower_left_corner =
            origin - half_width * focus * u - half_height * focus * v - focus * w;
        let horizontal = 2.0 * half_width * focus * u;
        let vertical = 2.0 * half_height * focus * v;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius,
        })
    }

    /// Same camera with the lens closed down to a pinhole.
    pub fn without_depth_of_field(mut self) -> Self {
        self.lens_radius = 0.0;
        self
    }

    /// Generate a ray through image-plane coordinates `(s, t)`.
    ///
    /// `s` runs left to right and `t` bottom to top, both over `[0, 1]`.
    /// With an open lens the origin is jittered over the aperture disk.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        // target lies on the focus plane and the offset on the lens plane,
        // so the difference is never zero for a camera that passed `new`
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        let direction = (target - self.origin - offset).normalize();
        Ray::new(self.origin + offset, direction)
    }
}
