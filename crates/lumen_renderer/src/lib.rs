//! Lumen Renderer - progressive CPU path tracing of sphere scenes.
//!
//! Each call to [`FrameRenderer::render_frame`] traces a few samples per
//! pixel and folds them into an accumulating [`Framebuffer`], so repeated
//! frames of a still scene converge on the noise-free image.

mod camera;
mod frame;
mod hittable;
mod lanes;
mod light;
mod material;
mod random;
mod renderer;

pub use camera::{Camera, CameraParams};
pub use frame::{FrameRenderer, FrameStats, Framebuffer};
pub use hittable::{hit_sphere, Backend, HitRecord, Hittable, SphereList};
pub use lanes::{SphereLanes, LANES};
pub use light::sample_lights;
pub use material::{scatter, ScatterResult};
pub use random::{gen_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector, XorShift32};
pub use renderer::{
    render_pixel, sky_color, trace, RenderConfig, RenderError, RenderResult, TraceContext,
    ANIMATE_SMOOTHING, MAX_DEPTH, SKY_AMBIENT, T_MAX, T_MIN,
};

/// Re-export the scene and math types the renderer's API is written in
pub use lumen_core::{Color, Material, MaterialKind, Scene, Sphere};
pub use lumen_math::{Interval, Ray, Vec3};
