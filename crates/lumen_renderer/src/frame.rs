//! Progressive frame accumulation.
//!
//! Rows of the framebuffer are rendered in parallel on a dedicated rayon
//! pool. Each row draws from its own [`XorShift32`] stream, so the result
//! does not depend on how rows land on threads.

use crate::camera::{Camera, CameraParams};
use crate::random::XorShift32;
use crate::renderer::{render_pixel, RenderConfig, RenderError, RenderResult, TraceContext};
use lumen_core::{Color, Scene};
use rayon::prelude::*;
use rayon::ThreadPool;

/// Linear RGB accumulation buffer, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width, "x {x} outside width {}", self.width);
        y as usize * self.width as usize + x as usize
    }

    /// Reset to black. The next frame rendered at index 0 restarts accumulation.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::ZERO);
    }

    /// Flat `[r, g, b, r, g, b, ...]` view for texture upload.
    pub fn as_f32_slice(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn check(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage);
        }
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(RenderError::BufferSizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

/// Counters from one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Primary, bounce and shadow rays traced
    pub ray_count: u64,
}

/// Renders frames with a fixed configuration on its own thread pool.
pub struct FrameRenderer {
    config: RenderConfig,
    pool: ThreadPool,
}

impl FrameRenderer {
    /// Validate the configuration and spin up the worker pool.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("lumen-row-{i}"))
            .build()?;

        log::info!(
            "Render pool ready: {} threads, {} spp, depth {}, {:?} backend",
            pool.current_num_threads(),
            config.samples_per_pixel,
            config.max_depth,
            config.backend
        );

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one frame of `scene` and blend it into `framebuffer`.
    ///
    /// Frame 0 overwrites whatever the buffer holds. Later frames are
    /// weighted so that the buffer holds the running mean of all frames
    /// (less history when animating, none when not progressive).
    pub fn render_frame(
        &self,
        scene: &Scene,
        camera_params: &CameraParams,
        frame_index: u32,
        framebuffer: &mut Framebuffer,
    ) -> RenderResult<FrameStats> {
        framebuffer.check()?;

        let world = self.config.backend.build(scene);
        let camera = Camera::new(camera_params)?;
        let camera = if self.config.enable_depth_of_field {
            camera
        } else {
            camera.without_depth_of_field()
        };
        let ctx = TraceContext {
            scene,
            world: world.as_ref(),
            config: &self.config,
        };

        let lerp = self.config.blend_factor(frame_index);
        let width = framebuffer.width;
        let height = framebuffer.height;
        let pixels = &mut framebuffer.pixels;

        let ray_count: u64 = self.pool.install(|| {
            pixels
                .par_chunks_mut(width as usize)
                .enumerate()
                .map(|(y, row)| {
                    let y = y as u32;
                    let mut rng = XorShift32::for_row(y, frame_index);
                    let mut rays = 0;
                    for (x, pixel) in row.iter_mut().enumerate() {
                        let color =
                            render_pixel(&ctx, &camera, x as u32, y, width, height, &mut rng, &mut rays);
                        *pixel = if lerp > 0.0 {
                            *pixel * lerp + color * (1.0 - lerp)
                        } else {
                            color
                        };
                    }
                    rays
                })
                .sum()
        });

        log::debug!("Frame {frame_index}: {ray_count} rays, blend {lerp:.3}");
        Ok(FrameStats { ray_count })
    }
}
