//! 8-bit conversion and PNG output.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use lumen_renderer::{Color, Framebuffer};
use std::path::Path;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear colour to 8-bit sRGB-ish RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let channel = |c: f32| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Convert the framebuffer to an image, row 0 at the top.
pub fn to_rgb_image(framebuffer: &Framebuffer) -> RgbImage {
    RgbImage::from_fn(framebuffer.width, framebuffer.height, |x, y| {
        Rgb(color_to_rgb8(framebuffer.get(x, y)))
    })
}

pub fn save_png(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    to_rgb_image(framebuffer)
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Image saved as {}", path.display());
    Ok(())
}
