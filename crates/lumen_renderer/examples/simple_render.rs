//! Simple progressive render example.
//!
//! Renders a few frames of the small preset scene and prints the mean
//! pixel value as accumulation settles.

use lumen_core::presets::{preset_scene, preset_view, PresetSize};
use lumen_renderer::{CameraParams, FrameRenderer, Framebuffer, RenderConfig};

fn main() {
    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let scene = preset_scene(PresetSize::Small).expect("preset scene is valid");
    let view = preset_view(PresetSize::Small);

    let (width, height) = (160, 90);
    let camera = CameraParams::from_preset(&view, width as f32 / height as f32);

    let renderer = FrameRenderer::new(RenderConfig::default()).expect("Failed to start renderer");
    let mut framebuffer = Framebuffer::new(width, height);

    for frame in 0..8 {
        let start = std::time::Instant::now();
        let stats = renderer
            .render_frame(&scene, &camera, frame, &mut framebuffer)
            .expect("Failed to render frame");
        let elapsed = start.elapsed();

        let mean = framebuffer.pixels.iter().sum::<lumen_renderer::Vec3>()
            / framebuffer.pixels.len() as f32;
        println!(
            "frame {frame}: {} rays in {:?} ({:.2} Mrays/s), mean {:.4}",
            stats.ray_count,
            elapsed,
            stats.ray_count as f64 / elapsed.as_secs_f64() / 1.0e6,
            mean
        );
    }
}
