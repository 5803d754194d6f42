mod cli;
mod output;
mod settings;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use lumen_core::presets::{animate, preset_scene, preset_view, PresetSize};
use lumen_renderer::{CameraParams, FrameRenderer, Framebuffer};
use settings::{load_scene, Settings};
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lumen preview");

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(spp) = args.samples_per_pixel {
        settings.render.samples_per_pixel = spp;
    }
    if let Some(threads) = args.threads {
        settings.render.threads = threads;
    }
    settings.render.animate |= args.animate;

    let size = PresetSize::from(args.scene);
    let base = match &args.scene_file {
        Some(path) => load_scene(path)?,
        None => preset_scene(size)?,
    };
    let aspect = args.width as f32 / args.height.max(1) as f32;
    let camera = settings
        .camera
        .unwrap_or_else(|| CameraParams::from_preset(&preset_view(size), aspect));

    log::info!(
        "Rendering {} spheres at {}x{}, {} frames",
        base.len(),
        args.width,
        args.height,
        args.frames
    );

    let animating = settings.render.animate;
    let renderer = FrameRenderer::new(settings.render)?;
    let mut framebuffer = Framebuffer::new(args.width, args.height);

    let mut total_rays = 0u64;
    let mut total_time = Duration::ZERO;
    for frame in 0..args.frames {
        let moved;
        let scene = if animating {
            moved = animate(&base, frame as f32 * args.time_step)?;
            &moved
        } else {
            &base
        };

        let start = Instant::now();
        let stats = renderer.render_frame(scene, &camera, frame, &mut framebuffer)?;
        let elapsed = start.elapsed();

        total_rays += stats.ray_count;
        total_time += elapsed;
        log::info!(
            "Frame {frame}: {:.2} ms, {:.2} Mrays/s",
            elapsed.as_secs_f64() * 1000.0,
            mrays_per_second(stats.ray_count, elapsed)
        );
    }

    if args.frames > 0 {
        log::info!(
            "Done: {} rays in {:.2} s, {:.2} Mrays/s average",
            total_rays,
            total_time.as_secs_f64(),
            mrays_per_second(total_rays, total_time)
        );
    }

    if let Some(path) = &args.output {
        output::save_png(&framebuffer, path)?;
    }

    Ok(())
}

fn mrays_per_second(rays: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        rays as f64 / secs / 1.0e6
    } else {
        0.0
    }
}
