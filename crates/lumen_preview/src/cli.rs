use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_core::presets::PresetSize;
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scene to render when no scene file is given
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneSize {
    Small,
    Big,
}

impl From<SceneSize> for PresetSize {
    fn from(size: SceneSize) -> Self {
        match size {
            SceneSize::Small => PresetSize::Small,
            SceneSize::Big => PresetSize::Big,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen_preview")]
#[command(about = "Render progressive frames of a sphere scene without a window")]
pub struct Args {
    /// JSON file with `render` and `camera` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON scene file; overrides --scene
    #[arg(long)]
    pub scene_file: Option<PathBuf>,

    /// Built-in scene
    #[arg(long, value_enum, default_value = "big")]
    pub scene: SceneSize,

    /// Image width in pixels
    #[arg(long, default_value = "640")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "360")]
    pub height: u32,

    /// Number of progressive frames to render
    #[arg(short, long, default_value = "16")]
    pub frames: u32,

    /// Samples per pixel per frame (overrides the config file)
    #[arg(short = 's', long)]
    pub samples_per_pixel: Option<u32>,

    /// Worker threads, 0 for one per core (overrides the config file)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Move the preset spheres between frames
    #[arg(long)]
    pub animate: bool,

    /// Seconds of scene time per frame when animating
    #[arg(long, default_value = "0.033")]
    pub time_step: f32,

    /// Write the final buffer as a gamma-corrected PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
