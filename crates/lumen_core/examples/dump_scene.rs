//! Example: Write a preset scene as JSON, or inspect a scene file.
//!
//! Run with: cargo run --example dump_scene -- small > small.json
//!           cargo run --example dump_scene -- small.json

use std::env;

use lumen_core::presets::{preset_scene, PresetSize};
use lumen_core::{MaterialKind, Scene};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: dump_scene <small|big|path-to-scene.json>");
        return;
    }

    let arg = &args[1];
    let preset = match arg.as_str() {
        "small" => Some(PresetSize::Small),
        "big" => Some(PresetSize::Big),
        _ => None,
    };

    if let Some(size) = preset {
        let scene = preset_scene(size).expect("preset scene is valid");
        match serde_json::to_string_pretty(&scene) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize scene: {e}"),
        }
        return;
    }

    let text = match std::fs::read_to_string(arg) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {arg}: {e}");
            std::process::exit(1);
        }
    };
    let scene: Scene = match serde_json::from_str(&text) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Invalid scene {arg}: {e}");
            std::process::exit(1);
        }
    };

    println!("=== Scene: {arg} ===");
    println!("Spheres: {}", scene.len());
    println!("Lights: {:?}", scene.emissive());
    println!("Bounds: {:?}", scene.bounds());

    for (i, (sphere, material)) in scene.spheres().iter().zip(scene.materials()).enumerate() {
        let kind = match material.kind {
            MaterialKind::Lambert => "lambert".to_string(),
            MaterialKind::Metal { roughness } => format!("metal (roughness {roughness})"),
            MaterialKind::Dielectric { refractive_index } => {
                format!("dielectric (ior {refractive_index})")
            }
        };
        println!(
            "  [{i:2}] center {:>24} radius {:>7.2} {kind}",
            format!("{}", sphere.center),
            sphere.radius()
        );
    }
}
