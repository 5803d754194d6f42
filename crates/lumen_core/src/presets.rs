//! Built-in test scenes.
//!
//! Two sizes of the same layout: a ground sphere with a row of diffuse, metal
//! and glass balls lit by a small warm light. The big variant adds four rows
//! of 9 graded spheres and a second, blue light.

use lumen_math::Vec3;

use crate::material::{Color, Material};
use crate::scene::{Scene, SceneResult};
use crate::sphere::Sphere;

/// Which preset to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresetSize {
    /// 9 spheres, 1 light.
    Small,
    /// 46 spheres, 2 lights.
    #[default]
    Big,
}

/// Camera placement used with the presets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetView {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub vertical_fov: f32,
    pub aperture: f32,
    pub focus_distance: f32,
}

/// The view the presets were composed for.
pub fn preset_view(size: PresetSize) -> PresetView {
    let aperture = match size {
        PresetSize::Small => 0.1,
        PresetSize::Big => 0.1 * 0.2,
    };
    PresetView {
        look_from: Vec3::new(0.0, 2.0, 3.0),
        look_at: Vec3::ZERO,
        up: Vec3::Y,
        vertical_fov: 60.0,
        aperture,
        focus_distance: 3.0,
    }
}

/// Build one of the preset scenes.
pub fn preset_scene(size: PresetSize) -> SceneResult<Scene> {
    let mut spheres = vec![
        Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0),
        Sphere::new(Vec3::new(2.0, 0.0, -1.0), 0.5),
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5),
        Sphere::new(Vec3::new(-2.0, 0.0, -1.0), 0.5),
        Sphere::new(Vec3::new(2.0, 0.0, 1.0), 0.5),
        Sphere::new(Vec3::new(0.0, 0.0, 1.0), 0.5),
        Sphere::new(Vec3::new(-2.0, 0.0, 1.0), 0.5),
        Sphere::new(Vec3::new(0.5, 1.0, 0.5), 0.5),
        Sphere::new(Vec3::new(-1.5, 1.5, 0.0), 0.3),
    ];
    let mut materials = vec![
        Material::lambert(Color::new(0.8, 0.8, 0.8)),
        Material::lambert(Color::new(0.8, 0.4, 0.4)),
        Material::lambert(Color::new(0.4, 0.8, 0.4)),
        Material::metal(Color::new(0.4, 0.4, 0.8), 0.0),
        Material::metal(Color::new(0.4, 0.8, 0.4), 0.0),
        Material::metal(Color::new(0.4, 0.8, 0.4), 0.2),
        Material::metal(Color::new(0.4, 0.8, 0.4), 0.6),
        Material::dielectric(Color::new(0.4, 0.4, 0.4), 1.5),
        Material::lambert(Color::new(0.8, 0.6, 0.2)).with_emission(Color::new(30.0, 25.0, 15.0)),
    ];

    if size == PresetSize::Big {
        let palette = [
            Color::new(0.8, 0.1, 0.1),
            Color::new(0.8, 0.5, 0.1),
            Color::new(0.8, 0.8, 0.1),
            Color::new(0.4, 0.8, 0.1),
            Color::new(0.1, 0.8, 0.1),
            Color::new(0.1, 0.8, 0.5),
            Color::new(0.1, 0.8, 0.8),
            Color::new(0.1, 0.1, 0.8),
            Color::new(0.5, 0.1, 0.8),
        ];

        for (row, z) in [-3.0_f32, -4.0, -5.0, -6.0].into_iter().enumerate() {
            for col in 0..9 {
                let x = 4.0 - col as f32;
                spheres.push(Sphere::new(Vec3::new(x, 0.0, z), 0.5));

                let grey = Color::splat(0.1 * (col + 1) as f32);
                let material = match row {
                    0 => Material::lambert(grey),
                    1 => Material::metal(grey, 0.0),
                    2 => Material::metal(palette[col], 0.0),
                    // last ball of the coloured diffuse row is a metal
                    _ if col == 8 => Material::metal(palette[col], 0.0),
                    _ => Material::lambert(palette[col]),
                };
                materials.push(material);
            }
        }

        spheres.push(Sphere::new(Vec3::new(1.5, 1.5, -2.0), 0.3));
        materials.push(
            Material::lambert(Color::new(0.1, 0.2, 0.5)).with_emission(Color::new(3.0, 10.0, 20.0)),
        );
    }

    Scene::new(spheres, materials)
}

/// Produce the animated snapshot of a preset at `time` seconds.
///
/// Sphere 1 bobs vertically and the warm light (sphere 8) sways along z.
/// Scenes with fewer spheres are returned unchanged.
pub fn animate(base: &Scene, time: f32) -> SceneResult<Scene> {
    let mut scene = base.clone();
    if scene.len() > 8 {
        let bob = scene.sphere(1).center;
        scene.set_sphere_center(1, Vec3::new(bob.x, time.cos() + 1.0, bob.z))?;

        let sway = scene.sphere(8).center;
        scene.set_sphere_center(8, Vec3::new(sway.x, sway.y, time.sin() * 0.3))?;
    }
    Ok(scene)
}
