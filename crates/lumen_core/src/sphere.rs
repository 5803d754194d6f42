//! Sphere geometry.

use lumen_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// A sphere. Derived per-frame data such as the reciprocal radius lives in
/// the intersection backends, which rebuild it from `radius` every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Change the radius. Callers going through [`crate::Scene`] get the
    /// value validated first.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_sphere(self.center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_resize() {
        let mut sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        sphere.set_radius(0.25);
        assert_eq!(sphere.radius(), 0.25);
        assert_eq!(sphere.bounding_box().max(), Vec3::new(0.25, 0.25, -0.75));
    }

    #[test]
    fn test_sphere_json() {
        let sphere: Sphere = serde_json::from_str(r#"{"center":[2.0,0.0,-1.0],"radius":0.5}"#).unwrap();
        assert_eq!(sphere.center, Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(sphere.radius(), 0.5);
    }
}
