use crate::{is_normalized, Vec3};

/// A ray in 3D space with origin and unit-length direction.
///
/// Every consumer of a ray (sphere intersection, reflection, the sky term)
/// relies on `direction` being normalized, so the constructor asserts it in
/// debug builds. Use [`Ray::try_new`] when the direction comes from a sum that
/// may cancel out.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from an already normalized direction.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(
            is_normalized(direction),
            "ray direction {direction:?} is not unit length"
        );
        Self { origin, direction }
    }

    /// Create a ray, normalizing `direction`.
    ///
    /// Returns `None` for zero-length or non-finite directions.
    #[inline]
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
