//! Random number generation for path tracing.
//!
//! Every scanline owns an [`XorShift32`] stream seeded from its row and the
//! frame index, so a frame's noise pattern is reproducible no matter how the
//! rows are spread across threads. The sampling helpers take any `RngCore`,
//! which lets tests drive them with `StdRng` too.

use lumen_math::Vec3;
use rand::{RngCore, SeedableRng};
use std::f32::consts::PI;

/// Marsaglia xorshift with 32 bits of state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator. A zero seed would get stuck at zero, so it is
    /// replaced with 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// The stream for one scanline of one frame.
    pub fn for_row(row: u32, frame_index: u32) -> Self {
        Self::new(row.wrapping_mul(9781).wrapping_add(frame_index.wrapping_mul(6271)) | 1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RngCore for XorShift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 15;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Uniform f32 in [0, 1) with 24 bits of precision.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() & 0xFF_FFFF) as f32 / 16_777_216.0
}

/// Sample a random point in the unit disk (z = 0) by rejection.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f32(rng) * 2.0 - 1.0, gen_f32(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a random point inside the unit sphere by rejection.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere (no rejection).
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let z = gen_f32(rng) * 2.0 - 1.0;
    let a = gen_f32(rng) * 2.0 * PI;
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.sin(), r * a.cos(), z)
}
