use std::fmt;

use glam::Vec3;
use noise::Perlin;

use crate::math;

/// Per-object offsets derived from the session seed and the object index.
/// Keeps floating objects out of phase with one another.
#[derive(Clone)]
pub struct OffsetSeed {
    /// Phase offset per axis, radians.
    pub phase: Vec3,
    /// Time multiplier in [0.8, 1.2].
    pub rate: f32,
    /// Noise channel for the low-frequency layer.
    pub channel: u32,
    /// One generator per axis, seeded from `channel` once at derivation.
    noise: [Perlin; 3],
}

impl PartialEq for OffsetSeed {
    fn eq(&self, other: &Self) -> bool {
        // `noise` is a function of `channel`.
        self.phase == other.phase && self.rate == other.rate && self.channel == other.channel
    }
}

impl fmt::Debug for OffsetSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetSeed")
            .field("phase", &self.phase)
            .field("rate", &self.rate)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl OffsetSeed {
    pub fn derive(scene_seed: u64, index: usize) -> Self {
        let mixed = scene_seed ^ (index as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        let mut rng = fastrand::Rng::with_seed(mixed);
        let tau = std::f32::consts::TAU;
        let phase = Vec3::new(rng.f32() * tau, rng.f32() * tau, rng.f32() * tau);
        let rate = 0.8 + rng.f32() * 0.4;
        let channel = rng.u32(..);
        Self {
            phase,
            rate,
            channel,
            noise: [
                Perlin::new(channel),
                Perlin::new(channel.wrapping_add(101)),
                Perlin::new(channel.wrapping_add(202)),
            ],
        }
    }
}

/// Base frequencies per axis for the two sine layers (rad/s). Ratios are
/// irrational-ish so the sum does not visibly repeat.
const PRIMARY: Vec3 = Vec3::new(0.61, 0.83, 0.47);
const SECONDARY: Vec3 = Vec3::new(1.37, 1.91, 1.13);
/// Noise layer frequency (lattice cells per second).
const NOISE_FREQ: f32 = 0.23;

/// Layer weights; sum to 1 so the result stays in [-1, 1].
const W_PRIMARY: f32 = 0.55;
const W_SECONDARY: f32 = 0.25;
const W_NOISE: f32 = 0.2;

/// Smooth, bounded drift in [-1, 1] per axis. Pure: the same seed and time
/// always give the same offset.
pub fn drift_offset(seed: &OffsetSeed, t: f32) -> Vec3 {
    let t = t * seed.rate;
    let p = seed.phase;

    let primary = Vec3::new(
        (t * PRIMARY.x + p.x).sin(),
        (t * PRIMARY.y + p.y).sin(),
        (t * PRIMARY.z + p.z).sin(),
    );
    let secondary = Vec3::new(
        (t * SECONDARY.x + p.y * 1.7).sin(),
        (t * SECONDARY.y + p.z * 1.3).sin(),
        (t * SECONDARY.z + p.x * 0.9).sin(),
    );
    let n = t * NOISE_FREQ;
    let noise = Vec3::new(
        math::fbm1(&seed.noise[0], n + p.x, 2),
        math::fbm1(&seed.noise[1], n + p.y, 2),
        math::fbm1(&seed.noise[2], n + p.z, 2),
    );

    primary * W_PRIMARY + secondary * W_SECONDARY + noise * W_NOISE
}

/// Small rotational wobble as Euler angles (x, y, z), in [-1, 1] per axis
/// before scaling by the caller.
pub fn wobble(seed: &OffsetSeed, t: f32) -> Vec3 {
    let t = t * seed.rate;
    let p = seed.phase;
    Vec3::new(
        (t * 0.53 + p.z).sin(),
        (t * 0.41 + p.x).sin() * 0.7 + (t * 0.97 + p.y).sin() * 0.3,
        (t * 0.37 + p.y).cos(),
    )
}

/// Breathing scale factor around 1 with the given depth.
pub fn breathing(seed: &OffsetSeed, t: f32, depth: f32) -> f32 {
    1.0 + (t * 1.1 * seed.rate + seed.phase.x).sin() * depth
}
