use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Lengths below this are treated as zero when normalizing.
pub const EPSILON: f32 = 1e-6;

/// Normalize `v`, yielding zero for degenerate (near-zero or non-finite) input.
pub fn safe_normalize(v: Vec3) -> Vec3 {
    if v.length_squared() < EPSILON * EPSILON {
        return Vec3::ZERO;
    }
    v.normalize_or_zero()
}

/// Clamp the length of `v` to at most `max`.
pub fn limit(v: Vec3, max: f32) -> Vec3 {
    v.clamp_length_max(max.max(0.0))
}

/// Reynolds seek rule: steer from `velocity` toward `desired` direction at
/// `max_speed`, limited to `max_force`. Degenerate directions steer nowhere.
pub fn steer_towards(desired: Vec3, velocity: Vec3, max_speed: f32, max_force: f32) -> Vec3 {
    let dir = safe_normalize(desired);
    if dir == Vec3::ZERO {
        return Vec3::ZERO;
    }
    limit(dir * max_speed - velocity, max_force)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smooth hermite interpolation.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if (edge1 - edge0).abs() < EPSILON {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Ease-out quartic: `1 - (1 - p)^4`, with `p` clamped to [0, 1].
pub fn ease_out_quart(p: f32) -> f32 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv * inv
}

/// Ease-out quartic scaled by progress itself: the blend factor grows with
/// progress, so motion starts slow and finishes faster, landing on 1 at `p = 1`.
pub fn progressive_ease_out_quart(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * ease_out_quart(p)
}

/// HSV (all components in [0, 1], hue wraps) to linear RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Vec3::new(r + m, g + m, b + m)
}

// ---------------------------------------------------------------------------
// Gradient noise
// ---------------------------------------------------------------------------

/// Second coordinate for 1D sampling. Off the integer lattice, where Perlin
/// noise is zero.
const NOISE_ROW: f64 = 0.371;
/// Row spacing between octaves, so each octave reads an unrelated slice.
const OCTAVE_ROW_STEP: f64 = 7.13;

/// Continuous 1D Perlin noise in [-1, 1].
pub fn noise1(perlin: &Perlin, x: f32) -> f32 {
    (perlin.get([x as f64, NOISE_ROW]) as f32).clamp(-1.0, 1.0)
}

/// Layered 1D noise, normalized back into [-1, 1].
pub fn fbm1(perlin: &Perlin, x: f32, octaves: u32) -> f32 {
    let mut sum = 0.0;
    let mut amp = 1.0;
    let mut norm = 0.0;
    let mut freq = 1.0;
    for octave in 0..octaves.max(1) {
        let row = NOISE_ROW + octave as f64 * OCTAVE_ROW_STEP;
        let v = (perlin.get([(x * freq) as f64, row]) as f32).clamp(-1.0, 1.0);
        sum += v * amp;
        norm += amp;
        amp *= 0.5;
        freq *= 2.03;
    }
    sum / norm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_quart_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
        // Fast start: more than half done at a quarter of the way.
        assert!(ease_out_quart(0.25) > 0.6);
    }

    #[test]
    fn progressive_ease_starts_slow_and_finishes_fast() {
        assert_eq!(progressive_ease_out_quart(0.0), 0.0);
        assert_eq!(progressive_ease_out_quart(1.0), 1.0);
        let first = progressive_ease_out_quart(0.1);
        let last = 1.0 - progressive_ease_out_quart(0.9);
        assert!(first < last, "first {first} last {last}");
        let mut prev = 0.0;
        for i in 1..=100 {
            let w = progressive_ease_out_quart(i as f32 / 100.0);
            assert!(w >= prev);
            prev = w;
        }
    }

    #[test]
    fn safe_normalize_zero_is_zero() {
        assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(safe_normalize(Vec3::splat(f32::NAN)), Vec3::ZERO);
        let n = safe_normalize(Vec3::new(3.0, 0.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn steer_is_force_limited() {
        let s = steer_towards(Vec3::X, Vec3::NEG_X, 1.0, 0.01);
        assert!(s.length() <= 0.01 + 1e-6);
        assert!(s.x > 0.0);
        assert_eq!(steer_towards(Vec3::ZERO, Vec3::X, 1.0, 0.01), Vec3::ZERO);
    }

    #[test]
    fn smoothstep_clamps() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn noise_is_bounded_and_deterministic() {
        let perlin = Perlin::new(7);
        let again = Perlin::new(7);
        for i in 0..2000 {
            let x = i as f32 * 0.137 - 50.0;
            let a = noise1(&perlin, x);
            assert!((-1.0..=1.0).contains(&a));
            assert_eq!(a, noise1(&again, x));
            let f = fbm1(&perlin, x, 3);
            assert!((-1.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn noise_is_continuous() {
        let step = 1e-3;
        let perlin = Perlin::new(11);
        let mut prev = noise1(&perlin, 0.0);
        for i in 1..5000 {
            let v = noise1(&perlin, i as f32 * step);
            assert!((v - prev).abs() < 0.02, "jump at {i}");
            prev = v;
        }
    }

    #[test]
    fn hsv_primaries() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        let wrapped = hsv_to_rgb(1.0 + 1.0 / 3.0, 1.0, 1.0);
        assert!((wrapped - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-4);
    }
}
