use glam::Vec3;

use super::Bounds;
use crate::config::FlockConfig;
use crate::math;

/// One ambient particle in the swarm.
#[derive(Debug, Clone, Copy)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Units per tick.
    pub max_speed: f32,
    pub max_force: f32,
    /// In [0, 1); desynchronizes wander and shimmer across boids.
    pub phase: f32,
    /// Visual size multiplier.
    pub scale: f32,
}

impl Boid {
    /// Spawn a boid at a random point inside `bounds` heading in a random direction.
    pub fn spawn(rng: &mut fastrand::Rng, bounds: &Bounds, cfg: &FlockConfig) -> Self {
        let position = bounds.random_point(rng);
        let (lo, hi) = cfg.max_speed_range;
        let max_speed = lo + (hi - lo) * rng.f32();

        let heading = math::safe_normalize(Vec3::new(
            rng.f32() * 2.0 - 1.0,
            (rng.f32() * 2.0 - 1.0) * 0.5,
            rng.f32() * 2.0 - 1.0,
        ));
        let (s_lo, s_hi) = cfg.scale_range;

        Self {
            position,
            velocity: heading * max_speed * 0.5,
            acceleration: Vec3::ZERO,
            max_speed,
            max_force: cfg.max_force,
            phase: rng.f32(),
            scale: s_lo + (s_hi - s_lo) * rng.f32(),
        }
    }

    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Integrate one tick: velocity += acceleration (speed-clamped),
    /// position += velocity, acceleration reset.
    pub fn integrate(&mut self) {
        let next = self.velocity + self.acceleration;
        self.velocity = if next.is_finite() {
            math::limit(next, self.max_speed)
        } else {
            Vec3::ZERO
        };
        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;
    }

    /// Time-varying sinusoidal nudge, independent per boid.
    pub fn wander(&self, elapsed: f32, strength: f32) -> Vec3 {
        let p = self.phase * std::f32::consts::TAU;
        Vec3::new(
            (elapsed * 0.7 + p).sin(),
            (elapsed * 0.9 + p * 1.3).cos() * 0.5,
            (elapsed * 0.5 + p * 0.7).sin(),
        ) * strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_respects_ranges() {
        let cfg = FlockConfig::default();
        let bounds = Bounds::new(Vec3::splat(-5.0), Vec3::splat(5.0));
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..200 {
            let b = Boid::spawn(&mut rng, &bounds, &cfg);
            assert!(bounds.contains(b.position));
            assert!((0.06..=0.09).contains(&b.max_speed));
            assert!((0.8..=1.4).contains(&b.scale));
            assert!((0.0..1.0).contains(&b.phase));
            assert!(b.velocity.length() <= b.max_speed);
        }
    }

    #[test]
    fn integrate_clamps_speed_and_resets_acceleration() {
        let cfg = FlockConfig::default();
        let bounds = Bounds::new(Vec3::splat(-5.0), Vec3::splat(5.0));
        let mut b = Boid::spawn(&mut fastrand::Rng::with_seed(2), &bounds, &cfg);
        b.apply_force(Vec3::new(10.0, 0.0, 0.0));
        b.integrate();
        assert!(b.velocity.length() <= b.max_speed + 1e-6);
        assert_eq!(b.acceleration, Vec3::ZERO);
    }

    #[test]
    fn non_finite_force_does_not_poison_velocity() {
        let cfg = FlockConfig::default();
        let bounds = Bounds::new(Vec3::splat(-5.0), Vec3::splat(5.0));
        let mut b = Boid::spawn(&mut fastrand::Rng::with_seed(3), &bounds, &cfg);
        b.apply_force(Vec3::splat(f32::NAN));
        b.integrate();
        assert!(b.velocity.is_finite());
        assert!(b.position.is_finite());
    }
}
