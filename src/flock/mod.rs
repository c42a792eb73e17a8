pub mod boid;

pub use boid::Boid;

use glam::Vec3;

use crate::config::FlockConfig;
use crate::math;
use crate::spatial::{BoidSnapshot, SpatialHash};

/// Spatial hash table size (prime-ish for good distribution).
const SPATIAL_TABLE_SIZE: usize = 257;

/// Axis-aligned box the swarm wanders in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Grow (or shrink, for negative `margin`) every face by `margin`.
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(self.min - Vec3::splat(margin), self.max + Vec3::splat(margin))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn random_point(&self, rng: &mut fastrand::Rng) -> Vec3 {
        let t = Vec3::new(rng.f32(), rng.f32(), rng.f32());
        self.min + (self.max - self.min) * t
    }

    /// Inward push for a point near or past the faces. Zero deeper than
    /// `margin` inside; grows linearly with depth into the margin band and
    /// keeps growing once outside.
    pub fn soft_push(&self, p: Vec3, margin: f32, strength: f32) -> Vec3 {
        let margin = margin.max(math::EPSILON);
        let low = ((self.min + Vec3::splat(margin)) - p).max(Vec3::ZERO);
        let high = (p - (self.max - Vec3::splat(margin))).max(Vec3::ZERO);
        (low - high) / margin * strength
    }
}

/// The ambient swarm. Owns its boids plus scratch buffers reused every tick.
pub struct Swarm {
    boids: Vec<Boid>,
    grid: SpatialHash,
    snapshots: Vec<BoidSnapshot>,
    cfg: FlockConfig,
}

/// Neighbor sums gathered for one boid.
#[derive(Default)]
struct Neighborhood {
    separation: Vec3,
    separation_count: u32,
    velocity_sum: Vec3,
    alignment_count: u32,
    position_sum: Vec3,
    cohesion_count: u32,
}

impl Swarm {
    /// Populate `count` boids inside `bounds`. The count is fixed from here on.
    pub fn populate(
        count: usize,
        bounds: &Bounds,
        cfg: FlockConfig,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let boids = (0..count).map(|_| Boid::spawn(rng, bounds, &cfg)).collect();
        Self::from_boids(boids, cfg)
    }

    /// Wrap an existing set of boids.
    pub fn from_boids(boids: Vec<Boid>, cfg: FlockConfig) -> Self {
        let count = boids.len();
        Self {
            boids,
            grid: SpatialHash::new(cfg.max_radius(), SPATIAL_TABLE_SIZE),
            snapshots: Vec::with_capacity(count),
            cfg,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Advance every boid by one simulation tick.
    pub fn step(&mut self, bounds: &Bounds, elapsed: f32) {
        self.rebuild();

        let cfg = self.cfg;
        for (i, boid) in self.boids.iter_mut().enumerate() {
            let hood = gather(i, &self.snapshots, &self.grid, &cfg);

            let mut force = Vec3::ZERO;
            if hood.separation_count > 0 {
                let away = hood.separation / hood.separation_count as f32;
                force += math::steer_towards(away, boid.velocity, boid.max_speed, boid.max_force)
                    * cfg.separation_weight;
            }
            if hood.alignment_count > 0 {
                let heading = hood.velocity_sum / hood.alignment_count as f32;
                force += math::steer_towards(heading, boid.velocity, boid.max_speed, boid.max_force)
                    * cfg.alignment_weight;
            }
            if hood.cohesion_count > 0 {
                let centroid = hood.position_sum / hood.cohesion_count as f32;
                force += math::steer_towards(
                    centroid - boid.position,
                    boid.velocity,
                    boid.max_speed,
                    boid.max_force,
                ) * cfg.cohesion_weight;
            }

            force += boid.wander(elapsed, cfg.wander_strength);
            force += bounds.soft_push(boid.position, cfg.boundary_margin, cfg.boundary_force);

            if !force.is_finite() {
                log::warn!("boid {i}: non-finite steering discarded");
                force = Vec3::ZERO;
            }
            boid.apply_force(force);
            boid.integrate();
        }
    }

    /// Snapshot kinematics and rebuild the spatial hash.
    fn rebuild(&mut self) {
        self.grid.clear();
        self.snapshots.clear();
        for boid in &self.boids {
            let idx = self.snapshots.len() as u32;
            self.snapshots.push(BoidSnapshot {
                pos: boid.position,
                vel: boid.velocity,
            });
            self.grid.insert(boid.position, idx);
        }
    }
}

fn gather(
    my_idx: usize,
    snapshots: &[BoidSnapshot],
    grid: &SpatialHash,
    cfg: &FlockConfig,
) -> Neighborhood {
    let me = snapshots[my_idx];
    let sep_sq = cfg.separation_radius * cfg.separation_radius;
    let ali_sq = cfg.alignment_radius * cfg.alignment_radius;
    let coh_sq = cfg.cohesion_radius * cfg.cohesion_radius;
    let mut hood = Neighborhood::default();

    grid.query_neighbors(me.pos, |neighbor_idx| {
        let ni = neighbor_idx as usize;
        if ni == my_idx || ni >= snapshots.len() {
            return;
        }
        let them = snapshots[ni];
        let delta = me.pos - them.pos;
        let dist_sq = delta.length_squared();

        // Coincident boids contribute no separation direction.
        if dist_sq < sep_sq && dist_sq > math::EPSILON {
            let dist = dist_sq.sqrt();
            hood.separation += delta / dist / dist;
            hood.separation_count += 1;
        }
        if dist_sq < ali_sq {
            hood.velocity_sum += them.vel;
            hood.alignment_count += 1;
        }
        if dist_sq < coh_sq {
            hood.position_sum += them.pos;
            hood.cohesion_count += 1;
        }
    });

    hood
}
