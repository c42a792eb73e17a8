use glam::Vec3;

use crate::flock::Bounds;

/// Steering rules and limits for the ambient swarm.
#[derive(Debug, Clone, Copy)]
pub struct FlockConfig {
    pub separation_radius: f32,
    pub separation_weight: f32,
    pub alignment_radius: f32,
    pub alignment_weight: f32,
    pub cohesion_radius: f32,
    pub cohesion_weight: f32,
    /// Per-boid max speed is drawn from this range (units per tick).
    pub max_speed_range: (f32, f32),
    pub max_force: f32,
    /// Visual size multiplier range.
    pub scale_range: (f32, f32),
    /// Peak magnitude of the sinusoidal wander force.
    pub wander_strength: f32,
    /// Distance from a bounds face where the inward push starts.
    pub boundary_margin: f32,
    /// Inward push at full margin depth; keeps growing past the face.
    pub boundary_force: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            separation_radius: 2.5,
            separation_weight: 2.0,
            alignment_radius: 5.0,
            alignment_weight: 1.2,
            cohesion_radius: 6.0,
            cohesion_weight: 1.0,
            max_speed_range: (0.06, 0.09),
            max_force: 0.002,
            scale_range: (0.8, 1.4),
            wander_strength: 0.0008,
            boundary_margin: 3.0,
            boundary_force: 0.02,
        }
    }
}

impl FlockConfig {
    /// Largest perception radius; sizes the spatial hash cells.
    pub fn max_radius(&self) -> f32 {
        self.separation_radius
            .max(self.alignment_radius)
            .max(self.cohesion_radius)
    }
}

/// Drift, wobble and breathing applied to floating objects at rest.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// World-space drift amplitude per axis (primary sweep on X, least on Z).
    pub amplitude: Vec3,
    /// Global time multiplier for the drift field.
    pub speed: f32,
    /// Peak wobble rotation per axis, radians.
    pub wobble: Vec3,
    /// Breathing scale depth (0.02 = +/-2%).
    pub breathing: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            amplitude: Vec3::new(0.45, 0.3, 0.15),
            speed: 0.35,
            wobble: Vec3::new(0.06, 0.1, 0.03),
            breathing: 0.02,
        }
    }
}

/// Pointer and focus tunables.
#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    /// Screen-space displacement (px) before a press becomes a drag.
    pub drag_threshold_px: f32,
    /// Seconds for a released card to return to rest.
    pub snap_duration: f32,
    pub focus_duration: f32,
    pub unfocus_duration: f32,
    /// Distance in front of the camera where a focused card settles.
    pub focus_distance: f32,
    /// Scale multiplier reached when focused.
    pub focus_scale: f32,
    /// Rate (per second) the hover mix approaches its target.
    pub hover_rate: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 5.0,
            snap_duration: 1.5,
            focus_duration: 0.4,
            unfocus_duration: 0.3,
            focus_distance: 4.5,
            focus_scale: 1.15,
            hover_rate: 8.0,
        }
    }
}

/// Uniforms for the card frame glow program.
#[derive(Debug, Clone, Copy)]
pub struct FrameShading {
    pub glow_color: Vec3,
    /// Intensity when viewed edge-on.
    pub min_intensity: f32,
    /// Intensity when viewed head-on.
    pub max_intensity: f32,
    /// Global pulse frequency (rad/s) and depth.
    pub pulse_rate: f32,
    pub pulse_depth: f32,
    /// Added intensity at full hover.
    pub hover_boost: f32,
}

impl Default for FrameShading {
    fn default() -> Self {
        Self {
            glow_color: Vec3::new(0.85, 0.9, 1.0),
            min_intensity: 0.15,
            max_intensity: 0.8,
            pulse_rate: 0.9,
            pulse_depth: 0.15,
            hover_boost: 0.5,
        }
    }
}

/// Uniforms for the ambient particle program.
#[derive(Debug, Clone, Copy)]
pub struct ParticleShading {
    /// Spatial frequency and speed of the traveling hue wave.
    pub wave_scale: f32,
    pub wave_speed: f32,
    pub wave_direction: Vec3,
    pub hue_base: f32,
    pub hue_range: f32,
    pub saturation: f32,
    pub value: f32,
    /// Shimmer frequency (rad/s) and how much it moves size / opacity.
    pub shimmer_rate: f32,
    pub size_flutter: f32,
    pub opacity_flutter: f32,
    pub base_size: f32,
    pub base_opacity: f32,
    /// View depths where particles fade in and fade out again.
    pub near_fade: (f32, f32),
    pub far_fade: (f32, f32),
}

impl Default for ParticleShading {
    fn default() -> Self {
        Self {
            wave_scale: 0.18,
            wave_speed: 0.4,
            wave_direction: Vec3::new(0.8, 0.3, 0.5),
            hue_base: 0.55,
            hue_range: 0.25,
            saturation: 0.45,
            value: 0.95,
            shimmer_rate: 3.2,
            size_flutter: 0.35,
            opacity_flutter: 0.4,
            base_size: 0.06,
            base_opacity: 0.85,
            near_fade: (0.5, 2.5),
            far_fade: (20.0, 28.0),
        }
    }
}

/// Everything a Scene needs at construction.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Session seed. `None` draws a fresh one at scene creation.
    pub seed: Option<u64>,
    /// Ambient particle count, fixed for the scene's lifetime.
    pub particle_count: usize,
    pub bounds: Bounds,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Max parallax offset (world units) at the viewport edge.
    pub parallax: f32,
    /// Height of the horizontal band floating objects are placed in.
    pub band_y: f32,
    pub band_depth: (f32, f32),
    /// Largest step accepted from the host (seconds); longer gaps are clamped.
    pub max_step: f32,
    pub flock: FlockConfig,
    pub motion: MotionConfig,
    pub interaction: InteractionConfig,
    pub frame_shading: FrameShading,
    pub particle_shading: ParticleShading,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            particle_count: 25,
            bounds: Bounds::new(Vec3::new(-12.0, -4.0, -18.0), Vec3::new(12.0, 5.0, 4.0)),
            camera_position: Vec3::new(0.0, 0.0, 8.0),
            camera_target: Vec3::new(0.0, 0.0, 0.0),
            parallax: 0.35,
            band_y: 0.2,
            band_depth: (-2.5, -0.5),
            max_step: 0.1,
            flock: FlockConfig::default(),
            motion: MotionConfig::default(),
            interaction: InteractionConfig::default(),
            frame_shading: FrameShading::default(),
            particle_shading: ParticleShading::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }
}
