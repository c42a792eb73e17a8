use std::f32::consts::TAU;

use glam::Vec3;

use crate::camera::Camera;
use crate::card::Pose;
use crate::config::{FrameShading, ParticleShading};
use crate::math;

/// Viewer position and direction for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub eye: Vec3,
    pub forward: Vec3,
}

impl View {
    pub fn depth_of(&self, point: Vec3) -> f32 {
        (point - self.eye).dot(self.forward)
    }
}

impl From<&Camera> for View {
    fn from(camera: &Camera) -> Self {
        Self {
            eye: camera.position,
            forward: camera.forward(),
        }
    }
}

/// A visible surface to shade. The variant selects the program.
#[derive(Debug, Clone, Copy)]
pub enum Surface<'a> {
    /// Glowing frame around a floating card.
    Frame { pose: &'a Pose, hover: f32 },
    /// One ambient particle.
    Particle { position: Vec3, phase: f32, scale: f32 },
}

/// Per-surface shading outputs handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shade {
    pub color: Vec3,
    pub intensity: f32,
    /// World-space size (particles) or scale (frames).
    pub size: f32,
    pub opacity: f32,
}

/// Uniform sets for every shading program, recomputed against each frame's
/// time and view. Pure: equal inputs give equal outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadingPrograms {
    pub frame: FrameShading,
    pub particle: ParticleShading,
}

impl ShadingPrograms {
    pub fn new(frame: FrameShading, particle: ParticleShading) -> Self {
        Self { frame, particle }
    }

    pub fn shade(&self, surface: &Surface, elapsed: f32, view: &View) -> Shade {
        match *surface {
            Surface::Frame { pose, hover } => shade_frame(&self.frame, pose, hover, elapsed, view),
            Surface::Particle {
                position,
                phase,
                scale,
            } => shade_particle(&self.particle, position, phase, scale, elapsed, view),
        }
    }
}

/// Emissive frame glow: brighter when facing the viewer, with a slow global
/// pulse and a hover boost.
fn shade_frame(u: &FrameShading, pose: &Pose, hover: f32, elapsed: f32, view: &View) -> Shade {
    let to_eye = math::safe_normalize(view.eye - pose.position);
    let frontal = pose.facing().dot(to_eye).max(0.0);
    let base = math::lerp(u.min_intensity, u.max_intensity, frontal * frontal);
    let pulse = 1.0 + u.pulse_depth * (elapsed * u.pulse_rate).sin();
    let hover = hover.clamp(0.0, 1.0);

    Shade {
        color: u.glow_color.lerp(Vec3::ONE, hover * 0.3),
        intensity: base * pulse + u.hover_boost * hover,
        size: pose.scale,
        opacity: 1.0,
    }
}

/// Particle color from a slow traveling hue wave, size and opacity from a
/// faster per-particle shimmer. Faded in near the camera and out near the
/// far distance.
fn shade_particle(
    u: &ParticleShading,
    position: Vec3,
    phase: f32,
    scale: f32,
    elapsed: f32,
    view: &View,
) -> Shade {
    let dir = math::safe_normalize(u.wave_direction);
    let wave = (position.dot(dir) * u.wave_scale - elapsed * u.wave_speed) * TAU;
    let hue = u.hue_base + u.hue_range * (0.5 + 0.5 * wave.sin());
    let color = math::hsv_to_rgb(hue, u.saturation, u.value);

    let p = phase * TAU;
    let flutter = (elapsed * u.shimmer_rate + p).sin();
    let glint = 0.5 + 0.5 * (elapsed * u.shimmer_rate * 1.7 + p * 2.3).sin();

    let depth = view.depth_of(position);
    let fade = math::smoothstep(u.near_fade.0, u.near_fade.1, depth)
        * (1.0 - math::smoothstep(u.far_fade.0, u.far_fade.1, depth));

    // Shimmer drives size and opacity only.
    Shade {
        color,
        intensity: fade,
        size: u.base_size * scale * (1.0 + u.size_flutter * flutter),
        opacity: u.base_opacity * (1.0 - u.opacity_flutter * glint) * fade,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn view() -> View {
        View {
            eye: Vec3::new(0.0, 0.0, 8.0),
            forward: Vec3::NEG_Z,
        }
    }

    fn pose(rotation: Quat) -> Pose {
        Pose {
            position: Vec3::ZERO,
            rotation,
            scale: 1.0,
        }
    }

    #[test]
    fn view_follows_camera_depth() {
        let cam = Camera::looking_at(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO);
        let view = View::from(&cam);
        assert!((view.depth_of(Vec3::ZERO) - 8.0).abs() < 1e-5);
        assert!(view.depth_of(Vec3::new(0.0, 0.0, 9.0)) < 0.0);
    }

    #[test]
    fn shading_is_repeatable() {
        let programs = ShadingPrograms::default();
        let p = pose(Quat::from_rotation_y(0.3));
        let frame = Surface::Frame { pose: &p, hover: 0.4 };
        assert_eq!(
            programs.shade(&frame, 12.5, &view()),
            programs.shade(&frame, 12.5, &view())
        );
        let particle = Surface::Particle {
            position: Vec3::new(1.0, 2.0, -3.0),
            phase: 0.3,
            scale: 1.1,
        };
        assert_eq!(
            programs.shade(&particle, 3.25, &view()),
            programs.shade(&particle, 3.25, &view())
        );
    }

    #[test]
    fn frontal_frames_glow_brighter() {
        let programs = ShadingPrograms::default();
        let head_on = pose(Quat::IDENTITY);
        let oblique = pose(Quat::from_rotation_y(1.2));
        let a = programs.shade(&Surface::Frame { pose: &head_on, hover: 0.0 }, 0.0, &view());
        let b = programs.shade(&Surface::Frame { pose: &oblique, hover: 0.0 }, 0.0, &view());
        assert!(a.intensity > b.intensity);
    }

    #[test]
    fn hover_boosts_glow() {
        let programs = ShadingPrograms::default();
        let p = pose(Quat::IDENTITY);
        let cold = programs.shade(&Surface::Frame { pose: &p, hover: 0.0 }, 1.0, &view());
        let warm = programs.shade(&Surface::Frame { pose: &p, hover: 1.0 }, 1.0, &view());
        assert!(warm.intensity > cold.intensity + 0.4);
    }

    #[test]
    fn particles_fade_near_camera_and_far_away() {
        let programs = ShadingPrograms::default();
        let at = |z: f32| {
            programs.shade(
                &Surface::Particle {
                    position: Vec3::new(0.0, 0.0, z),
                    phase: 0.0,
                    scale: 1.0,
                },
                0.0,
                &view(),
            )
        };
        assert_eq!(at(7.8).opacity, 0.0);
        assert!(at(0.0).opacity > 0.2);
        assert_eq!(at(-25.0).opacity, 0.0);
        // Smooth, not clipped: partially faded inside the near band.
        let edge = at(6.5).opacity;
        assert!(edge > 0.0 && edge < at(0.0).opacity);
    }

    #[test]
    fn shimmer_leaves_color_alone() {
        let programs = ShadingPrograms::default();
        let at_phase = |phase: f32| {
            programs.shade(
                &Surface::Particle {
                    position: Vec3::new(1.5, -0.5, -4.0),
                    phase,
                    scale: 1.0,
                },
                2.2,
                &view(),
            )
        };
        let a = at_phase(0.1);
        let b = at_phase(0.6);
        assert_eq!(a.color, b.color);
        assert_eq!(a.intensity, b.intensity);
        assert_ne!(a.size, b.size);
        assert_ne!(a.opacity, b.opacity);
    }

    #[test]
    fn particle_hue_travels_with_time() {
        let programs = ShadingPrograms::default();
        let surface = Surface::Particle {
            position: Vec3::new(2.0, 0.0, -2.0),
            phase: 0.5,
            scale: 1.0,
        };
        let a = programs.shade(&surface, 0.0, &view());
        let b = programs.shade(&surface, 0.6, &view());
        assert_ne!(a.color, b.color);
    }
}
