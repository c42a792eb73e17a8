use bytemuck::{Pod, Zeroable};

use crate::card::FloatingObject;
use crate::flock::Boid;
use crate::shading::Shade;

/// Per-card data uploaded to the GPU each frame.
/// Stride = 96 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CardInstance {
    /// Column-major model matrix (scale, rotation, translation).
    pub model: [[f32; 4]; 4],
    /// Frame glow color (linear RGB).
    pub color: [f32; 3],
    pub intensity: f32,
    /// Image width / height. Placeholder aspect until the image resolves.
    pub aspect: f32,
    /// Smoothed hover amount in [0, 1].
    pub hover: f32,
    pub opacity: f32,
    /// 1 while the placeholder is shown, 0 once the image is ready.
    pub placeholder: u32,
}

impl CardInstance {
    pub fn from_object(obj: &FloatingObject, shade: &Shade) -> Self {
        let content = obj.content();
        Self {
            model: obj.pose().model_matrix().to_cols_array_2d(),
            color: shade.color.into(),
            intensity: shade.intensity,
            aspect: content.aspect_ratio(),
            hover: obj.hover(),
            opacity: shade.opacity,
            placeholder: content.is_placeholder() as u32,
        }
    }
}

/// Per-particle data uploaded to the GPU each frame.
/// Stride = 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    /// World-space sprite size.
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl ParticleInstance {
    pub fn from_boid(boid: &Boid, shade: &Shade) -> Self {
        Self {
            position: boid.position.into(),
            size: shade.size,
            color: (shade.color * shade.intensity).into(),
            opacity: shade.opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_have_no_padding() {
        assert_eq!(std::mem::size_of::<CardInstance>(), 96);
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
    }

    #[test]
    fn particle_color_carries_intensity() {
        let boid = Boid {
            position: glam::Vec3::new(1.0, 2.0, 3.0),
            velocity: glam::Vec3::ZERO,
            acceleration: glam::Vec3::ZERO,
            max_speed: 0.08,
            max_force: 0.002,
            phase: 0.0,
            scale: 1.0,
        };
        let shade = Shade {
            color: glam::Vec3::ONE,
            intensity: 0.5,
            size: 0.1,
            opacity: 0.7,
        };
        let inst = ParticleInstance::from_boid(&boid, &shade);
        assert_eq!(inst.position, [1.0, 2.0, 3.0]);
        assert_eq!(inst.color, [0.5, 0.5, 0.5]);
        let bytes: &[u8] = bytemuck::bytes_of(&inst);
        assert_eq!(bytes.len(), 32);
    }
}
