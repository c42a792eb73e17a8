use glam::{Mat3, Quat, Vec2, Vec3};

/// Rate (per second) the parallax offset chases the pointer.
const PARALLAX_RATE: f32 = 2.5;

/// Perspective camera pose. Looks down its local -Z.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Rest position before parallax.
    pub origin: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
    /// Current parallax offset applied on top of `origin`.
    offset: Vec3,
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            origin: eye,
            position: eye,
            rotation: look_rotation(target - eye),
            offset: Vec3::ZERO,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Ease the camera toward a parallax offset for pointer `ndc` in [-1, 1]².
    /// Keeps looking in the same direction.
    pub fn update_parallax(&mut self, ndc: Vec2, strength: f32, dt: f32) {
        let ndc = ndc.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let right = self.rotation * Vec3::X;
        let up = self.rotation * Vec3::Y;
        let target = (right * ndc.x + up * ndc.y) * strength;
        let k = 1.0 - (-PARALLAX_RATE * dt.max(0.0)).exp();
        self.offset += (target - self.offset) * k;
        self.position = self.origin + self.offset;
    }
}

/// Rotation whose -Z axis points along `dir`, with +Y kept as close to world up
/// as possible. Degenerate directions give the identity.
pub fn look_rotation(dir: Vec3) -> Quat {
    let forward = dir.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = forward.cross(Vec3::Y);
    if right.length_squared() < 1e-8 {
        right = forward.cross(Vec3::Z);
    }
    let right = right.normalize();
    let up = right.cross(forward);
    Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_looks_down_negative_z() {
        let cam = Camera::looking_at(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO);
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn look_rotation_points_at_target() {
        let eye = Vec3::new(3.0, 2.0, 5.0);
        let target = Vec3::new(-1.0, 0.0, -2.0);
        let cam = Camera::looking_at(eye, target);
        let expected = (target - eye).normalize();
        assert!((cam.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn parallax_converges_and_keeps_heading() {
        let mut cam = Camera::looking_at(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO);
        let heading = cam.forward();
        for _ in 0..600 {
            cam.update_parallax(Vec2::new(1.0, 0.0), 0.4, 1.0 / 60.0);
        }
        assert!((cam.position.x - 0.4).abs() < 1e-3);
        assert_eq!(cam.forward(), heading);
    }
}
