pub mod state;

pub use state::{Drag, InteractionState, Phase, Release};

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::camera::Camera;
use crate::config::{InteractionConfig, MotionConfig};
use crate::content::Content;
use crate::drift::{self, OffsetSeed};
use crate::math;

/// Index of a floating object within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position, rotation and uniform scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Pose {
    pub fn interpolate(&self, to: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(to.position, t),
            rotation: self.rotation.slerp(to.rotation, t),
            scale: math::lerp(self.scale, to.scale, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    /// Direction the card face points (local +Z).
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

/// Per-frame inputs shared by every object update.
pub struct Frame<'a> {
    pub elapsed: f32,
    pub dt: f32,
    pub camera: &'a Camera,
    pub motion: &'a MotionConfig,
    pub interaction: &'a InteractionConfig,
}

/// A floating card.
#[derive(Debug, Clone)]
pub struct FloatingObject {
    id: ObjectId,
    /// Placement; drift is added on top and this is never moved.
    base_position: Vec3,
    base_scale: f32,
    seed: OffsetSeed,
    state: InteractionState,
    pose: Pose,
    hover_target: bool,
    hover: f32,
    content: Content,
}

impl FloatingObject {
    pub fn new(
        id: ObjectId,
        base_position: Vec3,
        base_scale: f32,
        seed: OffsetSeed,
        content: Content,
        motion: &MotionConfig,
        elapsed: f32,
    ) -> Self {
        let mut obj = Self {
            id,
            base_position,
            base_scale,
            seed,
            state: InteractionState::Idle,
            pose: Pose {
                position: base_position,
                rotation: Quat::IDENTITY,
                scale: base_scale,
            },
            hover_target: false,
            hover: 0.0,
            content,
        };
        obj.pose = obj.idle_pose(elapsed, motion);
        obj
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    pub fn seed(&self) -> &OffsetSeed {
        &self.seed
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Smoothed hover amount in [0, 1].
    pub fn hover(&self) -> f32 {
        self.hover
    }

    pub fn is_hovered(&self) -> bool {
        self.hover_target
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hover_target = hovered;
    }

    /// Rest pose: base position plus drift, wobble and breathing.
    pub fn idle_pose(&self, elapsed: f32, motion: &MotionConfig) -> Pose {
        let t = elapsed * motion.speed;
        let offset = drift::drift_offset(&self.seed, t) * motion.amplitude;
        let w = drift::wobble(&self.seed, t) * motion.wobble;
        Pose {
            position: self.base_position + offset,
            rotation: Quat::from_euler(EulerRot::XYZ, w.x, w.y, w.z),
            scale: self.base_scale * drift::breathing(&self.seed, elapsed, motion.breathing),
        }
    }

    /// Camera-relative pose a focused object settles into, facing the camera.
    pub fn focus_pose(&self, camera: &Camera, cfg: &InteractionConfig) -> Pose {
        Pose {
            position: camera.position + camera.forward() * cfg.focus_distance,
            rotation: camera.rotation,
            scale: self.base_scale * cfg.focus_scale,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Idle -> Dragging. The drag is not engaged until the pointer moves
    /// past the threshold.
    pub fn pointer_down(&mut self, world: Vec3, screen: Vec2) -> bool {
        if self.state != InteractionState::Idle {
            return false;
        }
        self.state = InteractionState::Dragging(Drag {
            anchor: world,
            grab_offset: self.pose.position - world,
            pointer: world,
            press_screen: screen,
            engaged: false,
        });
        true
    }

    /// Track the pointer while dragging. Returns true on the move that
    /// engages the drag.
    pub fn pointer_move(&mut self, world: Vec3, screen: Vec2, threshold_px: f32) -> bool {
        let InteractionState::Dragging(drag) = &mut self.state else {
            return false;
        };
        if !world.is_finite() {
            return false;
        }
        drag.pointer = world;
        if !drag.engaged && screen.distance(drag.press_screen) > threshold_px {
            drag.engaged = true;
            // Re-anchor so the object does not jump by the drift since press.
            drag.grab_offset = self.pose.position - drag.anchor;
            return true;
        }
        false
    }

    /// End a press. Engaged drags snap back; short presses become clicks
    /// (the object returns to Idle and the caller decides about focus).
    pub fn pointer_up(&mut self) -> Release {
        let InteractionState::Dragging(drag) = self.state else {
            return Release::Ignored;
        };
        if drag.engaged {
            self.state = InteractionState::SnappingBack {
                progress: 0.0,
                from: self.pose,
            };
            Release::DragEnd
        } else {
            self.state = InteractionState::Idle;
            Release::Click
        }
    }

    pub fn can_focus(&self) -> bool {
        matches!(
            self.state,
            InteractionState::Idle | InteractionState::SnappingBack { .. }
        )
    }

    /// Idle / SnappingBack -> Focusing, starting from the current pose.
    pub fn begin_focus(&mut self) -> bool {
        if !self.can_focus() {
            return false;
        }
        self.state = InteractionState::Focusing {
            progress: 0.0,
            from: self.pose,
        };
        true
    }

    /// Focusing / Focused -> Unfocusing, reversing from the current pose.
    pub fn begin_unfocus(&mut self) -> bool {
        if !matches!(
            self.state,
            InteractionState::Focusing { .. } | InteractionState::Focused
        ) {
            return false;
        }
        self.state = InteractionState::Unfocusing {
            progress: 0.0,
            from: self.pose,
        };
        true
    }

    // -----------------------------------------------------------------------
    // Per-frame update
    // -----------------------------------------------------------------------

    /// Recompute the pose for this frame and advance any running transition.
    pub fn update(&mut self, frame: &Frame) {
        let cfg = frame.interaction;
        let hover_goal = if self.hover_target { 1.0 } else { 0.0 };
        let k = 1.0 - (-cfg.hover_rate * frame.dt.max(0.0)).exp();
        self.hover += (hover_goal - self.hover) * k;

        let idle = self.idle_pose(frame.elapsed, frame.motion);
        let focus = self.focus_pose(frame.camera, cfg);
        let mut next = None;

        let pose = match &mut self.state {
            InteractionState::Idle => idle,
            InteractionState::Dragging(drag) => {
                if drag.engaged {
                    Pose {
                        position: drag.pointer + drag.grab_offset,
                        ..idle
                    }
                } else {
                    idle
                }
            }
            InteractionState::SnappingBack { progress, from } => {
                *progress = state::advance(*progress, frame.dt, cfg.snap_duration);
                if *progress >= 1.0 {
                    next = Some(InteractionState::Idle);
                    idle
                } else {
                    from.interpolate(&idle, math::progressive_ease_out_quart(*progress))
                }
            }
            InteractionState::Focusing { progress, from } => {
                *progress = state::advance(*progress, frame.dt, cfg.focus_duration);
                if *progress >= 1.0 {
                    next = Some(InteractionState::Focused);
                    focus
                } else {
                    from.interpolate(&focus, math::ease_out_quart(*progress))
                }
            }
            // Re-evaluated every frame so a moving camera is still tracked.
            InteractionState::Focused => focus,
            InteractionState::Unfocusing { progress, from } => {
                *progress = state::advance(*progress, frame.dt, cfg.unfocus_duration);
                if *progress >= 1.0 {
                    next = Some(InteractionState::Idle);
                    idle
                } else {
                    from.interpolate(&idle, math::ease_out_quart(*progress))
                }
            }
        };

        if let Some(state) = next {
            log::debug!(
                "object {:?}: {} -> {}",
                self.id,
                self.state.phase().label(),
                state.phase().label()
            );
            self.state = state;
        }

        if pose.is_finite() {
            self.pose = pose;
        } else if idle.is_finite() {
            log::warn!("object {:?}: non-finite pose, falling back to rest pose", self.id);
            self.pose = idle;
        } else {
            log::warn!("object {:?}: non-finite pose, holding last pose", self.id);
        }
    }
}
