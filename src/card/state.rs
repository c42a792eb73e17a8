use glam::{Vec2, Vec3};

use super::Pose;

/// Transitions within this distance of 1.0 count as complete, so a run of
/// float-summed frame deltas still lands exactly on the target.
const PROGRESS_EPSILON: f32 = 1e-4;

/// Pointer capture data, only present while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// World point under the pointer at pointer-down.
    pub anchor: Vec3,
    /// Object position minus `anchor`, preserved so the object never jumps.
    pub grab_offset: Vec3,
    /// Latest projected pointer position.
    pub pointer: Vec3,
    /// Screen position at pointer-down (px).
    pub press_screen: Vec2,
    /// Set once the pointer has moved past the drag threshold.
    pub engaged: bool,
}

/// Interaction state of one floating object. Exactly one is active; the
/// drag anchor and transition progress live inside the variants that use them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    Dragging(Drag),
    SnappingBack { progress: f32, from: Pose },
    Focusing { progress: f32, from: Pose },
    Focused,
    Unfocusing { progress: f32, from: Pose },
}

/// Payload-free view of [`InteractionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Idle,
    Dragging,
    SnappingBack,
    Focusing,
    Focused,
    Unfocusing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Dragging => "dragging",
            Phase::SnappingBack => "snapping-back",
            Phase::Focusing => "focusing",
            Phase::Focused => "focused",
            Phase::Unfocusing => "unfocusing",
        }
    }
}

/// What a pointer release meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Released below the drag threshold: treat as a click.
    Click,
    /// Released after a real drag: the object is now snapping back.
    DragEnd,
    /// No press was in progress.
    Ignored,
}

impl InteractionState {
    pub fn phase(&self) -> Phase {
        match self {
            InteractionState::Idle => Phase::Idle,
            InteractionState::Dragging(_) => Phase::Dragging,
            InteractionState::SnappingBack { .. } => Phase::SnappingBack,
            InteractionState::Focusing { .. } => Phase::Focusing,
            InteractionState::Focused => Phase::Focused,
            InteractionState::Unfocusing { .. } => Phase::Unfocusing,
        }
    }

    /// Focusing, Focused or Unfocusing. At most one object scene-wide.
    pub fn holds_focus(&self) -> bool {
        matches!(
            self,
            InteractionState::Focusing { .. }
                | InteractionState::Focused
                | InteractionState::Unfocusing { .. }
        )
    }

    pub fn drag(&self) -> Option<&Drag> {
        match self {
            InteractionState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn drag_anchor(&self) -> Option<Vec3> {
        self.drag().map(|d| d.anchor)
    }

    pub fn snap_progress(&self) -> f32 {
        match self {
            InteractionState::SnappingBack { progress, .. } => *progress,
            _ => 0.0,
        }
    }

    /// Progress of the focus or unfocus transition currently running.
    pub fn focus_progress(&self) -> f32 {
        match self {
            InteractionState::Focusing { progress, .. }
            | InteractionState::Unfocusing { progress, .. } => *progress,
            InteractionState::Focused => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance a transition by `dt` over `duration` seconds, snapping to 1 at the end.
pub fn advance(progress: f32, dt: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    let next = (progress + dt.max(0.0) / duration).min(1.0);
    if next >= 1.0 - PROGRESS_EPSILON {
        1.0
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_lands_exactly_on_one() {
        let mut p = 0.0;
        for _ in 0..90 {
            p = advance(p, 1.0 / 60.0, 1.5);
        }
        assert_eq!(p, 1.0);
        assert_eq!(advance(0.2, 1.0, 0.0), 1.0);
        assert_eq!(advance(0.5, -1.0, 1.0), 0.5);
    }

    #[test]
    fn focus_membership() {
        assert!(!InteractionState::Idle.holds_focus());
        assert!(InteractionState::Focused.holds_focus());
        assert_eq!(InteractionState::Focused.focus_progress(), 1.0);
        assert_eq!(InteractionState::Idle.drag_anchor(), None);
    }
}
