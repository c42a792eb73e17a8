use std::collections::VecDeque;

use glam::{Vec2, Vec3};

use crate::card::ObjectId;

/// Pointer position in both spaces the engine needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Screen position in px; used for the drag threshold.
    pub screen: Vec2,
    /// Pointer projected onto the grabbed object's drag plane.
    pub world: Vec3,
}

impl PointerSample {
    pub fn new(screen: Vec2, world: Vec3) -> Self {
        Self { screen, world }
    }
}

/// Input delivered by the host between steps. Applied in order at the start
/// of the next step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press on an object. The host captures the pointer to it until release.
    PointerDown { object: ObjectId, at: PointerSample },
    /// Move of the captured pointer.
    PointerMove { at: PointerSample },
    /// Release of the captured pointer.
    PointerUp { at: PointerSample },
    /// Object under the pointer changed (`None` when over empty space).
    Hover(Option<ObjectId>),
    /// Pointer position in normalized device coordinates, for parallax.
    PointerNdc(Vec2),
    /// Host cancel signal (e.g. escape key): closes any focus.
    Cancel,
}

/// FIFO of pending input, drained once per step.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Cursor affordance the host UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Pressed on an object but not yet dragging.
    Pointer,
    /// Hovering an object that can be picked up.
    Grab,
    /// Dragging.
    Grabbing,
}

impl CursorHint {
    /// CSS cursor keyword.
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Pointer => "pointer",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Hover(Some(ObjectId(1))));
        q.push(InputEvent::Cancel);
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(InputEvent::Hover(Some(ObjectId(1)))));
        assert_eq!(q.pop(), Some(InputEvent::Cancel));
        assert!(q.is_empty());
    }
}
