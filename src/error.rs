//! Error types for the scene engine.
//!
//! Nothing here is fatal: focus errors are rejected requests that leave the
//! scene untouched, image errors leave an object on its placeholder.

use thiserror::Error;

use crate::card::ObjectId;

/// Why a focus request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FocusError {
    #[error("no floating object with id {0:?}")]
    UnknownObject(ObjectId),
    /// Another object is focusing, focused, or unfocusing.
    #[error("object {active:?} already holds focus")]
    Busy { active: ObjectId },
    /// The object is mid-drag or otherwise not at rest.
    #[error("object {0:?} cannot take focus in its current state")]
    NotFocusable(ObjectId),
}

/// Failure reported by the host's image loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("failed to decode {locator}: {reason}")]
    Decode { locator: String, reason: String },
    #[error("image {0} has zero width or height")]
    EmptyImage(String),
}
