//! Procedural animation engine for a gallery backdrop. A boid swarm drifts
//! behind floating cards that can be dragged and brought into focus.

pub mod app;
pub mod camera;
pub mod card;
pub mod config;
pub mod content;
pub mod debug;
pub mod drift;
pub mod error;
pub mod flock;
pub mod input;
pub mod math;
pub mod render;
pub mod scene;
pub mod shading;
pub mod spatial;

pub use card::{FloatingObject, ObjectId, Phase};
pub use config::SceneConfig;
pub use content::{DisplayItem, ImageInfo};
pub use error::{FocusError, ImageError};
pub use input::{CursorHint, InputEvent, PointerSample};
pub use scene::{Scene, SceneEvent, ViewportClass};
