//! Node/link diagram: model, gesture controller, painter and the canvas component.

mod canvas;
mod component;
pub mod config;
pub mod model;
pub mod render;
pub mod state;
pub mod types;

pub use component::DiagramCanvas;
pub use config::{DiagramConfig, LinkPolicy};
pub use model::{DiagramModel, Node};
pub use render::{Surface, Theme, paint};
pub use state::{CursorHint, DiagramState, Gesture, Reaction};
pub use types::{Color, DiagramSeed, NodeId, Point, Rect, Size};
