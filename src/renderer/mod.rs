//! Render snapshot generation
//!
//! CPU-side geometry and text only; presentation backends (GPU surface,
//! window, fonts) live outside the core and consume [`Scene`] values.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Scene, TextItem, build_scene};
pub use vertex::Vertex;
