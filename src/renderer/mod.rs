//! WebGPU rendering module
//!
//! The scene builder turns game state into colored pixel-space triangles;
//! the pipeline maps them to NDC and draws them in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
