//! WebGPU rendering module
//!
//! The scene is built on the CPU as one triangle list in world units, then
//! mapped to NDC and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, world_to_ndc};
pub use scene::build_scene;
pub use vertex::{Palette, Vertex};
