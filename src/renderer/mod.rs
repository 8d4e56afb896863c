//! WebGPU rendering module
//!
//! The scene is built as plain colored triangles in world pixels
//! (`shapes::build_scene`) and mapped to the letterboxed viewport on upload.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_scene;
pub use vertex::Vertex;
