//! WebGPU rendering module
//!
//! The world is turned into a draw list (`scene`), painted into a triangle
//! list (`sprites` + `shapes`) and uploaded in one draw call (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawItem, build, frame_vertices, tessellate};
pub use sprites::PaintCtx;
pub use vertex::Vertex;
