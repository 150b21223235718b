//! GPU rendering subsystem.
//!
//! Renderers issue GPU commands via wgpu into a frame that `core::FrameCtx`
//! has already cleared. Each renderer owns its GPU resources (pipelines, buffers).

mod ctx;
pub mod cube;

pub use ctx::{RenderCtx, RenderTarget};
