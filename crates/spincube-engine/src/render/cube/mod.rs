//! The textured cube: mesh data, shader program, GPU resources and draw call.
//!
//! Work is split by when it can fail:
//! - `CubeProgram::build` and `decode_rgba` run on the CPU before a window exists
//! - `CubeResources::build` runs once the GPU is up
//! - `CubeRenderer::draw` runs every frame and never fails

mod mesh;
mod mipmap;
mod program;
mod renderer;
mod resources;
mod shader;
mod texture;

pub use mesh::{Vertex, INDEX_COUNT, INDICES, VERTICES};
pub use program::{
    CubeProgram, TransformUniform, SAMPLER_BINDING, TEXTURE_BINDING, TRANSFORMS_BINDING,
};
pub use renderer::CubeRenderer;
pub use resources::CubeResources;
pub use shader::{
    compile_stage, link, BindingKind, BindingSlot, BindingTable, CompiledStage, LinkedProgram,
    ShaderStage,
};
pub use texture::{decode_rgba, mip_level_count, CubeTexture, TEXTURE_FORMAT};

/// Bundled vertex stage: applies `proj * view * model` and forwards color and UV.
pub const CUBE_VERTEX_WGSL: &str = include_str!("shaders/cube.vert.wgsl");
/// Bundled fragment stage: vertex color modulated by the texture sample.
pub const CUBE_FRAGMENT_WGSL: &str = include_str!("shaders/cube.frag.wgsl");
