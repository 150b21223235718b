use bytemuck::{Pod, Zeroable};

use crate::error::StartupError;
use crate::scene::SceneTransforms;

use super::shader::{compile_stage, link, BindingKind, BindingSlot, LinkedProgram, ShaderStage};

/// Uniform block name for the model/view/proj matrices.
pub const TRANSFORMS_BINDING: &str = "transforms";
/// Texture bound to the cube faces.
pub const TEXTURE_BINDING: &str = "tex";
pub const SAMPLER_BINDING: &str = "tex_sampler";

/// CPU mirror of the shader's `Transforms` block: model, view, proj (column-major).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

impl From<&SceneTransforms> for TransformUniform {
    fn from(t: &SceneTransforms) -> Self {
        Self {
            model: t.model.to_cols_array_2d(),
            view: t.view.to_cols_array_2d(),
            proj: t.projection.to_cols_array_2d(),
        }
    }
}

/// The linked cube program with its resource slots resolved once, at link time.
#[derive(Debug, Clone)]
pub struct CubeProgram {
    linked: LinkedProgram,
    pub transforms: BindingSlot,
    pub texture: BindingSlot,
    pub sampler: BindingSlot,
}

impl CubeProgram {
    /// Compiles both stages, links them, and resolves the slots the renderer binds.
    ///
    /// All three resources must live in bind group 0, and the uniform block must
    /// match [`TransformUniform`] byte for byte.
    pub fn build(vertex_src: &str, fragment_src: &str) -> Result<Self, StartupError> {
        let vertex = compile_stage(ShaderStage::Vertex, vertex_src)?;
        let fragment = compile_stage(ShaderStage::Fragment, fragment_src)?;
        let linked = link(vertex, fragment)?;

        let bindings = linked.bindings();
        let transforms = bindings.resolve(TRANSFORMS_BINDING, BindingKind::Uniform)?;
        let texture = bindings.resolve(TEXTURE_BINDING, BindingKind::Texture)?;
        let sampler = bindings.resolve(SAMPLER_BINDING, BindingKind::Sampler)?;

        let expected = std::mem::size_of::<TransformUniform>() as u32;
        if transforms.size != expected {
            return Err(StartupError::ProgramLink {
                log: format!(
                    "`{TRANSFORMS_BINDING}` is {} bytes, expected {expected} (three mat4x4<f32>)",
                    transforms.size
                ),
            });
        }

        for (name, slot) in [
            (TRANSFORMS_BINDING, transforms),
            (TEXTURE_BINDING, texture),
            (SAMPLER_BINDING, sampler),
        ] {
            if slot.group != 0 {
                return Err(StartupError::ProgramLink {
                    log: format!("`{name}` must be in @group(0), found @group({})", slot.group),
                });
            }
        }

        Ok(Self {
            linked,
            transforms,
            texture,
            sampler,
        })
    }

    pub fn linked(&self) -> &LinkedProgram {
        &self.linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cube::{CUBE_FRAGMENT_WGSL, CUBE_VERTEX_WGSL};

    #[test]
    fn bundled_program_resolves_all_slots() {
        let p = CubeProgram::build(CUBE_VERTEX_WGSL, CUBE_FRAGMENT_WGSL).unwrap();
        assert_eq!(p.transforms.binding, 0);
        assert_eq!(p.texture.binding, 1);
        assert_eq!(p.sampler.binding, 2);
    }

    #[test]
    fn broken_vertex_source_is_a_compile_error() {
        let err = CubeProgram::build("this is not wgsl", CUBE_FRAGMENT_WGSL).unwrap_err();
        assert!(matches!(err, StartupError::ShaderCompile { stage: ShaderStage::Vertex, .. }));
    }

    #[test]
    fn broken_fragment_source_is_a_compile_error() {
        let err = CubeProgram::build(CUBE_VERTEX_WGSL, "@fragment fn").unwrap_err();
        assert!(matches!(err, StartupError::ShaderCompile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn fragment_without_texture_fails_to_resolve() {
        let frag = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;
        let err = CubeProgram::build(CUBE_VERTEX_WGSL, frag).unwrap_err();
        match err {
            StartupError::ProgramLink { log } => assert!(log.contains("`tex`")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undersized_transform_block_fails() {
        let vert = r#"
struct Transforms { mvp: mat4x4<f32> };
@group(0) @binding(0) var<uniform> transforms: Transforms;
struct Out {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) tex_coord: vec2<f32>,
};
@vertex
fn vs_main(@location(0) p: vec3<f32>) -> Out {
    var o: Out;
    o.pos = transforms.mvp * vec4<f32>(p, 1.0);
    o.color = vec4<f32>(1.0);
    o.tex_coord = vec2<f32>(0.0);
    return o;
}
"#;
        let err = CubeProgram::build(vert, CUBE_FRAGMENT_WGSL).unwrap_err();
        match err {
            StartupError::ProgramLink { log } => assert!(log.contains("64 bytes")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn uniform_layout_is_model_view_proj() {
        let t = SceneTransforms::at(1.0, 640, 480);
        let u = TransformUniform::from(&t);
        assert_eq!(std::mem::size_of::<TransformUniform>(), 192);

        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(&floats[0..16], &t.model.to_cols_array());
        assert_eq!(&floats[16..32], &t.view.to_cols_array());
        assert_eq!(&floats[32..48], &t.projection.to_cols_array());
    }
}
