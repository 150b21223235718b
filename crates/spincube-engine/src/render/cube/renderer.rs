use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{FrameState, SceneTransforms};

use super::program::TransformUniform;
use super::resources::CubeResources;

/// Draws the cube from prebuilt [`CubeResources`].
///
/// Convention:
/// - the target has already been cleared; this pass loads it
/// - the viewport covers the full framebuffer tracked by `FrameState`
pub struct CubeRenderer {
    resources: CubeResources,
}

impl CubeRenderer {
    pub fn new(resources: CubeResources) -> Self {
        Self { resources }
    }

    /// Uploads `transforms` and records one indexed draw of the whole mesh.
    ///
    /// Does nothing when the framebuffer has no area.
    pub fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        transforms: &SceneTransforms,
        frame: &FrameState,
    ) {
        if !frame.has_area() {
            return;
        }

        let res = &self.resources;
        debug_assert_eq!(ctx.surface_format, res.surface_format);

        let uniform = TransformUniform::from(transforms);
        ctx.queue
            .write_buffer(&res.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("spincube cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(
            0.0,
            0.0,
            frame.fb_width() as f32,
            frame.fb_height() as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.vertex_buffer.slice(..));
        rpass.set_index_buffer(res.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..res.index_count, 0, 0..1);
    }
}
