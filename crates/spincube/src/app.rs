use std::path::PathBuf;

use anyhow::Context;
use image::RgbaImage;
use winit::dpi::PhysicalSize;

use spincube_engine::core::{App, AppControl, FrameCtx};
use spincube_engine::device::Gpu;
use spincube_engine::paint::Color;
use spincube_engine::render::cube::{CubeProgram, CubeRenderer, CubeResources};
use spincube_engine::scene::{FrameState, SceneTransforms};

use crate::startup::Prepared;

/// The render loop: one cube, cleared background, redrawn every frame.
pub struct CubeApp {
    program: CubeProgram,
    /// Decoded texture waiting for the GPU; taken by `on_gpu_ready`.
    pending_image: Option<RgbaImage>,
    image_path: PathBuf,
    renderer: Option<CubeRenderer>,
    frame: FrameState,
    clear: Color,
}

impl CubeApp {
    pub fn new(prepared: Prepared, clear: Color) -> Self {
        Self {
            program: prepared.program,
            pending_image: Some(prepared.image),
            image_path: prepared.image_path,
            renderer: None,
            frame: FrameState::default(),
            clear,
        }
    }
}

impl App for CubeApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let image = self
            .pending_image
            .take()
            .context("GPU resources were already built")?;

        let resources = CubeResources::build(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            &self.program,
            &image,
            &self.image_path,
            gpu.limits().max_texture_dimension_2d,
        )?;

        let info = gpu.adapter_info();
        log::info!(
            "rendering on {} with surface format {:?}",
            info.name,
            resources.surface_format()
        );

        self.renderer = Some(CubeRenderer::new(resources));
        Ok(())
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        self.frame.resize(size.width, size.height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };

        let frame = self.frame;
        let transforms = SceneTransforms::compute(ctx.time.elapsed, &frame);

        ctx.render(self.clear, |rctx, target| {
            renderer.draw(rctx, target, &transforms, &frame);
        })
    }
}
