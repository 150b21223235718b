use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Call order: `on_gpu_ready` once, then any number of `on_window_event`,
/// `on_resize` and `on_frame` calls on the main thread.
pub trait App {
    /// Called once after the window and GPU context exist, before the first frame.
    ///
    /// An error here is fatal: the runtime stops and [`Runtime::run`] returns it.
    ///
    /// [`Runtime::run`]: crate::window::Runtime::run
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let _ = gpu;
        Ok(())
    }

    /// Called for window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called after the surface has been reconfigured for `size` (physical pixels).
    ///
    /// Zero sizes are passed through (e.g. while minimized).
    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        let _ = size;
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
