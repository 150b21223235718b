use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::error::StartupError;
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "spincube".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, hands its GPU context to `app`, and redraws continuously
    /// until the window is closed.
    ///
    /// Any failure before the first frame (event loop, window, GPU, or the app's
    /// `on_gpu_ready`) ends the loop and is returned here.
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new()
            .map_err(|e| StartupError::Host(format!("failed to create winit EventLoop: {e}")))?;
        let mut state = AppState::new(initial, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .map_err(|e| StartupError::Host(format!("winit event loop terminated with error: {e}")))?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            initial,
            gpu_init,
            app,
            entry: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::debug!("stopping runtime: {err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.entry = None;
        self.request_exit(event_loop);
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.initial.title.clone())
            .with_inner_size(self.initial.initial_size);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| StartupError::Host(format!("failed to create window: {e}")))?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        // Split borrows: the app gets the GPU while the entry is borrowed.
        let app = &mut self.app;
        entry
            .with_gpu(|gpu| app.on_gpu_ready(gpu))
            .context("application setup failed")?;

        let size = entry.with_window(|w| w.inner_size());
        self.app.on_resize(size);

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(entry) = self.entry.as_mut() {
            entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            entry.with_window(|w| w.request_redraw());
        }
        self.app.on_resize(new_size);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the surface's FIFO present paces the loop.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_ref() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => self.resize(*new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(new_size) = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size())) {
                    self.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => {
                let mut app_control = AppControl::Continue;

                // Split borrows to avoid `self` capture inside `ouroboros` closures.
                let (app, entry) = (&mut self.app, &mut self.entry);

                if let Some(entry) = entry.as_mut() {
                    entry.with_mut(|fields| {
                        let ft: FrameTime = fields.clock.tick();

                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                id: window_id,
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            time: ft,
                        };

                        app_control = app.on_frame(&mut ctx);
                    });
                }

                if app_control == AppControl::Exit {
                    log::warn!("frame loop stopped by the application");
                    self.entry = None;
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
