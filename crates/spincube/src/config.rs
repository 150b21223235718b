use std::borrow::Cow;
use std::path::PathBuf;

use spincube_engine::device::GpuInit;
use spincube_engine::logging::LoggingConfig;
use spincube_engine::paint::Color;
use spincube_engine::render::cube::{CUBE_FRAGMENT_WGSL, CUBE_VERTEX_WGSL};
use spincube_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

pub const WINDOW_TITLE: &str = "Minimal GL";
pub const WINDOW_WIDTH: f64 = 640.0;
pub const WINDOW_HEIGHT: f64 = 480.0;

/// Texture file, resolved against the working directory.
pub const TEXTURE_PATH: &str = "Grass_01.png";

/// Cornflower blue.
pub const CLEAR_COLOR: Color = Color::opaque(0.39, 0.58, 0.92);

/// Everything the demo needs to start. There is no config file; this is it.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
    pub texture_path: PathBuf,
    pub vertex_wgsl: Cow<'static, str>,
    pub fragment_wgsl: Cow<'static, str>,
    pub clear_color: Color,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig {
                title: WINDOW_TITLE.to_string(),
                initial_size: LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            },
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
            texture_path: PathBuf::from(TEXTURE_PATH),
            vertex_wgsl: Cow::Borrowed(CUBE_VERTEX_WGSL),
            fragment_wgsl: Cow::Borrowed(CUBE_FRAGMENT_WGSL),
            clear_color: CLEAR_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo() {
        let c = DemoConfig::default();
        assert_eq!(c.runtime.title, "Minimal GL");
        assert_eq!(c.runtime.initial_size, LogicalSize::new(640.0, 480.0));
        assert_eq!(c.texture_path, PathBuf::from("Grass_01.png"));
        assert_eq!(c.clear_color.a, 1.0);
        assert_eq!(c.gpu.present_mode, wgpu::PresentMode::Fifo);
        assert!(!c.gpu.prefer_srgb);
    }
}
