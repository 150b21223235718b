//! Startup sequencing.
//!
//! CPU-side preconditions (shader compile + link, texture decode) are checked
//! before the event loop exists, so a bad shader or a missing image never opens
//! a window.

use std::path::PathBuf;

use image::RgbaImage;
use spincube_engine::render::cube::{decode_rgba, CubeProgram};
use spincube_engine::window::Runtime;
use spincube_engine::StartupError;

use crate::app::CubeApp;
use crate::config::DemoConfig;

/// Outputs of the CPU-side startup steps, ready for GPU upload.
pub struct Prepared {
    pub program: CubeProgram,
    pub image: RgbaImage,
    /// Where `image` was read from.
    pub image_path: PathBuf,
}

/// Compiles and links the shader program, then decodes the texture.
///
/// Stops at the first failure, in that order.
pub fn prepare(config: &DemoConfig) -> Result<Prepared, StartupError> {
    let program = CubeProgram::build(&config.vertex_wgsl, &config.fragment_wgsl)?;
    log::info!("shader program linked");

    let image = decode_rgba(&config.texture_path)?;

    Ok(Prepared {
        program,
        image,
        image_path: config.texture_path.clone(),
    })
}

/// Runs the demo until the window closes.
pub fn run(config: DemoConfig) -> anyhow::Result<()> {
    let prepared = prepare(&config)?;
    let app = CubeApp::new(prepared, config.clear_color);
    Runtime::run(config.runtime, config.gpu, app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    use spincube_engine::render::cube::ShaderStage;

    fn temp_png(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("spincube-{}-{name}", std::process::id()));
        RgbaImage::from_pixel(4, 4, image::Rgba([40, 160, 40, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn invalid_vertex_shader_fails_before_the_event_loop() {
        let config = DemoConfig {
            vertex_wgsl: Cow::Borrowed("@vertex fn vs_main( -> {"),
            ..DemoConfig::default()
        };
        // `run` returns without ever creating an event loop.
        let err = run(config).unwrap_err();
        match err.downcast_ref::<StartupError>() {
            Some(StartupError::ShaderCompile { stage, log }) => {
                assert_eq!(*stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn shaders_are_checked_before_the_texture() {
        let config = DemoConfig {
            fragment_wgsl: Cow::Borrowed("not wgsl at all"),
            texture_path: PathBuf::from("definitely/missing.png"),
            ..DemoConfig::default()
        };
        let err = prepare(&config).err().unwrap();
        assert!(matches!(err, StartupError::ShaderCompile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn missing_texture_is_reported_with_its_path() {
        let config = DemoConfig {
            texture_path: PathBuf::from("definitely/missing.png"),
            ..DemoConfig::default()
        };
        match prepare(&config).err().unwrap() {
            StartupError::AssetDecode { path, .. } => {
                assert_eq!(path, PathBuf::from("definitely/missing.png"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn prepares_bundled_shaders_and_a_real_png() {
        let path = temp_png("ok.png");
        let config = DemoConfig {
            texture_path: path.clone(),
            ..DemoConfig::default()
        };
        let prepared = prepare(&config).unwrap();
        assert_eq!(prepared.image.dimensions(), (4, 4));
        assert_eq!(prepared.program.transforms.size, 192);
        assert_eq!(prepared.image_path, path);
        let _ = std::fs::remove_file(path);
    }
}
