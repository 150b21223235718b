use std::fmt;
use std::path::PathBuf;

use crate::render::cube::ShaderStage;

/// Fatal conditions that stop the process before the first frame.
///
/// All of them are static preconditions (bad shader source, missing asset,
/// unsupported platform); none are retried.
#[derive(Debug, Clone, PartialEq)]
pub enum StartupError {
    /// Event loop or window creation failed.
    Host(String),
    /// No usable GPU surface, adapter or device.
    Loader(String),
    /// A shader stage failed to parse or validate.
    ShaderCompile { stage: ShaderStage, log: String },
    /// The two stages do not fit together or with the vertex layout.
    ProgramLink { log: String },
    /// The texture image could not be read or decoded.
    AssetDecode { path: PathBuf, reason: String },
}

impl StartupError {
    /// Short caption suitable for a dialog title or log prefix.
    pub fn caption(&self) -> &'static str {
        match self {
            StartupError::Host(_) => "window system error",
            StartupError::Loader(_) => "graphics initialization error",
            StartupError::ShaderCompile { .. } => "shader compile error",
            StartupError::ProgramLink { .. } => "shader link error",
            StartupError::AssetDecode { .. } => "texture load error",
        }
    }

    /// Diagnostic body without the caption.
    pub fn detail(&self) -> String {
        match self {
            StartupError::Host(msg) | StartupError::Loader(msg) => msg.clone(),
            StartupError::ShaderCompile { stage, log } => format!("{stage} stage:\n{log}"),
            StartupError::ProgramLink { log } => log.clone(),
            StartupError::AssetDecode { path, reason } => {
                format!("failed to load texture data from {}: {reason}", path.display())
            }
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.caption(), self.detail())
    }
}

impl std::error::Error for StartupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_caption_and_detail() {
        let err = StartupError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "expected `;`".into(),
        };
        let text = err.to_string();
        assert!(text.starts_with("shader compile error"));
        assert!(text.contains("fragment stage"));
        assert!(text.contains("expected `;`"));
    }

    #[test]
    fn asset_decode_mentions_path() {
        let err = StartupError::AssetDecode {
            path: PathBuf::from("Grass_01.png"),
            reason: "not found".into(),
        };
        assert!(err.detail().contains("Grass_01.png"));
    }

    #[test]
    fn survives_anyhow_round_trip() {
        let err: anyhow::Error = StartupError::Loader("no adapter".into()).into();
        let back = err.downcast_ref::<StartupError>();
        assert_eq!(back, Some(&StartupError::Loader("no adapter".into())));
    }
}
