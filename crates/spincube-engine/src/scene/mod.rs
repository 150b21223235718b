//! Per-frame scene state.
//!
//! Responsibilities:
//! - hold the framebuffer size (`FrameState`), updated by resize events
//! - derive projection/view/model matrices from elapsed time and that size

mod frame_state;
mod transforms;

pub use frame_state::{FrameState, FALLBACK_ASPECT};
pub use transforms::{
    projection, view, SceneTransforms, SpinAngles, CAMERA_DISTANCE, DEGREES_PER_SECOND,
    FOV_Y_DEGREES, Z_FAR, Z_NEAR,
};
