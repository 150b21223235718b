//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame to
//! obtain `FrameTime`. `FrameTime::elapsed` drives animation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
