//! Spincube engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the textured-cube
//! renderer used by the `spincube` binary.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
pub mod paint;
pub mod scene;

mod error;

pub use error::StartupError;
