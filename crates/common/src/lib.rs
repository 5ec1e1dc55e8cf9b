//! Shared types for the cube viewer.
//!
//! # Invariants
//! - Face order is always front, back, top, bottom, right, left.
//! - A validated [`ViewerConfig`] only names colors its palette can resolve.

pub mod config;
pub mod palette;
pub mod types;

pub use config::{
    CameraConfig, ConfigError, DragMode, InputConfig, SceneConfig, ViewerConfig, WindowConfig,
};
pub use palette::{ColorPalette, PaletteError};
pub use types::{Face, FaceColors, Rgba};

pub fn crate_info() -> &'static str {
    "cubeview-common v0.1.0"
}
