use crate::palette::{ColorPalette, PaletteError};
use crate::types::{FaceColors, Rgba};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Errors from loading or validating a [`ViewerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Full viewer configuration. Every section falls back to its defaults, so a
/// partial file (or none at all) is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub input: InputConfig,
    /// Extra or replacement palette entries.
    pub palette: BTreeMap<String, Rgba>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cube Viewer".into(),
            width: 800,
            height: 600,
        }
    }
}

/// Projection and eye placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance the eye sits back from the origin along +Z.
    pub eye_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            eye_distance: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Distance between neighbouring cube centers in the lattice.
    pub spacing: f32,
    pub line_width: f32,
    pub clear_color: Rgba,
    pub faces: FaceColors,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spacing: 2.0,
            line_width: 5.0,
            clear_color: Rgba::WHITE,
            faces: FaceColors::default(),
        }
    }
}

/// How drag deltas are measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    /// Every move measures from the pointer-down position.
    #[default]
    Anchored,
    /// Every move re-anchors at the current position.
    Incremental,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Screen-space delta is divided by this before becoming degrees.
    pub drag_divisor: f32,
    pub drag_mode: DragMode,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_divisor: 10.0,
            drag_mode: DragMode::Anchored,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&source)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The built-in palette with this config's overrides applied.
    pub fn palette(&self) -> Result<ColorPalette, ConfigError> {
        Ok(ColorPalette::with_overrides(&self.palette)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return Err(invalid("camera.fov_y_degrees", "must be in (0, 180)"));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(invalid("camera.near/far", "need 0 < near < far"));
        }
        if !(cam.eye_distance > 0.0) {
            return Err(invalid("camera.eye_distance", "must be positive"));
        }
        if !(self.scene.spacing > 0.0) {
            return Err(invalid("scene.spacing", "must be positive"));
        }
        if !(self.scene.line_width > 0.0) {
            return Err(invalid("scene.line_width", "must be positive"));
        }
        if !self.scene.clear_color.is_unit_range() {
            return Err(invalid("scene.clear_color", "components must be in [0, 1]"));
        }
        if !(self.input.drag_divisor > 0.0) {
            return Err(invalid("input.drag_divisor", "must be positive"));
        }
        let palette = self.palette()?;
        palette.resolve(&self.scene.faces)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
