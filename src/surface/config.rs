use super::error::{SurfaceError, SurfaceResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Window parameters handed to `RenderSurface::init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
    pub resizable: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "lumen".into(),
            vsync: true,
            resizable: true,
        }
    }
}

impl SurfaceConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builds a config from the signed sizes a C caller passes in.
    /// Negative values become 0 and are rejected by `validate`.
    pub fn from_c_dimensions(width: i32, height: i32, title: impl Into<String>) -> Self {
        Self::new(
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
            title,
        )
    }

    pub fn validate(&self) -> SurfaceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::InvalidDimensions {
                width: i64::from(self.width),
                height: i64::from(self.height),
            });
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> SurfaceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SurfaceResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }
}
