pub mod headless;
pub mod raster;
#[cfg(feature = "winit")]
pub mod windowed;

pub use headless::{DeviceStats, Frame, HeadlessDevice};
pub use raster::RgbaTexture;
#[cfg(feature = "winit")]
pub use windowed::WinitDevice;

use crate::surface::{DeviceSurface, RenderSurface};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which device a new surface is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    #[cfg(feature = "winit")]
    Winit,
    Headless,
}

#[derive(Debug, Error)]
#[error("unknown backend '{0}'")]
pub struct UnknownBackend(pub String);

impl BackendKind {
    pub fn create_surface(self) -> Box<dyn RenderSurface> {
        match self {
            #[cfg(feature = "winit")]
            BackendKind::Winit => Box::new(DeviceSurface::new(WinitDevice::new())),
            BackendKind::Headless => Box::new(DeviceSurface::new(HeadlessDevice::new())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "winit")]
            BackendKind::Winit => "winit",
            BackendKind::Headless => "headless",
        }
    }
}

impl Default for BackendKind {
    #[cfg(feature = "winit")]
    fn default() -> Self {
        BackendKind::Winit
    }

    #[cfg(not(feature = "winit"))]
    fn default() -> Self {
        BackendKind::Headless
    }
}

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            #[cfg(feature = "winit")]
            "winit" | "window" => Ok(BackendKind::Winit),
            "headless" => Ok(BackendKind::Headless),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

