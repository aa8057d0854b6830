pub mod buffer;
pub mod color;
pub mod config;
pub mod device;
pub mod device_surface;
pub mod error;

pub use buffer::PresentationBuffer;
pub use color::Rgba8;
pub use config::SurfaceConfig;
pub use device::Device;
pub use device_surface::DeviceSurface;
pub use error::{SurfaceError, SurfaceResult};

/// Lifecycle of a surface. `Shutdown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Uninitialized,
    Ready,
    Shutdown,
}

/// A window that can be cleared and have raw pixels blitted to it each frame.
///
/// Frame operations are only meaningful while `Ready`; anywhere else they do
/// nothing. Dropping an implementation must release its native resources.
pub trait RenderSurface {
    fn init(&mut self, config: &SurfaceConfig) -> SurfaceResult<()>;

    fn begin_frame(&mut self);

    fn end_frame(&mut self);

    /// Channels are normalized; out of range values are clamped.
    fn clear(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// `pixels` is row-major, `width * height` values of `0xAARRGGBB`.
    fn present_pixels(&mut self, pixels: &[u32], width: u32, height: u32);

    fn shutdown(&mut self);

    /// Processes pending window events. Returns `false` once a close was requested.
    fn pump_events(&mut self) -> bool;

    fn state(&self) -> SurfaceState;
}
