pub mod backend;
pub mod ffi;
pub mod logging;
pub mod surface;


pub use backend::{BackendKind, DeviceStats, Frame, HeadlessDevice};
#[cfg(feature = "winit")]
pub use backend::WinitDevice;
pub use ffi::{NULL_HANDLE, SurfaceHandle, register_surface};
pub use logging::{LogLevel, log_level, set_log_level};
pub use surface::{
    DeviceSurface, PresentationBuffer, RenderSurface, Rgba8, SurfaceConfig, SurfaceError,
    SurfaceState,
};
