use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("surface was shut down and cannot be initialized again")]
    ShutDown,

    #[error("event loop unavailable: {0}")]
    EventLoop(String),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to create drawing context: {0}")]
    Context(String),

    #[error("failed to allocate {width}x{height} presentation buffer: {reason}")]
    Texture {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("failed to read surface config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse surface config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;
