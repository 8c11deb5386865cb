use physlab_core::UnitError;

use crate::window::WindowError;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// The event loop could not be created or run
    EventLoop(String),
    /// Window creation failed
    Window(String),
    /// No GPU adapter can present to the surface
    NoAdapter,
    /// Device request failed
    Device(String),
    /// Surface could not be created or configured
    Surface(String),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::EventLoop(msg) => write!(f, "Event loop error: {}", msg),
            RenderError::Window(msg) => write!(f, "Window creation failed: {}", msg),
            RenderError::NoAdapter => write!(f, "No suitable GPU adapter found"),
            RenderError::Device(msg) => write!(f, "Failed to create device: {}", msg),
            RenderError::Surface(msg) => write!(f, "Surface error: {}", msg),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<WindowError> for RenderError {
    fn from(e: WindowError) -> Self {
        match e {
            WindowError::CreationFailed(msg) => RenderError::Window(msg),
        }
    }
}

impl From<RenderError> for UnitError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Window(msg) => UnitError::Window(msg),
            RenderError::EventLoop(msg) => UnitError::Window(msg),
            other => UnitError::Render(other.to_string()),
        }
    }
}
