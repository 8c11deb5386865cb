//! Window management
//!
//! Each stage asks for one window with a fixed title and size.

use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// What a stage wants its window to look like
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            resizable: true,
        }
    }

    /// Fix the window size; the simulations draw in window pixels
    pub fn fixed_size(mut self) -> Self {
        self.resizable = false;
        self
    }
}

/// Owns the stage window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from spec
    pub fn create(event_loop: &ActiveEventLoop, spec: &WindowSpec) -> Result<Self, WindowError> {
        let attrs = Window::default_attributes()
            .with_title(&spec.title)
            .with_inner_size(LogicalSize::new(spec.width, spec.height))
            .with_resizable(spec.resizable);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );
        log::debug!("Created window '{}' ({}x{})", spec.title, spec.width, spec.height);

        Ok(Self {
            window,
            base_title: spec.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Append a status suffix to the base title
    pub fn update_title(&self, status: Option<&str>) {
        self.window.set_title(&format_title(&self.base_title, status));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_title(base: &str, status: Option<&str>) -> String {
    match status {
        Some(status) if !status.is_empty() => format!("{} - {}", base, status),
        _ => base.to_string(),
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_formatting() {
        assert_eq!(format_title("Smoke Plume", None), "Smoke Plume");
        assert_eq!(format_title("Smoke Plume", Some("")), "Smoke Plume");
        assert_eq!(
            format_title("Smoke Plume", Some("step 3/150")),
            "Smoke Plume - step 3/150"
        );
    }

    #[test]
    fn test_window_spec() {
        let spec = WindowSpec::new("Projectile Motion", 1500, 700);
        assert!(spec.resizable);
        assert!(!spec.fixed_size().resizable);
    }
}
