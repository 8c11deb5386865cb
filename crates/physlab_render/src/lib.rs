//! Windowing and drawing for PhysLab
//!
//! This crate hides winit, wgpu and the egui plumbing behind a small
//! [`Stage`] trait. A [`Host`] owns the single event loop and runs stages on
//! it one at a time.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`ui::UiRenderer`] - egui input and painting
//! - [`pacer::FramePacer`] - fixed-rate frame scheduling
//! - [`theme`] - dark palette shared by all windows

pub mod context;
mod error;
mod host;
pub mod pacer;
mod stage;
pub mod theme;
pub mod ui;
mod window;

pub use error::RenderError;
pub use host::Host;
pub use pacer::{FrameClock, FramePacer};
pub use stage::{Stage, StageControl};
pub use window::{WindowError, WindowSpec, WindowSystem};
