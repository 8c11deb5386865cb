//! The interface between the host and anything that draws a window
//!
//! The launcher and every simulation are stages: each one owns its state,
//! describes the window it wants and builds one egui frame at a time.

use crate::pacer::FrameClock;
use crate::window::WindowSpec;

/// What the host should do after a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageControl {
    Continue,
    /// Close the window and return from [`Host::run`](crate::Host::run)
    Exit,
}

pub trait Stage {
    /// Window to open for this stage
    fn window(&self) -> WindowSpec;

    /// Called once the window and GPU are ready, before the first frame
    ///
    /// Textures must be (re)created here; each run gets a fresh context.
    fn setup(&mut self, _ctx: &egui::Context) {}

    /// Build one frame
    fn frame(&mut self, ctx: &egui::Context, clock: &FrameClock) -> StageControl;

    /// Optional suffix for the window title
    fn status(&self) -> Option<String> {
        None
    }
}
