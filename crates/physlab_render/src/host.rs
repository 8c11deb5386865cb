//! Event loop host
//!
//! winit allows one event loop per process, so the host keeps it and runs
//! stages on it one after another. Each [`Host::run`] opens the stage's
//! window, drives it at the target frame rate and closes it again when the
//! stage exits or the user closes the window.

use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    platform::run_on_demand::EventLoopExtRunOnDemand,
    window::WindowId,
};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::pacer::FramePacer;
use crate::stage::{Stage, StageControl};
use crate::theme;
use crate::ui::UiRenderer;
use crate::window::WindowSystem;

/// Owns the process event loop
pub struct Host {
    event_loop: EventLoop<()>,
    fps: u32,
    vsync: bool,
}

impl Host {
    pub fn new(fps: u32, vsync: bool) -> Result<Self, RenderError> {
        let event_loop = EventLoop::new().map_err(|e| RenderError::EventLoop(e.to_string()))?;
        Ok(Self {
            event_loop,
            fps,
            vsync,
        })
    }

    /// Run `stage` until it exits or its window is closed
    pub fn run<S: Stage + ?Sized>(&mut self, stage: &mut S) -> Result<(), RenderError> {
        let mut runner = StageRunner {
            gpu: None,
            window: None,
            stage,
            pacer: FramePacer::new(self.fps),
            vsync: self.vsync,
            last_status: None,
            error: None,
        };
        self.event_loop
            .run_app_on_demand(&mut runner)
            .map_err(|e| RenderError::EventLoop(e.to_string()))?;

        match runner.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// What a window does after a failed paint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Recovery {
    /// Reconfigure the surface and carry on
    Reconfigure,
    /// Skip this frame
    DropFrame,
    /// Close the window and report the error
    Abort,
}

impl Recovery {
    fn for_error(error: &RenderError) -> Self {
        match error {
            RenderError::SurfaceLost => Recovery::Reconfigure,
            RenderError::OutOfMemory => Recovery::Abort,
            _ => Recovery::DropFrame,
        }
    }
}

struct Gpu {
    context: RenderContext,
    ui: UiRenderer,
}

/// Per-run application handler
///
/// `gpu` is declared before `window` so the surface is dropped first.
struct StageRunner<'a, S: Stage + ?Sized> {
    gpu: Option<Gpu>,
    window: Option<WindowSystem>,
    stage: &'a mut S,
    pacer: FramePacer,
    vsync: bool,
    last_status: Option<String>,
    error: Option<RenderError>,
}

impl<S: Stage + ?Sized> StageRunner<'_, S> {
    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.open(event_loop) {
            log::error!("Failed to open window: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let spec = self.stage.window();
        let window = WindowSystem::create(event_loop, &spec)?;
        let context = pollster::block_on(RenderContext::with_vsync(
            window.window().clone(),
            self.vsync,
        ))?;
        let ui = UiRenderer::new(&context, window.window());
        theme::apply(ui.ctx());
        self.stage.setup(ui.ctx());

        window.request_redraw();
        self.gpu = Some(Gpu { context, ui });
        self.window = Some(window);
        Ok(())
    }

    fn close(&mut self) {
        self.gpu = None;
        self.window = None;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu)) = (&self.window, &mut self.gpu) else {
            return;
        };

        let clock = self.pacer.tick();
        let stage = &mut *self.stage;
        let mut control = StageControl::Continue;
        let output = gpu
            .ui
            .run(window.window(), |ctx| control = stage.frame(ctx, &clock));

        if let Err(e) = gpu.ui.paint(&gpu.context, output, theme::clear_color()) {
            match Recovery::for_error(&e) {
                Recovery::Reconfigure => gpu.context.reconfigure(),
                Recovery::DropFrame => log::warn!("Dropped frame: {}", e),
                Recovery::Abort => {
                    log::error!("{}", e);
                    self.error = Some(e);
                    control = StageControl::Exit;
                }
            }
        }

        let status = stage.status();
        if status != self.last_status {
            window.update_title(status.as_deref());
            self.last_status = status;
        }

        if control == StageControl::Exit {
            event_loop.exit();
        }
    }
}

impl<S: Stage + ?Sized> ApplicationHandler for StageRunner<'_, S> {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if cause == StartCause::Init {
            self.ensure_window(event_loop);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.ensure_window(event_loop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = &self.window else { return };
        if window.id() != window_id {
            return;
        }
        if let Some(gpu) = &mut self.gpu {
            let _ = gpu.ui.handle_event(window.window(), &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else { return };
        if self.pacer.is_due(Instant::now()) {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_deadline()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lost_surface_is_reconfigured() {
        assert_eq!(Recovery::for_error(&RenderError::SurfaceLost), Recovery::Reconfigure);
    }

    #[test]
    fn test_out_of_memory_aborts() {
        assert_eq!(Recovery::for_error(&RenderError::OutOfMemory), Recovery::Abort);
    }

    #[test]
    fn test_other_errors_drop_the_frame() {
        assert_eq!(
            Recovery::for_error(&RenderError::Other("timeout".to_string())),
            Recovery::DropFrame
        );
        assert_eq!(
            Recovery::for_error(&RenderError::Surface("outdated".to_string())),
            Recovery::DropFrame
        );
    }
}
