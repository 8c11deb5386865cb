//! egui integration
//!
//! Wraps the egui context together with egui-winit (input) and egui-wgpu
//! (painting). Every stage draws exclusively through egui.

use egui_wgpu::ScreenDescriptor;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::context::RenderContext;
use crate::error::RenderError;

pub struct UiRenderer {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiRenderer {
    pub fn new(context: &RenderContext, window: &Window) -> Self {
        let ctx = egui::Context::default();
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(context.device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(&context.device, context.format(), None, 1, false);

        Self {
            ctx,
            winit_state,
            renderer,
        }
    }

    pub fn ctx(&self) -> &egui::Context {
        &self.ctx
    }

    /// Forward a window event to egui
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> egui_winit::EventResponse {
        self.winit_state.on_window_event(window, event)
    }

    /// Run one egui pass and apply its platform output (cursor, clipboard)
    pub fn run(
        &mut self,
        window: &Window,
        build: impl FnMut(&egui::Context),
    ) -> egui::FullOutput {
        let input = self.winit_state.take_egui_input(window);
        let mut output = self.ctx.run(input, build);
        let platform_output = std::mem::take(&mut output.platform_output);
        self.winit_state.handle_platform_output(window, platform_output);
        output
    }

    /// Paint a finished pass onto the surface
    pub fn paint(
        &mut self,
        context: &RenderContext,
        mut output: egui::FullOutput,
        clear: wgpu::Color,
    ) -> Result<(), RenderError> {
        // Textures are uploaded even when the frame is dropped, so the
        // renderer never misses a delta
        let textures_delta = std::mem::take(&mut output.textures_delta);
        for (id, delta) in &textures_delta.set {
            self.renderer
                .update_texture(&context.device, &context.queue, *id, delta);
        }

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        let result = self.draw(context, &paint_jobs, output.pixels_per_point, clear);

        for id in &textures_delta.free {
            self.renderer.free_texture(id);
        }
        result
    }

    fn draw(
        &mut self,
        context: &RenderContext,
        paint_jobs: &[egui::ClippedPrimitive],
        pixels_per_point: f32,
        clear: wgpu::Color,
    ) -> Result<(), RenderError> {
        let frame = match context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [context.config.width, context.config.height],
            pixels_per_point,
        };

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui Encoder"),
            });
        let callback_buffers = self.renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.render(
                &mut render_pass.forget_lifetime(),
                paint_jobs,
                &screen_descriptor,
            );
        }

        context.queue.submit(
            callback_buffers
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        frame.present();
        Ok(())
    }
}
