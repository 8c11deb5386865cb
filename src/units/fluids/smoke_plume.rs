//! Buoyant smoke plume
//!
//! Runs the plume solver one step per frame and shows the smoke density with
//! the viridis colour map, lowest row at the bottom. When the configured
//! number of steps is reached the last frame stays up until the window is
//! closed, unless `fluids.exit_when_done` is set.

use egui::{Color32, ColorImage, Frame, Pos2, ProgressBar, Rect, Sense, TextureHandle, TextureOptions};
use physlab_core::UnitError;
use physlab_physics::{Grid, SmokePlume};
use physlab_render::{FrameClock, Stage, StageControl, WindowSpec};

use crate::config::FluidsConfig;
use crate::input::{InputAction, InputMapper, KeyBindings};
use crate::units::Runtime;

const BACKGROUND: Color32 = Color32::from_rgb(0, 0, 0);

/// Viridis sampled at nine evenly spaced points
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Entry point
pub fn main(runtime: &mut Runtime) -> Result<(), UnitError> {
    let config = runtime.config.fluids.clone();
    let mut stage = SmokePlumeStage {
        plume: SmokePlume::new(config.to_plume_config()),
        config,
        texture: None,
    };
    runtime.host.run(&mut stage)?;
    Ok(())
}

/// Viridis colour for `t` in `[0, 1]` (clamped)
pub fn viridis(t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let f = scaled - i as f32;
    let [r0, g0, b0] = VIRIDIS[i];
    let [r1, g1, b1] = VIRIDIS[i + 1];
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
    Color32::from_rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Colour-mapped image of a grid, scaled to its own value range
///
/// Grid row 0 is the bottom of the domain, so rows are flipped.
pub fn smoke_image(grid: &Grid) -> ColorImage {
    let (width, height) = grid.resolution();
    let values = grid.values();
    let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = hi - lo;

    let mut pixels = Vec::with_capacity(width * height);
    for row in (0..height).rev() {
        for value in &values[row * width..(row + 1) * width] {
            let t = if range > 0.0 { (value - lo) / range } else { 0.0 };
            pixels.push(viridis(t));
        }
    }
    ColorImage {
        size: [width, height],
        pixels,
    }
}

struct SmokePlumeStage {
    config: FluidsConfig,
    plume: SmokePlume,
    texture: Option<TextureHandle>,
}

impl SmokePlumeStage {
    fn upload(&mut self) {
        if let Some(texture) = &mut self.texture {
            texture.set(smoke_image(self.plume.smoke()), TextureOptions::LINEAR);
        }
    }
}

impl Stage for SmokePlumeStage {
    fn window(&self) -> WindowSpec {
        WindowSpec::new("Smoke Plume", self.config.width, self.config.height).fixed_size()
    }

    fn setup(&mut self, ctx: &egui::Context) {
        let image = smoke_image(self.plume.smoke());
        self.texture = Some(ctx.load_texture("smoke", image, TextureOptions::LINEAR));
    }

    fn frame(&mut self, ctx: &egui::Context, _clock: &FrameClock) -> StageControl {
        for action in InputMapper::actions(ctx, KeyBindings::default()) {
            match action {
                InputAction::Exit => return StageControl::Exit,
                InputAction::Reset => {
                    log::info!("Restarting smoke plume");
                    self.plume = SmokePlume::new(self.config.to_plume_config());
                    self.upload();
                }
            }
        }

        if !self.plume.is_finished() {
            self.plume.step();
            self.upload();
            if self.plume.is_finished() {
                log::info!("Smoke plume finished after {} steps", self.plume.steps_taken());
                if self.config.exit_when_done {
                    return StageControl::Exit;
                }
            }
        }

        egui::TopBottomPanel::top("progress").show(ctx, |ui| {
            ui.add_space(4.0);
            let total = self.plume.config().time_steps;
            ui.add(
                ProgressBar::new(self.plume.progress())
                    .text(format!("{}/{}", self.plume.steps_taken(), total)),
            );
            ui.add_space(4.0);
        });

        egui::CentralPanel::default()
            .frame(Frame::default().fill(BACKGROUND))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
                let side = response.rect.width().min(response.rect.height());
                let rect = Rect::from_center_size(response.rect.center(), egui::vec2(side, side));
                if let Some(texture) = &self.texture {
                    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                    painter.image(texture.id(), rect, uv, Color32::WHITE);
                }
            });

        StageControl::Continue
    }

    fn status(&self) -> Option<String> {
        if self.plume.is_finished() {
            Some("done".to_string())
        } else {
            Some(format!(
                "step {}/{}",
                self.plume.steps_taken(),
                self.plume.config().time_steps
            ))
        }
    }
}
