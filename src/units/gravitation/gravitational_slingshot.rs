//! Gravitational slingshot
//!
//! Click once to place a ship, click again to launch it toward the pointer.
//! Ships fall freely around a planet fixed at the centre of the window and
//! are removed when they crash or fly off screen.
//!
//! `background.jpg` and `planet.png` are read from the category's asset
//! directory when present; otherwise a plain background and a drawn planet
//! are used.

use std::path::Path;

use egui::{Color32, ColorImage, Frame, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions};
use image::imageops::FilterType;
use physlab_core::UnitError;
use physlab_math::Vec2;
use physlab_physics::{ShipFate, ShipKey, SlingshotConfig, SlingshotWorld};
use physlab_render::{FrameClock, Stage, StageControl, WindowSpec};

use crate::config::GravitationConfig;
use crate::input::{InputAction, InputMapper, KeyBindings};
use crate::units::Runtime;

use super::CATEGORY;

const SPACE: Color32 = Color32::from_rgb(8, 10, 24);
const SHIP: Color32 = Color32::RED;
const PLANET: Color32 = Color32::from_rgb(70, 110, 200);
const LAUNCH_LINE: Color32 = Color32::WHITE;

/// Entry point
pub fn main(runtime: &mut Runtime) -> Result<(), UnitError> {
    let config = runtime.config.gravitation.clone();
    let assets = runtime.category_dir(CATEGORY).join(&config.assets_dir);
    let planet_edge = (config.planet_radius * 2.0).round().max(1.0) as u32;

    let mut stage = SlingshotStage {
        background: load_image(&assets.join("background.jpg"), [config.width, config.height]),
        planet: load_image(&assets.join("planet.png"), [planet_edge, planet_edge]),
        textures: Textures::default(),
        scene: SlingshotScene::new(config.to_slingshot_config()),
        config,
    };
    runtime.host.run(&mut stage)?;
    Ok(())
}

/// Decode an optional image, resized to `size`
fn load_image(path: &Path, size: [u32; 2]) -> Option<ColorImage> {
    if !path.is_file() {
        log::debug!("No image at {}, using fallback", path.display());
        return None;
    }
    match image::open(path) {
        Ok(image) => {
            let rgba = image
                .resize_exact(size[0], size[1], FilterType::Triangle)
                .into_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
        }
        Err(e) => {
            log::warn!("Could not load {}: {}", path.display(), e);
            None
        }
    }
}

/// Planet, ships and the ship waiting to be launched
pub struct SlingshotScene {
    world: SlingshotWorld,
    pending: Option<Vec2>,
}

impl SlingshotScene {
    pub fn new(config: SlingshotConfig) -> Self {
        Self {
            world: SlingshotWorld::new(config),
            pending: None,
        }
    }

    pub fn world(&self) -> &SlingshotWorld {
        &self.world
    }

    /// Ship placed but not yet launched
    pub fn pending(&self) -> Option<Vec2> {
        self.pending
    }

    /// First click places a ship, the second launches it
    ///
    /// Returns the key of a newly launched ship.
    pub fn click(&mut self, pos: Vec2) -> Option<ShipKey> {
        match self.pending.take() {
            Some(placed) => {
                let key = self.world.launch(placed, pos);
                log::debug!("Launched ship from ({:.0}, {:.0})", placed.x, placed.y);
                Some(key)
            }
            None => {
                self.pending = Some(pos);
                None
            }
        }
    }

    pub fn step(&mut self) {
        for (_, fate) in self.world.step() {
            match fate {
                ShipFate::Collided => log::debug!("Ship crashed into the planet"),
                ShipFate::LeftBounds => log::debug!("Ship left the screen"),
            }
        }
    }

    pub fn reset(&mut self) {
        self.world.clear();
        self.pending = None;
    }
}

#[derive(Default)]
struct Textures {
    background: Option<TextureHandle>,
    planet: Option<TextureHandle>,
}

struct SlingshotStage {
    config: GravitationConfig,
    scene: SlingshotScene,
    background: Option<ColorImage>,
    planet: Option<ColorImage>,
    textures: Textures,
}

impl Stage for SlingshotStage {
    fn window(&self) -> WindowSpec {
        WindowSpec::new("Gravitational Slingshot Effect", self.config.width, self.config.height)
            .fixed_size()
    }

    fn setup(&mut self, ctx: &egui::Context) {
        self.textures = Textures {
            background: self
                .background
                .clone()
                .map(|image| ctx.load_texture("slingshot-background", image, TextureOptions::LINEAR)),
            planet: self
                .planet
                .clone()
                .map(|image| ctx.load_texture("slingshot-planet", image, TextureOptions::LINEAR)),
        };
    }

    fn frame(&mut self, ctx: &egui::Context, _clock: &FrameClock) -> StageControl {
        for action in InputMapper::actions(ctx, KeyBindings::default()) {
            match action {
                InputAction::Exit => return StageControl::Exit,
                InputAction::Reset => self.scene.reset(),
            }
        }

        egui::CentralPanel::default()
            .frame(Frame::default().fill(SPACE))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
                let offset = response.rect.min.to_vec2();
                let to_screen = |p: Vec2| Pos2::new(p.x, p.y) + offset;
                let pointer = ui
                    .input(|i| i.pointer.latest_pos())
                    .map(|p| Vec2::new(p.x - offset.x, p.y - offset.y));

                let pressed = ui.input(|i| i.pointer.primary_pressed());
                if let (true, true, Some(pos)) = (pressed, response.hovered(), pointer) {
                    self.scene.click(pos);
                }
                self.scene.step();

                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                if let Some(background) = &self.textures.background {
                    painter.image(background.id(), response.rect, uv, Color32::WHITE);
                }

                if let (Some(placed), Some(pos)) = (self.scene.pending(), pointer) {
                    painter.line_segment([to_screen(placed), to_screen(pos)], Stroke::new(2.0, LAUNCH_LINE));
                }
                if let Some(placed) = self.scene.pending() {
                    painter.circle_filled(to_screen(placed), self.config.ship_radius, SHIP);
                }
                for (_, ship) in self.scene.world().ships() {
                    painter.circle_filled(to_screen(ship.position), self.config.ship_radius, SHIP);
                }

                let planet = self.scene.world().planet();
                let center = to_screen(planet.position);
                match &self.textures.planet {
                    Some(texture) => {
                        let rect = Rect::from_center_size(center, egui::vec2(planet.radius * 2.0, planet.radius * 2.0));
                        painter.image(texture.id(), rect, uv, Color32::WHITE);
                    }
                    None => {
                        painter.circle_filled(center, planet.radius, PLANET);
                    }
                }
            });

        StageControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_places_then_launches() {
        let mut scene = SlingshotScene::new(SlingshotConfig::default());
        assert!(scene.click(Vec2::new(100.0, 100.0)).is_none());
        assert_eq!(scene.pending(), Some(Vec2::new(100.0, 100.0)));
        assert_eq!(scene.world().ship_count(), 0);

        let key = scene.click(Vec2::new(200.0, 150.0)).unwrap();
        assert!(scene.pending().is_none());
        let ship = scene.world().get_ship(key).unwrap();
        assert_eq!(ship.velocity, Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_third_click_places_again() {
        let mut scene = SlingshotScene::new(SlingshotConfig::default());
        scene.click(Vec2::new(100.0, 100.0));
        scene.click(Vec2::new(200.0, 150.0));
        assert!(scene.click(Vec2::new(50.0, 50.0)).is_none());
        assert_eq!(scene.world().ship_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut scene = SlingshotScene::new(SlingshotConfig::default());
        scene.click(Vec2::new(100.0, 100.0));
        scene.click(Vec2::new(200.0, 150.0));
        scene.click(Vec2::new(300.0, 100.0));
        scene.reset();
        assert_eq!(scene.world().ship_count(), 0);
        assert!(scene.pending().is_none());
    }

    #[test]
    fn test_missing_image_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("background.jpg"), [800, 600]).is_none());
    }

    #[test]
    fn test_image_resized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.png");
        image::RgbaImage::from_pixel(10, 20, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
        let image = load_image(&path, [100, 100]).unwrap();
        assert_eq!(image.size, [100, 100]);
    }
}
