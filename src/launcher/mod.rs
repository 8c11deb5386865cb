//! Launcher window
//!
//! One tab per category, each holding a grid of unit buttons. Picking a unit
//! closes the window; the caller takes the selection, runs the unit and then
//! runs the launcher again.

mod state;

pub use state::{Dialog, LauncherState};

use std::collections::BTreeMap;

use egui::load::SizedTexture;
use egui::{Align2, ColorImage, RichText, TextureHandle, TextureOptions};
use physlab_core::{Catalog, SimulationDescriptor, UnitKey};
use physlab_render::{FrameClock, Stage, StageControl, WindowSpec};

use crate::config::{CatalogConfig, WindowConfig};
use crate::input::{InputAction, InputMapper, KeyBindings};

pub const EMPTY_CATEGORY: &str = "No simulations in this category yet.";

pub struct Launcher {
    catalog: Catalog,
    window: WindowConfig,
    columns: usize,
    thumbnail_size: f32,
    thumbnails: BTreeMap<UnitKey, TextureHandle>,
    state: LauncherState,
}

impl Launcher {
    pub fn new(catalog: Catalog, window: &WindowConfig, catalog_config: &CatalogConfig) -> Self {
        Self {
            catalog,
            window: window.clone(),
            columns: catalog_config.columns.max(1),
            thumbnail_size: catalog_config.thumbnail_size as f32,
            thumbnails: BTreeMap::new(),
            state: LauncherState::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Unit picked in the last run, if any
    pub fn take_selection(&mut self) -> Option<UnitKey> {
        self.state.take_selection()
    }

    /// Show a failed dispatch the next time the launcher runs
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.state.report_error(message);
    }

    fn tabs_ui(&mut self, ui: &mut egui::Ui) {
        let mut active = self.state.active_tab();
        ui.horizontal(|ui| {
            for (index, category) in self.catalog.categories().iter().enumerate() {
                ui.selectable_value(&mut active, index, category.name());
            }
        });
        self.state.select_tab(active);
    }

    /// Draws the active tab's grid; returns the unit clicked this frame
    fn units_ui(&self, ui: &mut egui::Ui) -> Option<&SimulationDescriptor> {
        let category = self.catalog.categories().get(self.state.active_tab())?;
        if category.is_empty() {
            ui.add_space(20.0);
            ui.label(EMPTY_CATEGORY);
            return None;
        }

        let mut clicked = None;
        let edge = egui::vec2(self.thumbnail_size, self.thumbnail_size);
        egui::Grid::new(("units", category.name()))
            .num_columns(self.columns)
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (index, unit) in category.units().iter().enumerate() {
                    let button = match self.thumbnails.get(unit.key()) {
                        Some(texture) => egui::Button::image_and_text(
                            egui::Image::new(SizedTexture::new(texture.id(), edge)),
                            unit.unit_name(),
                        ),
                        None => egui::Button::new(unit.unit_name()).min_size(edge),
                    };
                    if ui.add(button).clicked() {
                        clicked = Some(unit);
                    }
                    if (index + 1) % self.columns == 0 {
                        ui.end_row();
                    }
                }
            });
        clicked
    }

    fn dialog_ui(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.state.dialog().cloned() else {
            return;
        };
        let window = |title: &str| {
            egui::Window::new(title.to_string())
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        };

        match dialog {
            Dialog::Describe(key) => {
                let description = self
                    .catalog
                    .find(&key.category, &key.unit)
                    .map(|d| d.description().to_string())
                    .unwrap_or_default();
                let (mut run, mut cancel) = (false, false);
                window(&key.unit).show(ctx, |ui| {
                    ui.set_max_width(360.0);
                    ui.label(description);
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        run = ui.button("Run").clicked();
                        cancel = ui.button("Cancel").clicked();
                    });
                });
                if run {
                    self.state.confirm();
                } else if cancel {
                    self.state.close_dialog();
                }
            }
            Dialog::Error(message) => {
                let mut dismiss = false;
                window("Error").show(ctx, |ui| {
                    ui.set_max_width(360.0);
                    ui.label(RichText::new(message).color(ui.visuals().error_fg_color));
                    ui.add_space(8.0);
                    dismiss = ui.button("Dismiss").clicked();
                });
                if dismiss {
                    self.state.close_dialog();
                }
            }
        }
    }
}

impl Stage for Launcher {
    fn window(&self) -> WindowSpec {
        WindowSpec::new(self.window.title.clone(), self.window.width, self.window.height)
    }

    fn setup(&mut self, ctx: &egui::Context) {
        // Textures belong to the context, which is new for every window
        self.thumbnails = self
            .catalog
            .descriptors()
            .filter_map(|descriptor| {
                let thumbnail = descriptor.thumbnail()?;
                let image = ColorImage::from_rgba_unmultiplied(thumbnail.size(), thumbnail.rgba());
                let texture = ctx.load_texture(descriptor.key().to_string(), image, TextureOptions::LINEAR);
                Some((descriptor.key().clone(), texture))
            })
            .collect();
    }

    fn frame(&mut self, ctx: &egui::Context, _clock: &FrameClock) -> StageControl {
        // Escape closes an open dialog; closing the window quits
        for action in InputMapper::actions(ctx, KeyBindings::default()) {
            if action == InputAction::Exit && self.state.dialog().is_some() {
                self.state.close_dialog();
            }
        }

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.tabs_ui(ui);
            ui.separator();
            let enabled = self.state.dialog().is_none();
            ui.add_enabled_ui(enabled, |ui| {
                clicked = self.units_ui(ui).cloned();
            });
        });
        if let Some(descriptor) = clicked {
            log::debug!("Clicked {}", descriptor.key());
            self.state.click(&descriptor);
        }

        self.dialog_ui(ctx);

        if self.state.has_selection() {
            StageControl::Exit
        } else {
            StageControl::Continue
        }
    }
}
