//! Dark palette shared by the launcher and the simulations

use egui::{Color32, Stroke, Visuals};

pub const WINDOW: Color32 = Color32::from_rgb(53, 53, 53);
pub const BASE: Color32 = Color32::from_rgb(25, 25, 25);
pub const TEXT: Color32 = Color32::WHITE;
pub const HIGHLIGHT: Color32 = Color32::from_rgb(42, 130, 218);
pub const ALERT: Color32 = Color32::RED;

/// Dark visuals with the launcher's palette
pub fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.window_fill = WINDOW;
    visuals.panel_fill = WINDOW;
    visuals.extreme_bg_color = BASE;
    visuals.faint_bg_color = BASE;
    visuals.hyperlink_color = HIGHLIGHT;
    visuals.selection.bg_fill = HIGHLIGHT;
    visuals.selection.stroke = Stroke::new(1.0, Color32::BLACK);
    visuals.override_text_color = Some(TEXT);
    visuals.error_fg_color = ALERT;
    visuals
}

/// Install the palette on a context
pub fn apply(ctx: &egui::Context) {
    ctx.set_visuals(dark_visuals());
}

/// Clear colour for the surface behind egui
pub fn clear_color() -> wgpu::Color {
    let [r, g, b, _] = WINDOW.to_array();
    wgpu::Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_visuals_palette() {
        let visuals = dark_visuals();
        assert!(visuals.dark_mode);
        assert_eq!(visuals.panel_fill, WINDOW);
        assert_eq!(visuals.selection.bg_fill, HIGHLIGHT);
        assert_eq!(visuals.override_text_color, Some(Color32::WHITE));
    }

    #[test]
    fn test_clear_color_matches_window() {
        let c = clear_color();
        assert!((c.r - 53.0 / 255.0).abs() < 1e-9);
        assert_eq!(c.a, 1.0);
    }
}
