//! Dark theme for egui components.

use eframe::{egui, epaint};

/// Apply the application theme to the current egui Context.
pub fn set_app_style(ctx: &egui::Context) {
    use egui::Visuals;

    let mut visuals = Visuals::dark();
    visuals.panel_fill = epaint::Color32::from_rgb(26, 27, 30);
    visuals.widgets.active.bg_fill = epaint::Color32::from_rgb(0, 110, 230);
    visuals.widgets.active.fg_stroke = epaint::Stroke::new(1.0, epaint::Color32::WHITE);
    visuals.widgets.hovered.bg_fill = epaint::Color32::from_rgb(45, 47, 52);
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    ctx.set_style(style);
}
