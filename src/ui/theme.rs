use eframe::egui::{self, Stroke, Visuals};

use crate::config::{ACCENT, BACKGROUND, PANEL};

/// Navy background, orange text, dark-blue selectors.
pub fn apply(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(ACCENT);
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.faint_bg_color = PANEL;
    visuals.extreme_bg_color = PANEL;

    for w in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        w.bg_fill = PANEL;
        w.weak_bg_fill = PANEL;
        w.fg_stroke = Stroke::new(1.0, ACCENT);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);

    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    ctx.set_visuals(visuals);
}
