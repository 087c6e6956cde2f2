// src/gui/components/tabs.rs
//
// Top bar: tab switch, scrape trigger, status line.

use eframe::egui;

use crate::config::state::Tab;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let prev = app.state.gui.tab;
        ui.selectable_value(&mut app.state.gui.tab, Tab::Board, "Board");
        ui.selectable_value(&mut app.state.gui.tab, Tab::Manual, "Manual override");
        if app.state.gui.tab != prev {
            logf!("UI: Tab switch {:?} → {:?}", prev, app.state.gui.tab);
        }

        ui.separator();

        let clicked = ui
            .add_enabled(!app.running, egui::Button::new("Scrape now"))
            .clicked();
        ui.checkbox(&mut app.state.options.scrape.use_manual_override, "Use manual override");
        if clicked {
            let ctx = ui.ctx().clone();
            app.scrape(&ctx);
        }
    });

    ui.label(format!("Status: {}", app.status_text()));
}
