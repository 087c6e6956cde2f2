// src/gui/components/cast_panel.rs
//
// Left cast list: remaining first line count, eliminated struck through.

use eframe::egui::{self, RichText};

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Cast");
    let left = app.data.remaining(&app.roster).len();
    ui.label(format!("{left} of {} left", app.roster.len()));
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("cast_panel_scroll")
        .show(ui, |ui| {
            for key in app.roster.keys() {
                let text = if app.data.is_eliminated(key) {
                    RichText::new(key).strikethrough().weak()
                } else if app.data.milestones.winner.as_deref() == Some(key) {
                    RichText::new(join!("🔥 ", key)).strong()
                } else {
                    RichText::new(key)
                };
                ui.label(text);
            }
        });
}
