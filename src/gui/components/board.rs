// src/gui/components/board.rs
//
// Read-only board: what the web page would show.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let d = &app.data;
    let updated = d
        .last_updated
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| s!("never"));
    ui.label(format!("Episode {} · updated {} · {}", d.episode, updated, d.scrape_status));

    ui.checkbox(&mut app.state.gui.hide_eliminated, "Hide eliminated");
    ui.separator();

    let d = &app.data;
    let rows: Vec<&str> = app
        .roster
        .keys()
        .filter(|k| !(app.state.gui.hide_eliminated && d.is_eliminated(k)))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::initial(140.0).resizable(true))
        .column(Column::initial(110.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Cast", "Status", "Milestones"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let key = rows[row.index()];
                let out_at = d.eliminated.iter().position(|k| k == key);
                row.col(|ui| {
                    let text = RichText::new(key);
                    ui.label(if out_at.is_some() { text.strikethrough().weak() } else { text });
                });
                row.col(|ui| {
                    match out_at {
                        Some(i) => ui.label(format!("out #{}", i + 1)),
                        None => ui.label("in"),
                    };
                });
                row.col(|ui| {
                    ui.label(d.milestones.reached_by(key).join(", "));
                });
            });
        });
}
