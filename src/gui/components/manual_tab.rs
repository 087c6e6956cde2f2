// src/gui/components/manual_tab.rs
//
// Editor for the manual override file. Edits go through `manual::apply` so the
// GUI and `survivor_pool manual …` produce the same documents.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::data::MilestoneKind;
use crate::gui::app::App;
use crate::manual::{self, Edit};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let keys: Vec<String> = app.roster.keys().map(String::from).collect();
    let mut edits: Vec<Edit> = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Episode:");
        let mut ep = app.draft.episode;
        let cap = app.state.options.scrape.episode_cap;
        if ui.add(egui::DragValue::new(&mut ep).range(0..=cap)).changed() {
            edits.push(Edit::Episode(ep));
        }

        ui.separator();

        let mut winner = app.draft.milestones.winner.clone();
        egui::ComboBox::from_label("Winner")
            .selected_text(winner.as_deref().unwrap_or("(none)"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut winner, None, "(none)");
                for k in &keys {
                    ui.selectable_value(&mut winner, Some(k.clone()), k.as_str());
                }
            });
        if winner != app.draft.milestones.winner {
            edits.push(Edit::Winner(winner));
        }
    });

    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::initial(140.0).resizable(true))
        .columns(Column::initial(60.0), 1 + MilestoneKind::ALL.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Cast");
            });
            header.col(|ui| {
                ui.strong("Out");
            });
            for kind in MilestoneKind::ALL {
                header.col(|ui| {
                    ui.strong(kind.label());
                });
            }
        })
        .body(|mut body| {
            for key in &keys {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(key.as_str());
                    });
                    row.col(|ui| {
                        let mut out = app.draft.is_eliminated(key);
                        if ui.checkbox(&mut out, "").changed() {
                            let names = vec![key.clone()];
                            edits.push(if out { Edit::Eliminate(names) } else { Edit::Restore(names) });
                        }
                    });
                    for kind in MilestoneKind::ALL {
                        row.col(|ui| {
                            let current = app.draft.milestones.get(kind).unwrap_or_default();
                            let mut on = current.contains(key);
                            if ui.checkbox(&mut on, "").changed() {
                                let mut names: Vec<String> =
                                    current.iter().filter(|k| *k != key).cloned().collect();
                                if on {
                                    names.push(key.clone());
                                }
                                edits.push(Edit::Milestone(kind, names));
                            }
                        });
                    }
                });
            }
        });

    for edit in edits {
        if let Err(e) = manual::apply(&mut app.draft, &app.roster, edit) {
            app.status(format!("Error: {e}"));
        } else {
            app.draft_dirty = true;
        }
    }

    ui.separator();
    ui.horizontal(|ui| {
        let label = if app.draft_dirty { "Save manual file *" } else { "Save manual file" };
        if ui.button(label).clicked() {
            app.save_draft();
        }
        if ui.button("Reset from current data").clicked() {
            app.reseed_draft();
        }
    });
    ui.label(format!(
        "{} · used by scrapes while \"Use manual override\" is on",
        app.state.options.scrape.manual_file.display()
    ));
}
