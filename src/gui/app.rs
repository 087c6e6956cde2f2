// src/gui/app.rs
use std::{
    sync::{mpsc, Arc, Mutex},
    thread,
};

use eframe::egui;

use crate::{
    cast::Roster,
    config::{
        options::AppOptions,
        state::{AppState, Tab},
    },
    data::PoolData,
    error::Result,
    manual,
    scrape::{self, RunOutcome},
    store,
};

use super::{components, progress::GuiProgress};

pub fn run(native: eframe::NativeOptions) -> std::result::Result<(), eframe::Error> {
    let options = AppOptions::load(None).unwrap_or_else(|e| {
        loge!("Config: {e}; using defaults");
        AppOptions::default()
    });
    eframe::run_native(
        "Survivor Pool",
        native,
        Box::new(|_cc| Ok(Box::new(App::new(AppState { options, ..AppState::default() })))),
    )
}

pub struct App {
    pub state: AppState,
    pub roster: Roster,

    /// What `/data` serves right now.
    pub data: PoolData,

    /// Manual-tab working copy; saved to the manual file on demand.
    pub draft: PoolData,
    pub draft_dirty: bool,

    // status/progress (worker writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    rx: Option<mpsc::Receiver<Result<RunOutcome>>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let roster = state.options.roster();
        let data = store::load_or_default(&state.options.scrape.data_file);
        let draft = match manual::load_or_seed(&state.options.scrape) {
            Ok(d) => d,
            Err(e) => {
                loge!("Manual: {e}");
                data.clone()
            }
        };

        logf!("Init: cast={}, {}", roster.len(), data.summary());

        Self {
            state,
            roster,
            status: Arc::new(Mutex::new(if data.last_updated.is_some() {
                s!("Loaded local data")
            } else {
                s!("No data yet")
            })),
            data,
            draft,
            draft_dirty: false,
            running: false,
            rx: None,
        }
    }

    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = msg.into();
    }

    pub fn status_text(&self) -> String {
        self.status.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Kick off one scraper run on a worker thread.
    pub fn scrape(&mut self, ctx: &egui::Context) {
        if self.running {
            return;
        }
        self.running = true;
        logf!("Scrape: Begin (manual override: {})", self.state.options.scrape.use_manual_override);

        let opts = self.state.options.clone();
        let status = self.status.clone();
        let ctx = ctx.clone();
        let (tx, rx) = mpsc::channel();
        self.rx = Some(rx);

        thread::spawn(move || {
            let mut prog = GuiProgress::new(status);
            let res = scrape::run(&opts, Some(&mut prog));
            let _ = tx.send(res);
            ctx.request_repaint();
        });
    }

    fn poll_worker(&mut self) {
        let Some(rx) = &self.rx else { return };
        let res = match rx.try_recv() {
            Ok(res) => res,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.rx = None;
                self.running = false;
                self.status("Error: scrape worker stopped");
                return;
            }
        };
        self.rx = None;
        self.running = false;

        match res {
            Ok(out) => {
                logf!("Scrape: OK from {} ({})", out.source, out.data.summary());
                self.status(format!("Ready: {} (from {})", out.data.summary(), out.source));
                self.data = out.data;
            }
            Err(e) => {
                loge!("Scrape: Error: {e}");
                self.status(format!("Error: {e}"));
            }
        }
    }

    pub fn save_draft(&mut self) {
        let path = self.state.options.scrape.manual_file.clone();
        match manual::save(&path, &self.draft) {
            Ok(()) => {
                self.draft_dirty = false;
                logf!("Manual: Saved {} ({})", path.display(), self.draft.summary());
                self.status(format!("Saved {}", path.display()));
            }
            Err(e) => {
                loge!("Manual: Save failed: {e}");
                self.status(format!("Save error: {e}"));
            }
        }
    }

    /// Replace the draft with the data currently on the board.
    pub fn reseed_draft(&mut self) {
        match manual::init(&self.state.options.scrape) {
            Ok(d) => {
                self.draft = d;
                self.draft_dirty = false;
                self.status("Manual file reset from current data");
            }
            Err(e) => self.status(format!("Error: {e}")),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        egui::SidePanel::left("cast")
            .resizable(false)
            .show(ctx, |ui| {
                components::cast_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::tabs::draw(ui, self);
            ui.separator();
            match self.state.gui.tab {
                Tab::Board => components::board::draw(ui, self),
                Tab::Manual => components::manual_tab::draw(ui, self),
            }
        });
    }
}
