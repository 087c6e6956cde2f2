// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Writes scrape progress into the status line shared with the UI thread.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = msg.into();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.set_status("Scraping…");
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn step_done(&mut self, step: &str) {
        self.done += 1;
        self.set_status(format!("Scraping… {step} ({}/{})", self.done, self.total));
    }
}
