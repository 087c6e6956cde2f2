// src/progress.rs
/// Lightweight progress reporting used by long-running operations (scrape runs).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of steps (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one step completes (fetch, extract, save).
    fn step_done(&mut self, _step: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Forwards progress to the log. Used by the CLI and the server's refresher.
#[derive(Default)]
pub struct LogProgress {
    done: usize,
    total: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn step_done(&mut self, step: &str) {
        self.done += 1;
        logd!("Step {step} done ({}/{})", self.done, self.total);
    }
}
