// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::Path;

use color_eyre::eyre::eyre;
use eframe::egui::{IconData, ViewportBuilder};
use survivor_pool::{config::consts::GUI_LOG_FILE, config::state::GuiState, gui, log};

fn app_icon() -> Option<IconData> {
    let img = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/icon.png"
    )))
    .ok()?
    .to_rgba8();
    let (width, height) = img.dimensions();
    Some(IconData { rgba: img.into_raw(), width, height })
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = log::init_file(Path::new(GUI_LOG_FILE)) {
        eprintln!("Logging disabled ({GUI_LOG_FILE}): {e}");
    }

    let size = GuiState::default();
    let mut viewport = ViewportBuilder::default()
        .with_inner_size([size.window_w as f32, size.window_h as f32]);
    if let Some(icon) = app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions { viewport, ..Default::default() };

    gui::run(options).map_err(|e| eyre!("GUI failed: {e}"))
}
