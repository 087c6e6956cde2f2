// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Board,
    Manual,
}

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Active central tab
    pub tab: Tab,

    /// Board -> hide eliminated cast
    pub hide_eliminated: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 900,
            window_h: 640,
            tab: Tab::Board,
            hide_eliminated: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
