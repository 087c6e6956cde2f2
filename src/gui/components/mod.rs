// src/gui/components/mod.rs
pub mod board;
pub mod cast_panel;
pub mod manual_tab;
pub mod tabs;
