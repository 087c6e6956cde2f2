// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cast;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod manual;
pub mod progress;
pub mod scrape;
pub mod server;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "gui")]
pub mod gui;

pub use error::{Error, Result};
