// src/log.rs
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{fmt::time::uptime, EnvFilter};

#[doc(hidden)]
pub use tracing as __tracing;

static INIT: OnceLock<()> = OnceLock::new();

fn filter_for(verbosity: u8) -> EnvFilter {
    let fallback = match verbosity {
        0 => "survivor_pool=info",
        1 => "survivor_pool=debug",
        _ => "survivor_pool=trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Log to stderr (CLI, server, cron). `RUST_LOG` wins over `verbosity`.
pub fn init_stderr(verbosity: u8) {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter_for(verbosity))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Log to an append-only file with elapsed-time stamps. Used by the GUI,
/// which has no console on Windows.
pub fn init_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    INIT.get_or_init(move || {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter_for(0))
            .with_writer(Mutex::new(file))
            .with_timer(uptime())
            .with_ansi(false)
            .with_target(false)
            .try_init();
    });
    Ok(())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}
