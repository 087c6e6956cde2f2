// src/config/options.rs
//
// Runtime options. Defaults come from `consts`, an optional TOML file can
// override any of them, and a few env vars (for the PaaS dashboard) win last.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::cast::{CastMember, Roster};
use crate::error::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub server: ServeOptions,
    /// Replaces the built-in roster when non-empty.
    pub cast: Vec<CastMember>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeOptions {
    pub season: u32,
    pub wiki_url: String,
    pub data_file: PathBuf,
    pub manual_file: PathBuf,
    pub use_manual_override: bool,
    pub episode_cap: u32,
    pub timeout_secs: u64,

    /// Parse a saved page instead of fetching (per run, never from file).
    #[serde(skip)]
    pub html_file: Option<PathBuf>,
    /// Compute but don't write the data file.
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            season: SEASON,
            wiki_url: s!(WIKI_URL),
            data_file: PathBuf::from(DATA_FILE),
            manual_file: PathBuf::from(MANUAL_FILE),
            use_manual_override: false,
            episode_cap: EPISODE_CAP,
            timeout_secs: TIMEOUT_SECS,
            html_file: None,
            dry_run: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub cache_max_age: u32,
    pub service_name: String,
    /// Scrape once before accepting requests.
    pub initial_scrape: bool,
    /// In-process re-scrape period; 0 leaves scheduling to the platform cron.
    pub refresh_hours: u64,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: s!(HOST),
            port: PORT,
            workers: WORKERS,
            cache_max_age: CACHE_MAX_AGE,
            service_name: s!(SERVICE_NAME),
            initial_scrape: true,
            refresh_hours: 0,
        }
    }
}

impl ServeOptions {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppOptions {
    /// Resolve the config file (explicit path, `SURVIVOR_POOL_CONFIG`, or
    /// `./survivor_pool.toml` if present), then apply env overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os(ENV_CONFIG)
                .map(PathBuf::from)
                .or_else(|| Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.is_file())),
        };

        let mut opts = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        opts.apply_env(|key| std::env::var(key).ok())?;
        Ok(opts)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let opts = Self::from_toml_str(&text, path)?;
        logd!("Config: loaded {}", path.display());
        Ok(opts)
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config { path: origin.to_path_buf(), source })
    }

    /// Env overrides. `lookup` is injected so tests don't touch the process env.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_PORT) {
            self.server.port = v
                .trim()
                .parse()
                .map_err(|_| Error::Env { key: ENV_PORT, value: v.clone() })?;
        }
        if let Some(v) = lookup(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
            self.scrape.data_file = PathBuf::from(v.trim());
        }
        if let Some(v) = lookup(ENV_WIKI_URL).filter(|v| !v.trim().is_empty()) {
            self.scrape.wiki_url = s!(v.trim());
        }
        if let Some(v) = lookup(ENV_MANUAL) {
            self.scrape.use_manual_override = parse_flag(&v)
                .ok_or_else(|| Error::Env { key: ENV_MANUAL, value: v.clone() })?;
        }
        Ok(())
    }

    pub fn roster(&self) -> Roster {
        let custom = Roster::new(self.cast.clone());
        if custom.is_empty() { Roster::survivor_50() } else { custom }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
