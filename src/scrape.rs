// src/scrape.rs
//
// One scraper run, as invoked nightly by the platform cron:
//   existing file → manual override or wiki scrape → fallback → save.

use std::{
    fmt, fs,
    path::PathBuf,
    time::Duration,
};

use crate::{
    config::options::AppOptions,
    data::{PoolData, ScrapeStatus},
    error::{Error, Result},
    manual,
    progress::Progress,
    specs::wiki,
    store,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Wiki(String),
    SavedPage(PathBuf),
    Manual(PathBuf),
    /// Fetch failed; the previous data (or the empty document) was kept.
    KeptExisting,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Wiki(url) => write!(f, "wiki {url}"),
            Source::SavedPage(p) => write!(f, "saved page {}", p.display()),
            Source::Manual(p) => write!(f, "manual override {}", p.display()),
            Source::KeptExisting => f.write_str("existing data"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub data: PoolData,
    pub source: Source,
    /// `None` on dry runs.
    pub written: Option<PathBuf>,
}

pub fn run(opts: &AppOptions, mut progress: Option<&mut dyn Progress>) -> Result<RunOutcome> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(3);
    }

    let res = run_steps(opts, &mut progress);

    if let Some(p) = progress.as_deref_mut() {
        match &res {
            Ok(out) => p.log(&format!("Done: {}", out.data.summary())),
            Err(e) => p.log(&format!("Failed: {e}")),
        }
        p.finish();
    }
    res
}

fn run_steps(opts: &AppOptions, progress: &mut Option<&mut dyn Progress>) -> Result<RunOutcome> {
    let scrape = &opts.scrape;

    // Load existing data as fallback
    let existing = match store::load(&scrape.data_file) {
        Ok(Some(d)) => {
            logf!("Loaded existing data (episode {})", d.episode);
            Some(d)
        }
        Ok(None) => {
            logf!("No existing data file, starting fresh");
            None
        }
        Err(e) => {
            logw!("Existing data unusable, starting fresh: {e}");
            None
        }
    };
    step(progress, "load");

    let (data, source) = if scrape.use_manual_override {
        logf!("Using manual override data");
        let d = manual::load(&scrape.manual_file)?.stamped(ScrapeStatus::Manual);
        (d, Source::Manual(scrape.manual_file.clone()))
    } else {
        match scrape_once(opts, progress) {
            Ok(found) => found,
            Err(e) => {
                loge!("Scrape failed, keeping existing data: {e}");
                let mut d = existing.unwrap_or_default();
                d.scrape_status = ScrapeStatus::FailedKeptExisting;
                (d, Source::KeptExisting)
            }
        }
    };
    step(progress, "extract");

    let written = if scrape.dry_run {
        logf!("Dry run, not writing {} ({}) from {}", scrape.data_file.display(), data.summary(), source);
        None
    } else {
        store::save(&scrape.data_file, &data)?;
        logf!("Saved {} ({}) from {}", scrape.data_file.display(), data.summary(), source);
        Some(scrape.data_file.clone())
    };
    step(progress, "save");

    Ok(RunOutcome { data, source, written })
}

/// Fetch (or read) the page and extract. Any error here means "keep existing".
fn scrape_once(
    opts: &AppOptions,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<(PoolData, Source)> {
    let scrape = &opts.scrape;

    let (doc, source) = match &scrape.html_file {
        Some(path) => {
            let doc = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            (doc, Source::SavedPage(path.clone()))
        }
        None => {
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Scraping {} …", scrape.wiki_url));
            }
            logf!("Scraping {} ...", scrape.wiki_url);
            let doc = wiki::fetch(&scrape.wiki_url, Duration::from_secs(scrape.timeout_secs))?;
            (doc, Source::Wiki(scrape.wiki_url.clone()))
        }
    };

    let found = wiki::parse_doc(&doc, &opts.roster(), scrape.episode_cap);

    if let Some(season) = found.season.filter(|s| *s != scrape.season) {
        logw!("Page title says season {season}, expected {}", scrape.season);
    }
    logf!("Detected up to episode {}", found.episode);
    logf!("Found {} eliminated players: {:?}", found.eliminated.len(), found.eliminated);

    Ok((found.into_data(), source))
}

fn step(progress: &mut Option<&mut dyn Progress>, name: &str) {
    if let Some(p) = progress.as_deref_mut() {
        p.step_done(name);
    }
}
