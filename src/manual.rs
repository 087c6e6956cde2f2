// src/manual.rs
//
// Manual override: a hand-kept `PoolData` that replaces the scraped one when
// the wiki gets confusing. Lives in its own JSON file so nobody has to edit
// code and redeploy.

use std::path::Path;

use crate::cast::Roster;
use crate::config::options::ScrapeOptions;
use crate::data::{MilestoneKind, PoolData, ScrapeStatus};
use crate::error::{Error, Result};
use crate::store;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    Eliminate(Vec<String>),
    Restore(Vec<String>),
    Episode(u32),
    Milestone(MilestoneKind, Vec<String>),
    Winner(Option<String>),
}

/// The override document. Missing file is an error: an enabled override with
/// nothing in it must not silently publish an empty board.
pub fn load(path: &Path) -> Result<PoolData> {
    store::load(path)?.ok_or_else(|| Error::ManualMissing(path.to_path_buf()))
}

pub fn save(path: &Path, data: &PoolData) -> Result<()> {
    store::save(path, data)
}

/// Manual file if present, else a copy of the current data file.
pub fn load_or_seed(opts: &ScrapeOptions) -> Result<PoolData> {
    match store::load(&opts.manual_file)? {
        Some(d) => Ok(d),
        None => Ok(seed(opts)),
    }
}

fn seed(opts: &ScrapeOptions) -> PoolData {
    let mut d = store::load_or_default(&opts.data_file);
    d.scrape_status = ScrapeStatus::Manual;
    d
}

/// (Re)create the manual file from the current data file.
pub fn init(opts: &ScrapeOptions) -> Result<PoolData> {
    let d = seed(opts);
    save(&opts.manual_file, &d)?;
    logf!("Manual: seeded {} from {} ({})", opts.manual_file.display(), opts.data_file.display(), d.summary());
    Ok(d)
}

/// Load (or seed), apply one edit, save.
pub fn edit_file(opts: &ScrapeOptions, roster: &Roster, edit: Edit) -> Result<PoolData> {
    let mut d = load_or_seed(opts)?;
    apply(&mut d, roster, edit)?;
    d.scrape_status = ScrapeStatus::Manual;
    save(&opts.manual_file, &d)?;
    Ok(d)
}

pub fn apply(d: &mut PoolData, roster: &Roster, edit: Edit) -> Result<()> {
    logd!("Manual: apply {edit:?}");
    match edit {
        Edit::Eliminate(names) => {
            for key in resolve(roster, &names)? {
                if !d.is_eliminated(&key) {
                    d.eliminated.push(key);
                }
            }
        }
        Edit::Restore(names) => {
            let keys = resolve(roster, &names)?;
            d.eliminated.retain(|k| !keys.contains(k));
        }
        Edit::Episode(n) => d.episode = n,
        Edit::Milestone(kind, names) => {
            let keys = resolve(roster, &names)?;
            d.milestones.set(kind, roster.in_roster_order(keys.iter().map(String::as_str)));
        }
        Edit::Winner(name) => {
            d.milestones.winner = match name {
                Some(n) => Some(resolve_one(roster, &n)?),
                None => None,
            };
        }
    }
    Ok(())
}

pub fn resolve_one(roster: &Roster, name: &str) -> Result<String> {
    roster
        .normalize(name)
        .map(|k| s!(k))
        .ok_or_else(|| Error::UnknownCastMember(s!(name.trim())))
}

/// Cast keys for `names`, all-or-nothing.
pub fn resolve(roster: &Roster, names: &[String]) -> Result<Vec<String>> {
    names.iter().map(|n| resolve_one(roster, n)).collect()
}
