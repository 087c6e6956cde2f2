// src/data.rs
//
// The one document this crate produces: written by the scraper, served by
// `/data`, rendered by the web page. Field names are the page's contract.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cast::Roster;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    #[default]
    NoData,
    Ok,
    Manual,
    FailedKeptExisting,
}

impl ScrapeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ScrapeStatus::NoData => "no_data",
            ScrapeStatus::Ok => "ok",
            ScrapeStatus::Manual => "manual",
            ScrapeStatus::FailedKeptExisting => "failed_kept_existing",
        }
    }
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MilestoneKind {
    Merge,
    Jury,
    Final3,
}

impl MilestoneKind {
    pub const ALL: [MilestoneKind; 3] = [MilestoneKind::Merge, MilestoneKind::Jury, MilestoneKind::Final3];

    pub fn label(self) -> &'static str {
        match self {
            MilestoneKind::Merge => "merge",
            MilestoneKind::Jury => "jury",
            MilestoneKind::Final3 => "final3",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jury: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final3: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl Milestones {
    pub fn get(&self, kind: MilestoneKind) -> Option<&[String]> {
        match kind {
            MilestoneKind::Merge => self.merge.as_deref(),
            MilestoneKind::Jury => self.jury.as_deref(),
            MilestoneKind::Final3 => self.final3.as_deref(),
        }
    }

    /// Empty lists are stored as absent.
    pub fn set(&mut self, kind: MilestoneKind, keys: Vec<String>) {
        let v = Some(keys).filter(|k| !k.is_empty());
        match kind {
            MilestoneKind::Merge => self.merge = v,
            MilestoneKind::Jury => self.jury = v,
            MilestoneKind::Final3 => self.final3 = v,
        }
    }

    /// Milestone labels reached by `key`, e.g. `["merge", "jury"]`.
    pub fn reached_by(&self, key: &str) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = MilestoneKind::ALL
            .into_iter()
            .filter(|k| self.get(*k).is_some_and(|v| v.iter().any(|n| n == key)))
            .map(MilestoneKind::label)
            .collect();
        if self.winner.as_deref() == Some(key) {
            out.push("winner");
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolData {
    #[serde(default)]
    pub episode: u32,
    #[serde(default)]
    pub eliminated: Vec<String>,
    #[serde(default)]
    pub milestones: Milestones,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scrape_status: ScrapeStatus,
}

impl PoolData {
    pub fn is_eliminated(&self, key: &str) -> bool {
        self.eliminated.iter().any(|k| k == key)
    }

    /// Cast keys still in the game, in roster order.
    pub fn remaining<'r>(&self, roster: &'r Roster) -> Vec<&'r str> {
        roster.keys().filter(|k| !self.is_eliminated(k)).collect()
    }

    /// Stamp as produced now with `status`.
    pub fn stamped(mut self, status: ScrapeStatus) -> Self {
        self.last_updated = Some(Utc::now());
        self.scrape_status = status;
        self
    }

    pub fn summary(&self) -> String {
        format!(
            "episode {}, {} eliminated, status: {}",
            self.episode,
            self.eliminated.len(),
            self.scrape_status
        )
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_document_matches_page_contract() {
        let v = serde_json::to_value(PoolData::default()).unwrap();
        assert_eq!(
            v,
            json!({
                "episode": 0,
                "eliminated": [],
                "milestones": {},
                "last_updated": null,
                "scrape_status": "no_data"
            })
        );
    }

    #[test]
    fn reads_files_with_microsecond_offsets() {
        let text = r#"{
          "episode": 4,
          "eliminated": ["Jenna", "Coach"],
          "milestones": {"jury": ["Coach"], "winner": "Aubrey"},
          "last_updated": "2026-03-12T04:00:01.123456+00:00",
          "scrape_status": "failed_kept_existing"
        }"#;
        let d: PoolData = serde_json::from_str(text).unwrap();
        assert_eq!(d.episode, 4);
        assert_eq!(d.scrape_status, ScrapeStatus::FailedKeptExisting);
        assert_eq!(d.milestones.winner.as_deref(), Some("Aubrey"));
        assert!(d.last_updated.is_some());
        assert_eq!(d.milestones.reached_by("Coach"), vec!["jury"]);
        assert_eq!(d.milestones.reached_by("Aubrey"), vec!["winner"]);
    }

    #[test]
    fn empty_milestone_lists_are_dropped() {
        let mut m = Milestones::default();
        m.set(MilestoneKind::Merge, strings!["Q"]);
        m.set(MilestoneKind::Merge, Vec::new());
        assert_eq!(m, Milestones::default());
    }

    #[test]
    fn remaining_follows_roster_order() {
        let roster = Roster::survivor_50();
        let d = PoolData { eliminated: strings!["Aubrey", "Q"], ..Default::default() };
        let rem = d.remaining(&roster);
        assert_eq!(rem.len(), 22);
        assert_eq!(rem[0], "Genevieve");
        assert!(!rem.contains(&"Q"));
    }
}
