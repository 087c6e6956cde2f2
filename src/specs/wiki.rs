// src/specs/wiki.rs
//! Scraping *spec* for the season page of the Survivor Fandom wiki.
//!
//! Extracts:
//! - **episode**: highest `Episode N` mentioned, capped to the season length.
//! - **eliminated**: cast named in any table row that also says voted out /
//!   eliminated / quit / medevac, in order of first appearance.
//! - **milestones**: cast named in the short text runs that follow "merge",
//!   "jury member", "final three"…, plus the Sole Survivor when announced.

use std::{sync::LazyLock, time::{Duration, Instant}};

use regex::Regex;

use crate::cast::Roster;
use crate::core::html::{inner_after_open_tag, strip_tags, tag_blocks};
use crate::core::net;
use crate::core::sanitize::{contains_word, normalize_entities};
use crate::data::{Milestones, MilestoneKind, PoolData, ScrapeStatus};
use crate::error::Result;

const ELIMINATION_WORDS: &[&str] = &[
    "voted out",
    "eliminated",
    "quit",
    "medevac",
    "medevaced",
    "evacuated",
];

static EPISODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Ee]pisode\s+(\d+)").expect("episode regex"));
static SEASON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)survivor\s*:?\s*(\d+)").expect("season regex"));
static WINNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:Sole Survivor|winner)["\s:>]+([A-Z][a-z]*(?:\s[A-Z][a-z]*)?)"#).expect("winner regex")
});

/// Keyword that opens a milestone text run, and how far the run may reach.
struct MilestoneRule {
    kind: MilestoneKind,
    start: &'static LazyLock<Regex>,
    reach: usize,
}

static MERGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmerged?\b").expect("merge regex"));
static JURY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bjury member|\bjoined the jury\b").expect("jury regex"));
static FINAL3_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfinal (?:three|3)\b|\bfinalists?\b").expect("final3 regex")
});

static MILESTONE_RULES: [MilestoneRule; 3] = [
    MilestoneRule { kind: MilestoneKind::Merge, start: &MERGE_RE, reach: 500 },
    MilestoneRule { kind: MilestoneKind::Jury, start: &JURY_RE, reach: 300 },
    MilestoneRule { kind: MilestoneKind::Final3, start: &FINAL3_RE, reach: 300 },
];

/// What one page yields (shapes neatly into `PoolData`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Season number from `<title>`, if the page states one.
    pub season: Option<u32>,
    pub episode: u32,
    pub eliminated: Vec<String>,
    pub milestones: Milestones,
}

impl Extraction {
    pub fn into_data(self) -> PoolData {
        PoolData {
            episode: self.episode,
            eliminated: self.eliminated,
            milestones: self.milestones,
            ..Default::default()
        }
        .stamped(ScrapeStatus::Ok)
    }
}

pub fn fetch(url: &str, timeout: Duration) -> Result<String> {
    net::http_get(url, timeout)
}

/// Split out for unit tests.
pub fn parse_doc(doc: &str, roster: &Roster, episode_cap: u32) -> Extraction {
    let t = Instant::now();

    let out = Extraction {
        season: detect_season(doc),
        episode: detect_episode(doc, episode_cap),
        eliminated: detect_eliminated(doc, roster),
        milestones: detect_milestones(doc, roster),
    };

    logd!("Wiki: parsed {} bytes in {:?}", doc.len(), t.elapsed());
    out
}

/* ---------------- helpers ---------------- */

fn detect_season(doc: &str) -> Option<u32> {
    let title = tag_blocks(doc, "<title", "</title>").next()?;
    let text = strip_tags(inner_after_open_tag(title));
    SEASON_RE.captures(&text)?.get(1)?.as_str().parse().ok()
}

fn detect_episode(doc: &str, cap: u32) -> u32 {
    EPISODE_RE
        .captures_iter(doc)
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        .min(cap)
}

fn detect_eliminated(doc: &str, roster: &Roster) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for row in tag_blocks(doc, "<tr", "</tr>") {
        let text = strip_tags(row);
        let lc = text.to_ascii_lowercase();
        if !ELIMINATION_WORDS.iter().any(|w| contains_word(&lc, w)) {
            continue;
        }
        for (_, key) in roster.find_in(&text) {
            if !out.iter().any(|k| k == key) {
                out.push(s!(key));
            }
        }
    }
    out
}

fn detect_milestones(doc: &str, roster: &Roster) -> Milestones {
    let mut m = Milestones::default();

    for rule in &MILESTONE_RULES {
        let mut keys: Vec<&str> = Vec::new();
        for hit in rule.start.find_iter(doc) {
            let run = normalize_entities(text_run(doc, hit.start(), rule.reach));
            keys.extend(roster.find_in(&run).into_iter().map(|(_, k)| k));
        }
        m.set(rule.kind, roster.in_roster_order(keys));
    }

    m.winner = detect_winner(doc, roster);
    m
}

fn detect_winner(doc: &str, roster: &Roster) -> Option<String> {
    let name = WINNER_RE.captures(doc)?.get(1)?.as_str();
    let key = roster.normalize(name);
    if key.is_none() {
        logd!("Wiki: winner candidate {name:?} is not in the cast");
    }
    key.map(|k| s!(k))
}

/// Text from `start` up to the next tag, at most `reach` chars.
fn text_run(doc: &str, start: usize, reach: usize) -> &str {
    let rest = &doc[start..];
    let end = rest
        .char_indices()
        .take(reach)
        .find(|(_, c)| *c == '<')
        .map(|(i, _)| i)
        .unwrap_or_else(|| rest.char_indices().nth(reach).map_or(rest.len(), |(i, _)| i));
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::survivor_50()
    }

    #[test]
    fn episode_is_max_and_capped() {
        let doc = "<p>Episode 1</p><p>episode  4</p><p>Episode 3</p>";
        assert_eq!(detect_episode(doc, 26), 4);
        assert_eq!(detect_episode("Episode 40", 26), 26);
        assert_eq!(detect_episode("no episodes yet", 26), 0);
    }

    #[test]
    fn eliminated_rows_need_a_keyword() {
        let doc = r#"
            <table>
              <tr><th>Castaway</th><th>Finish</th></tr>
              <tr><td><a href="/wiki/Jenna">Jenna Lewis-Dougherty</a></td><td>1st Voted Out<br>Day 3</td></tr>
              <tr><td>Aubry Bracco</td><td>Day 6</td></tr>
              <tr><td>Benjamin &quot;Coach&quot; Wade</td><td>Quit<br>Day 5</td></tr>
              <tr><td>Kyle Fraser</td><td>Medevaced Day 7</td></tr>
            </table>
        "#;
        let got = detect_eliminated(doc, &roster());
        assert_eq!(got, strings!["Jenna", "Coach", "Kyle"]);
    }

    #[test]
    fn eliminated_keeps_first_appearance_order_without_duplicates() {
        let doc = r#"
            <tr><td>Q Burdette</td><td>Eliminated</td></tr>
            <tr><td>Cirie Fields</td><td>Voted Out</td></tr>
            <tr><td>Recap: Q Burdette eliminated</td></tr>
        "#;
        assert_eq!(detect_eliminated(doc, &roster()), strings!["Q", "Cirie"]);
    }

    #[test]
    fn milestones_merge_jury_final3_in_roster_order() {
        let doc = r#"
            <p>The tribes merged on Day 17 with Ozzy, Dee, Aubry and Joe remaining.</p>
            <p>The first jury member was Joe, on Day 20.</p>
            <p>The final three were Dee, Aubry and Ozzy.</p>
        "#;
        let m = detect_milestones(doc, &roster());
        assert_eq!(m.merge, Some(strings!["Aubrey", "Joe", "Dee", "Ozzy"]));
        assert_eq!(m.jury, Some(strings!["Joe"]));
        assert_eq!(m.final3, Some(strings!["Aubrey", "Dee", "Ozzy"]));
        assert_eq!(m.winner, None);
    }

    #[test]
    fn milestone_run_stops_at_next_tag() {
        let doc = "<p>Merge: Cirie</p><p>Colby</p>";
        let m = detect_milestones(doc, &roster());
        assert_eq!(m.merge, Some(strings!["Cirie"]));
    }

    #[test]
    fn q_and_a_row_does_not_eliminate_q() {
        let doc = "<tr><td>Q&amp;A with Cirie Fields</td><td>Voted Out</td></tr>";
        assert_eq!(detect_eliminated(doc, &roster()), strings!["Cirie"]);
    }

    #[test]
    fn emerged_is_not_a_merge() {
        let doc = "<p>Colby emerged from the water</p>";
        assert!(detect_milestones(doc, &roster()).merge.is_none());
    }

    #[test]
    fn winner_must_be_cast() {
        let r = roster();
        assert_eq!(detect_winner(r#"Sole Survivor: Christian Hubicki"#, &r), Some(s!("Christian")));
        assert_eq!(detect_winner(r#"winner: The Tribe"#, &r), None);
        assert_eq!(detect_winner("<p>Sole Survivor: Q Burdette</p>", &r), Some(s!("Q")));
        assert_eq!(
            parse_doc("<p>And the winner: Q!</p>", &r, 26).milestones.winner.as_deref(),
            Some("Q")
        );
    }

    #[test]
    fn season_from_title() {
        let doc = "<html><head><title>Survivor 50 | Survivor Wiki | Fandom</title></head></html>";
        assert_eq!(detect_season(doc), Some(50));
        assert_eq!(detect_season("<p>no title</p>"), None);
    }

    #[test]
    fn text_run_respects_reach_and_utf8() {
        assert_eq!(text_run("merge é abc", 0, 7), "merge é");
        assert_eq!(text_run("merge<b>x</b>", 0, 100), "merge");
        assert_eq!(text_run("abc", 0, 100), "abc");
    }
}
