// src/cast.rs
//! Cast roster and wiki-name normalization.
//!
//! The web page, the JSON file and the manual override all speak in cast
//! *keys* (`"Devens"`, `"Coach"`). The wiki speaks in full names, first names
//! and nicknames. A [`Roster`] maps the latter onto the former.

use serde::{Deserialize, Serialize};

use crate::core::sanitize::{find_word, normalize_ws};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CastMember {
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CastMember {
    pub fn new(key: &str, aliases: &[&str]) -> Self {
        Self {
            key: s!(key),
            aliases: aliases.iter().map(|a| s!(*a)).collect(),
        }
    }

    /// Key first, then aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Season 50 cast, in page order, with the wiki spellings seen so far.
const SURVIVOR_50: &[(&str, &[&str])] = &[
    ("Aubrey",    &["Aubry Bracco", "Aubry"]),
    ("Genevieve", &["Genevieve Mushaluk"]),
    ("Rizo",      &["Rizo Velovic"]),
    ("Devens",    &["Rick Devens", "Rick"]),
    ("Steph",     &["Stephenie LaGrossa", "Stephenie"]),
    ("Cirie",     &["Cirie Fields"]),
    ("Charlie",   &["Charlie Davis"]),
    ("Kamilla",   &["Kamilla Karthigesu"]),
    ("Tiffany",   &["Tiffany Ervin"]),
    ("Colby",     &["Colby Donaldson"]),
    ("Emily",     &["Emily Flippen"]),
    ("Joe",       &["Joe Hunter"]),
    ("Jenna",     &["Jenna Lewis-Dougherty", "Jenna Lewis"]),
    ("Coach",     &["Benjamin Wade", "Coach Wade"]),
    ("Christian", &["Christian Hubicki"]),
    ("Mike",      &["Mike White"]),
    ("Dee",       &["Dee Valladares"]),
    ("Savanah",   &["Savannah Louie"]),
    ("Josh",      &["Jonathan Young", "Jonathan"]),
    ("Chrissy",   &["Chrissy Hofbeck"]),
    ("Ozzy",      &["Ozzy Lusth"]),
    ("Kyle",      &["Kyle Fraser"]),
    ("Angelina",  &["Angelina Keeley"]),
    ("Q",         &["Q Burdette"]),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    members: Vec<CastMember>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::survivor_50()
    }
}

impl Roster {
    pub fn new(members: Vec<CastMember>) -> Self {
        Self { members }
    }

    pub fn survivor_50() -> Self {
        Self::new(
            SURVIVOR_50
                .iter()
                .map(|(key, aliases)| CastMember::new(key, aliases))
                .collect(),
        )
    }

    pub fn members(&self) -> &[CastMember] {
        &self.members
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Position of `key` in page order.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.members.iter().position(|m| m.key == key)
    }

    /// Map a wiki name to our cast key: full match first, then first name only.
    pub fn normalize(&self, name: &str) -> Option<&str> {
        let name = normalize_ws(name);
        if name.is_empty() {
            return None;
        }
        self.lookup(&name).or_else(|| {
            let first = name.split(' ').next()?;
            self.lookup(first)
        })
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.names().any(|n| n.eq_ignore_ascii_case(name)))
            .map(|m| m.key.as_str())
    }

    /// Every member named in `text` (whole words, any case), with the byte
    /// offset of the earliest mention. Sorted by that offset.
    pub fn find_in(&self, text: &str) -> Vec<(usize, &str)> {
        let lc = text.to_ascii_lowercase();
        let mut hits: Vec<(usize, &str)> = self
            .members
            .iter()
            .filter_map(|m| {
                m.names()
                    .filter_map(|n| find_word(&lc, &n.to_ascii_lowercase()))
                    .min()
                    .map(|pos| (pos, m.key.as_str()))
            })
            .collect();
        hits.sort_by_key(|(pos, _)| *pos);
        hits
    }

    /// Keep the roster's page order and drop duplicates / unknown keys.
    pub fn in_roster_order<'a, I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = vec![false; self.members.len()];
        for k in keys {
            if let Some(i) = self.index_of(k) {
                seen[i] = true;
            }
        }
        self.members
            .iter()
            .zip(seen)
            .filter(|(_, hit)| *hit)
            .map(|(m, _)| m.key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_has_the_full_cast() {
        let r = Roster::survivor_50();
        assert_eq!(r.len(), 24);
        assert_eq!(r.keys().next(), Some("Aubrey"));
        assert_eq!(r.keys().last(), Some("Q"));
    }

    #[test]
    fn normalize_full_names_and_nicknames() {
        let r = Roster::survivor_50();
        assert_eq!(r.normalize("Aubry Bracco"), Some("Aubrey"));
        assert_eq!(r.normalize("  Rick Devens "), Some("Devens"));
        assert_eq!(r.normalize("Benjamin Wade"), Some("Coach"));
        assert_eq!(r.normalize("Savannah Louie"), Some("Savanah"));
        assert_eq!(r.normalize("Jonathan"), Some("Josh"));
    }

    #[test]
    fn normalize_falls_back_to_first_name() {
        let r = Roster::survivor_50();
        assert_eq!(r.normalize("Cirie Something"), Some("Cirie"));
        assert_eq!(r.normalize("ozzy"), Some("Ozzy"));
        assert_eq!(r.normalize("Jeff Probst"), None);
        assert_eq!(r.normalize("   "), None);
    }

    #[test]
    fn find_in_matches_whole_words_only() {
        let r = Roster::survivor_50();
        // "quit" must not mark Q, "Deep" must not mark Dee
        let hits = r.find_in("Episode 3: Jenna quit after a Deep dive, Coach Wade voted out");
        let keys: Vec<&str> = hits.iter().map(|(_, k)| *k).collect();
        assert_eq!(keys, vec!["Jenna", "Coach"]);
    }

    #[test]
    fn in_roster_order_dedups() {
        let r = Roster::survivor_50();
        let v = r.in_roster_order(["Q", "Aubrey", "Q", "Nobody"]);
        assert_eq!(v, strings!["Aubrey", "Q"]);
    }
}
