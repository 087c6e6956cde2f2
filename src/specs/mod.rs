// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific extraction. Each spec knows *where the ground truth lives in
//! the HTML* of one page and how to pull it out tolerantly.
//!
//! ## What lives here
//! - **Pure HTML parsing** (`parse_doc`) that can be exercised offline against
//!   saved pages.
//! - A thin `fetch` that only does the network part.
//!
//! ## What does **not** live here
//! - Reading/writing the data file, the manual override, fallbacks on fetch
//!   failure: that is `scrape::run`.
//!
//! ## Conventions
//! - Case-insensitive tag detection via `core::html`; regexes only for short
//!   textual patterns, never for document structure.
//! - Names are mapped onto cast keys through `cast::Roster` and matched as whole
//!   words, so one-letter keys don't light up on every row.
pub mod wiki;
