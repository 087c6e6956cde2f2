// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::{
    cast::Roster,
    config::options::AppOptions,
    data::{MilestoneKind, PoolData},
    error::{Error, Result},
    manual::{self, Edit},
    progress::LogProgress,
    scrape, server, store,
};

#[derive(Parser, Debug)]
#[command(name = "survivor_pool", version, about = "Survivor pool scraper and JSON API")]
pub struct Cli {
    /// TOML config file (default: ./survivor_pool.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace). RUST_LOG wins.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scraper once and write the data file (the nightly cron job)
    Scrape {
        /// Use the manual override file instead of the wiki
        #[arg(long)]
        manual: bool,
        /// Print the result instead of writing the data file
        #[arg(long)]
        dry_run: bool,
        /// Parse a saved copy of the wiki page instead of fetching it
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },
    /// Serve the data file over HTTP
    Serve {
        #[arg(long, env = "PORT")]
        port: Option<u16>,
        /// Skip the scrape that normally runs before serving
        #[arg(long)]
        no_initial_scrape: bool,
        /// Re-scrape in-process every N hours (0 = off)
        #[arg(long, value_name = "N")]
        refresh_hours: Option<u64>,
    },
    /// Print the current data file
    Show {
        #[arg(long)]
        json: bool,
    },
    /// List cast keys and the wiki spellings they match
    Cast,
    /// Edit the manual override file
    Manual {
        #[command(subcommand)]
        action: ManualCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum ManualCmd {
    /// Create/overwrite the manual file from the current data file
    Init,
    /// Print the manual file
    Show,
    /// Mark cast members as eliminated
    Eliminate {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Undo an elimination
    Restore {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Set the episode number
    Episode { n: u32 },
    /// Replace a milestone list (no names clears it)
    Milestone {
        kind: MilestoneArg,
        names: Vec<String>,
    },
    /// Set the winner (no name clears it)
    Winner { name: Option<String> },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MilestoneArg {
    Merge,
    Jury,
    Final3,
}

impl From<MilestoneArg> for MilestoneKind {
    fn from(m: MilestoneArg) -> Self {
        match m {
            MilestoneArg::Merge => MilestoneKind::Merge,
            MilestoneArg::Jury => MilestoneKind::Jury,
            MilestoneArg::Final3 => MilestoneKind::Final3,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut opts = AppOptions::load(cli.config.as_deref())?;

    match cli.command {
        Command::Scrape { manual, dry_run, html } => {
            opts.scrape.use_manual_override |= manual;
            opts.scrape.dry_run = dry_run;
            opts.scrape.html_file = html;

            let mut prog = LogProgress::default();
            let outcome = scrape::run(&opts, Some(&mut prog))?;
            if dry_run {
                println!("{}", to_json(&outcome.data, &opts)?);
            }
        }
        Command::Serve { port, no_initial_scrape, refresh_hours } => {
            if let Some(p) = port {
                opts.server.port = p;
            }
            if no_initial_scrape {
                opts.server.initial_scrape = false;
            }
            if let Some(h) = refresh_hours {
                opts.server.refresh_hours = h;
            }
            server::serve(opts)?;
        }
        Command::Show { json } => {
            let d = store::load_or_default(&opts.scrape.data_file);
            if json {
                println!("{}", to_json(&d, &opts)?);
            } else {
                print!("{}", render_text(&d, &opts.roster()));
            }
        }
        Command::Cast => {
            for m in opts.roster().members() {
                println!("{:<10} {}", m.key, m.aliases.join(", "));
            }
        }
        Command::Manual { action } => run_manual(action, &opts)?,
    }
    Ok(())
}

fn run_manual(action: ManualCmd, opts: &AppOptions) -> Result<()> {
    let roster = opts.roster();
    let edit = match action {
        ManualCmd::Init => {
            let d = manual::init(&opts.scrape)?;
            println!("Wrote {} ({})", opts.scrape.manual_file.display(), d.summary());
            return Ok(());
        }
        ManualCmd::Show => {
            let d = manual::load(&opts.scrape.manual_file)?;
            print!("{}", render_text(&d, &roster));
            return Ok(());
        }
        ManualCmd::Eliminate { names } => Edit::Eliminate(names),
        ManualCmd::Restore { names } => Edit::Restore(names),
        ManualCmd::Episode { n } => Edit::Episode(n),
        ManualCmd::Milestone { kind, names } => Edit::Milestone(kind.into(), names),
        ManualCmd::Winner { name } => Edit::Winner(name),
    };

    let d = manual::edit_file(&opts.scrape, &roster, edit)?;
    println!("Updated {} ({})", opts.scrape.manual_file.display(), d.summary());
    if !opts.scrape.use_manual_override {
        println!("Note: the override is only used with `scrape --manual` or use_manual_override = true");
    }
    Ok(())
}

fn to_json(d: &PoolData, opts: &AppOptions) -> Result<String> {
    d.to_json_pretty()
        .map_err(|e| Error::Json { path: opts.scrape.data_file.clone(), source: e })
}

/// Human-readable board for `show`.
pub fn render_text(d: &PoolData, roster: &Roster) -> String {
    let mut out = String::new();
    let updated = d
        .last_updated
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| s!("never"));

    out.push_str(&format!("Episode {} | status {} | updated {}\n", d.episode, d.scrape_status, updated));
    out.push_str(&format!("Eliminated ({}): {}\n", d.eliminated.len(), d.eliminated.join(", ")));

    let remaining = d.remaining(roster);
    out.push_str(&format!("Remaining ({}): {}\n", remaining.len(), remaining.join(", ")));

    for kind in MilestoneKind::ALL {
        if let Some(keys) = d.milestones.get(kind) {
            out.push_str(&join!(kind.label(), ": ", &keys.join(", "), "\n"));
        }
    }
    if let Some(w) = &d.milestones.winner {
        out.push_str(&join!("winner: ", w, "\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manual_milestone() {
        let cli = Cli::try_parse_from([
            "survivor_pool", "manual", "milestone", "final3", "Aubry Bracco", "Cirie",
        ])
        .unwrap();
        match cli.command {
            Command::Manual { action: ManualCmd::Milestone { kind, names } } => {
                assert_eq!(kind, MilestoneArg::Final3);
                assert_eq!(names, strings!["Aubry Bracco", "Cirie"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn eliminate_needs_a_name() {
        assert!(Cli::try_parse_from(["survivor_pool", "manual", "eliminate"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["survivor_pool", "scrape", "--dry-run", "-vv", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Command::Scrape { dry_run: true, manual: false, html: None }));
    }

    #[test]
    fn render_text_lists_board() {
        let roster = Roster::survivor_50();
        let mut d = PoolData { episode: 3, eliminated: strings!["Jenna", "Coach"], ..Default::default() };
        d.milestones.winner = Some(s!("Q"));
        let text = render_text(&d, &roster);
        assert!(text.starts_with("Episode 3 | status no_data | updated never\n"));
        assert!(text.contains("Eliminated (2): Jenna, Coach\n"));
        assert!(text.contains("Remaining (22): Aubrey, "));
        assert!(text.ends_with("winner: Q\n"));
    }
}
