// src/bin/cli.rs
use clap::Parser;
use survivor_pool::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    survivor_pool::log::init_stderr(args.verbose);
    cli::run(args)?;
    Ok(())
}
