//! pkgmeta CLI
//!
//! Generates setup.py from pkgmeta.meta and the user's site defaults.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let site_defaults = cli.site_defaults.as_deref();
    match cli.command {
        Some(cmd) => execute_command(cmd, site_defaults),
        None => {
            println!("{} Generate setup.py from package metadata", "pkgmeta".green().bold());
            println!();
            println!("Run {} for available commands.", "pkgmeta --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, site_defaults: Option<&std::path::Path>) -> Result<()> {
    match cmd {
        Commands::Setup { paths } => commands::run_setup(&paths, site_defaults),
        Commands::Metadata { path } => commands::run_metadata(&path, site_defaults),
        Commands::Kwargs { path } => commands::run_kwargs(&path, site_defaults),
        Commands::Write {
            path,
            metadata,
            manifest,
        } => commands::run_write(&path, site_defaults, metadata, manifest),
        Commands::Set { key, value, path } => commands::run_set(&path, site_defaults, &key, &value),
        Commands::Unconfigured {
            path,
            tier,
            reconfigure,
            reclassify,
        } => commands::run_unconfigured(&path, site_defaults, tier.into(), reconfigure, reclassify),
        Commands::PkgInfo { path, egg_info } => commands::run_pkg_info(&path, site_defaults, &egg_info),
    }
}
