//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use pkg_meta::Tier;
use std::path::PathBuf;

/// pkgmeta - Generate setup.py from package metadata
#[derive(Parser, Debug)]
#[command(name = "pkgmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Site defaults file to use instead of ~/.pkgmeta
    #[arg(long, global = true, env = "PKGMETA_SITE_DEFAULTS", value_name = "FILE")]
    pub site_defaults: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the generated setup.py for each project
    Setup {
        /// Project directories
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
    },

    /// Print the metadata a user actually chose, as JSON
    Metadata {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the keyword arguments setup() would receive, as JSON
    Kwargs {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Write setup.py into the project
    ///
    /// Refuses to replace a setup.py that pkgmeta did not generate.
    ///
    /// Examples:
    ///   pkgmeta write                  # setup.py only
    ///   pkgmeta write --metadata       # also rewrite pkgmeta.meta
    ///   pkgmeta write --manifest       # also add data files to MANIFEST.in
    Write {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Also write the projected pkgmeta.meta
        #[arg(short, long)]
        metadata: bool,

        /// Also add missing data file includes to MANIFEST.in
        #[arg(long)]
        manifest: bool,
    },

    /// Set one attribute in pkgmeta.meta
    ///
    /// The value is parsed the way it would be typed at a prompt: list
    /// attributes split on the first separator, mappings take a literal.
    /// An empty value removes the attribute.
    Set {
        /// Attribute name
        key: String,

        /// Attribute value
        value: String,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// List attributes of a tier that still need a value
    Unconfigured {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Attribute tier
        #[arg(short, long, value_enum, default_value_t = TierArg::Standard)]
        tier: TierArg,

        /// List every attribute of the tier
        #[arg(long)]
        reconfigure: bool,

        /// Include classifiers even when set
        #[arg(long)]
        reclassify: bool,
    },

    /// Write PKG-INFO into an egg-info directory
    PkgInfo {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// The egg-info directory
        #[arg(long, value_name = "DIR")]
        egg_info: PathBuf,
    },
}

/// Attribute tiers as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierArg {
    Standard,
    Extended,
    Engine,
}

impl From<TierArg> for Tier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Standard => Tier::Standard,
            TierArg::Extended => Tier::Extended,
            TierArg::Engine => Tier::Engine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["pkgmeta"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_setup_defaults_to_current_directory() {
        let cli = Cli::parse_from(["pkgmeta", "setup"]);
        assert_eq!(
            cli.command,
            Some(Commands::Setup {
                paths: vec![PathBuf::from(".")]
            })
        );
    }

    #[test]
    fn parse_setup_many_paths() {
        let cli = Cli::parse_from(["pkgmeta", "setup", "a", "b"]);
        assert_eq!(
            cli.command,
            Some(Commands::Setup {
                paths: vec![PathBuf::from("a"), PathBuf::from("b")]
            })
        );
    }

    #[test]
    fn parse_write_flags() {
        let cli = Cli::parse_from(["pkgmeta", "write", "proj", "-m", "--manifest"]);
        assert_eq!(
            cli.command,
            Some(Commands::Write {
                path: PathBuf::from("proj"),
                metadata: true,
                manifest: true,
            })
        );
    }

    #[test]
    fn parse_set() {
        let cli = Cli::parse_from(["pkgmeta", "set", "classifiers", "a, b", "--path", "proj"]);
        assert_eq!(
            cli.command,
            Some(Commands::Set {
                key: "classifiers".to_string(),
                value: "a, b".to_string(),
                path: PathBuf::from("proj"),
            })
        );
    }

    #[test]
    fn parse_unconfigured_tier() {
        let cli = Cli::parse_from(["pkgmeta", "unconfigured", "--tier", "engine", "--reconfigure"]);
        let Some(Commands::Unconfigured { tier, reconfigure, reclassify, .. }) = cli.command else {
            panic!("expected unconfigured");
        };
        assert_eq!(Tier::from(tier), Tier::Engine);
        assert!(reconfigure);
        assert!(!reclassify);
    }

    #[test]
    fn parse_pkg_info_requires_egg_info() {
        assert!(Cli::try_parse_from(["pkgmeta", "pkg-info"]).is_err());
        let cli = Cli::parse_from(["pkgmeta", "pkg-info", "--egg-info", "demo.egg-info"]);
        assert!(matches!(cli.command, Some(Commands::PkgInfo { .. })));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pkgmeta", "metadata", "-v", "--site-defaults", "site.json"]);
        assert!(cli.verbose);
        assert_eq!(cli.site_defaults, Some(PathBuf::from("site.json")));
    }
}
