//! Command line interface definition

use clap::{Parser, Subcommand};
use dna_types::ColorChoice;
use std::path::PathBuf;

/// dna - package splicer for the dna::}{::lang organism mesh
#[derive(Parser)]
#[command(name = "dna")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Splice dna::}{::lang packages from the organism mesh")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to <home>/logs/
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base directory for spliced packages and state
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Splice a package and its missing dependencies
    #[command(alias = "s")]
    Splice {
        /// Catalog package name
        package: String,
    },

    /// List catalog packages and their splice status
    #[command(alias = "ls")]
    List,

    /// Show installation state and mesh connectivity
    Status,

    /// Install the full dna::}{::lang suite (also `dna -i -g`)
    #[command(alias = "i", short_flag = 'i', long_flag = "install")]
    Install {
        /// Install every package of the full suite
        #[arg(short, long = "global")]
        global: bool,

        /// Suite version to record, optionally preceded by `dna::}{::lang`
        #[arg(value_name = "VERSION")]
        args: Vec<String>,
    },

    /// A bare catalog package name splices that package
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Commands {
    /// Suite version requested by `install --global`
    ///
    /// Tokens naming the language itself (`dna::}{::lang`) are skipped.
    pub fn suite_version(args: &[String]) -> Option<&str> {
        args.iter()
            .map(String::as_str)
            .find(|arg| !arg.starts_with("dna::"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn parses_splice_with_global_flags() {
        let cli = parse(&["dna", "--json", "splice", "aura", "--home", "/tmp/dna"]);
        assert!(cli.global.json);
        assert_eq!(cli.global.home, Some(PathBuf::from("/tmp/dna")));
        assert!(matches!(cli.command, Commands::Splice { ref package } if package == "aura"));
    }

    #[test]
    fn parses_global_install_with_version() {
        let cli = parse(&["dna", "install", "-g", "omega52.0"]);
        match cli.command {
            Commands::Install { global, args } => {
                assert!(global);
                assert_eq!(Commands::suite_version(&args), Some("omega52.0"));
            }
            _ => panic!("expected install"),
        }
    }

    #[test]
    fn parses_install_short_flag() {
        let cli = parse(&["dna", "-i", "-g", "dna::}{::lang", "omega51.843"]);
        match cli.command {
            Commands::Install { global, args } => {
                assert!(global);
                assert_eq!(Commands::suite_version(&args), Some("omega51.843"));
            }
            _ => panic!("expected install"),
        }

        let cli = parse(&["dna", "--json", "--install", "--global"]);
        assert!(cli.global.json);
        assert!(matches!(cli.command, Commands::Install { global: true, .. }));
    }

    #[test]
    fn skips_language_token_in_version() {
        let args = vec!["dna::}{::lang".to_string(), "omega51.843".to_string()];
        assert_eq!(Commands::suite_version(&args), Some("omega51.843"));

        let only_lang = vec!["dna::}{::lang".to_string()];
        assert_eq!(Commands::suite_version(&only_lang), None);
    }

    #[test]
    fn bare_name_is_external() {
        let cli = parse(&["dna", "quantumcoin"]);
        match cli.command {
            Commands::External(args) => assert_eq!(args, vec!["quantumcoin".to_string()]),
            _ => panic!("expected external subcommand"),
        }
    }

    #[test]
    fn rejects_unknown_color() {
        assert!(Cli::try_parse_from(["dna", "--color", "sometimes", "list"]).is_err());
    }
}
