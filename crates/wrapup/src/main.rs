//! wrapup CLI - colorful tldr page viewer.
//!
//! Provides:
//! - `wrapup <page>`: Show a page from the local cache or upstream
//! - `wrapup init`: Write the default configuration file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InitArgs, ShowArgs};
use output::Output;

/// wrapup - colorful tldr page viewer.
#[derive(Parser)]
#[command(
    name = "wrapup",
    version,
    about,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    show: ShowArgs,

    /// Enable verbose output (show which page file is used).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file.
    Init(InitArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Init(args)) => args.execute(),
        None => cli.show.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables DEBUG, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool, rust_log: Option<String>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_page() {
        let cli = Cli::try_parse_from(["wrapup", "tar", "--platform", "osx", "--offline"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["wrapup", "init", "--force", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init(_))));
        assert!(cli.verbose);
    }

    #[test]
    fn test_page_required_without_subcommand() {
        assert!(Cli::try_parse_from(["wrapup"]).is_err());
    }

    #[test]
    fn test_unknown_platform_rejected() {
        assert!(Cli::try_parse_from(["wrapup", "tar", "--platform", "plan9"]).is_err());
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, None).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_uses_rust_log() {
        let filter = log_filter(false, Some("wrapup_pages=trace".to_owned()));
        assert_eq!(filter.to_string(), "wrapup_pages=trace");
    }

    #[test]
    fn test_log_filter_verbose_wins() {
        let filter = log_filter(true, Some("error".to_owned()));
        assert_eq!(filter.to_string(), "debug");
    }
}
