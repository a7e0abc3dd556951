//! `wrapup init` command implementation.

use std::path::PathBuf;

use clap::Args;
use wrapup_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the init command.
#[derive(Args, Debug)]
pub(crate) struct InitArgs {
    /// Where to write the configuration (default: ~/.config/wrapup/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    /// Write the default configuration file.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let path = match self.config {
            Some(path) => path,
            None => Config::default_path()?,
        };
        Config::write_default(&path, self.force)?;

        output.success(&format!("Wrote default configuration to {}", path.display()));
        output.info("Edit the [colors] section to change how pages look.");
        Ok(())
    }
}
