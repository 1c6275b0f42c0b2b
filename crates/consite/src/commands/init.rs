//! `consite init` command implementation.

use std::path::PathBuf;

use clap::Args;
use consite_config::CONFIG_TEMPLATE;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Where to write the configuration.
    #[arg(short, long, default_value = "consite.toml")]
    config: PathBuf,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    /// Execute the init command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        if self.config.exists() && !self.force {
            return Err(CliError::Validation(format!(
                "{} already exists (use --force to overwrite)",
                self.config.display()
            )));
        }

        std::fs::write(&self.config, CONFIG_TEMPLATE)?;

        output.success(&format!("Wrote {}", self.config.display()));
        output.info("Fill in the [site] section and export CONFLUENCE_USER / CONFLUENCE_PASSWORD.");
        Ok(())
    }
}
