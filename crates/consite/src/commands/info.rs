//! `consite info` command implementation.

use std::path::PathBuf;

use clap::Args;
use consite_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the info command.
#[derive(Args)]
pub(crate) struct InfoArgs {
    /// Path to configuration file (default: auto-discover consite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl InfoArgs {
    /// Execute the info command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref())?;

        output.highlight("Resolved configuration:");
        output.info(&format!("  manifest:     {}", config.manifest_path().display()));
        output.info(&format!("  space key:    {}", config.site.space_key));
        output.info(&format!("  parent page:  {}", config.site.parent_page));
        output.info(&format!("  base url:     {}", config.confluence.base_url));
        output.info(&format!("  username:     {}", config.confluence.username));
        output.info(&format!(
            "  password:     {}",
            mask(&config.confluence.password)
        ));
        Ok(())
    }
}

/// Masked rendition of a secret.
fn mask(value: &str) -> String {
    if value.is_empty() {
        "<not set>".to_owned()
    } else {
        "*".repeat(value.chars().count())
    }
}
