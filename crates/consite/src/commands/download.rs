//! `consite download` command implementation.

use std::path::PathBuf;

use clap::Args;
use consite_config::Config;
use consite_confluence::RestClient;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the download command.
#[derive(Args)]
pub(crate) struct DownloadArgs {
    /// The page identifier.
    #[arg(long)]
    pageid: String,

    /// The output file name (default: print to stdout).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Fetch the deprecated wiki source instead of storage format.
    #[arg(long)]
    wiki: bool,

    /// Path to configuration file (default: auto-discover consite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl DownloadArgs {
    /// Execute the download command.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref())?;

        let client = RestClient::from_config(
            &config.confluence.base_url,
            &config.confluence.username,
            &config.confluence.password,
        )?;

        let content = client.download_page_source(&self.pageid, self.wiki).await?;

        match self.file {
            Some(path) => {
                std::fs::write(&path, &content)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.plain(&content),
        }
        Ok(())
    }
}
