//! `consite delete` command implementation.

use std::path::PathBuf;

use clap::Args;
use consite_config::Config;
use consite_confluence::{ConfluenceService, RestClient};
use consite_manifest::read_manifest;
use consite_publisher::SitePublisher;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the delete command.
#[derive(Args)]
pub(crate) struct DeleteArgs {
    /// Path to configuration file (default: auto-discover consite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl DeleteArgs {
    /// Execute the delete command.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref())?;

        let root = read_manifest(&config.manifest_path())?;

        let client = RestClient::from_config(
            &config.confluence.base_url,
            &config.confluence.username,
            &config.confluence.password,
        )?;
        let publisher = SitePublisher::new(
            &client,
            &config.site.space_key,
            &config.site.parent_page,
            config.site_dir(),
        );

        output.info(&format!(
            "Removing '{}' from space {}...",
            root.name, config.site.space_key
        ));
        let removed = publisher.delete_subtree(&root).await?;
        client.close().await?;

        if removed == 0 {
            output.warning("\nNo published site root found; nothing removed.");
        } else {
            output.success(&format!("\n# page(s) removed: {removed}"));
        }
        Ok(())
    }
}
