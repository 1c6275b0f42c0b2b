//! `consite deploy` command implementation.

use std::path::PathBuf;

use clap::Args;
use consite_config::Config;
use consite_confluence::{ConfluenceService, RestClient};
use consite_manifest::read_manifest;
use consite_publisher::SitePublisher;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the deploy command.
#[derive(Args)]
pub(crate) struct DeployArgs {
    /// Path to configuration file (default: auto-discover consite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl DeployArgs {
    /// Execute the deploy command.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref())?;

        let manifest_path = config.manifest_path();
        output.info(&format!("Reading manifest {}...", manifest_path.display()));
        let root = read_manifest(&manifest_path)?;

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
            "Publishing '{}' under '{}' in space {}...",
            root.name, config.site.parent_page, config.site.space_key
        ));
        publisher.synchronize(&root).await?;
        client.close().await?;

        output.success("\nSite published successfully!");
        Ok(())
    }
}
