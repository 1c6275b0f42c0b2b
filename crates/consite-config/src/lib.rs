//! Configuration management for consite.
//!
//! Parses `consite.toml` with serde, auto-discovers the file in parent
//! directories and expands `${VAR}` / `${VAR:-default}` environment
//! references in connection fields, so credentials stay out of the file.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "consite.toml";

/// Starter configuration written by `consite init`.
pub const CONFIG_TEMPLATE: &str = r#"[site]
manifest = "site.yml"
space_key = "SPACE"
parent_page = "Home"

[confluence]
base_url = "https://confluence.example.com"
username = "${CONFLUENCE_USER}"
password = "${CONFLUENCE_PASSWORD}"
"#;

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Site declaration.
    pub site: SiteConfig,
    /// Confluence connection.
    pub confluence: ConfluenceConfig,

    /// Directory the config file was loaded from (set after loading).
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Site declaration section.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    /// Manifest file path, relative to the config file.
    pub manifest: String,
    /// Key of the target space.
    pub space_key: String,
    /// Title of the pre-existing page the site root is published under.
    #[serde(default = "default_parent_page")]
    pub parent_page: String,
}

fn default_parent_page() -> String {
    "Home".to_owned()
}

/// Confluence connection section.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Server base URL.
    pub base_url: String,
    /// Basic-auth user.
    pub username: String,
    /// Basic-auth password or API token.
    #[serde(default)]
    pub password: String,
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `consite.toml` in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file is found, parsing fails, an
    /// environment reference is unset or validation rejects a field.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => Self::discover_config()
                .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))?,
        };
        Self::load_from_file(&path)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;
        config.base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        config.expand_fields()?;
        config.validate()?;
        Ok(config)
    }

    fn discover_config() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    fn expand_fields(&mut self) -> Result<(), ConfigError> {
        self.confluence.base_url =
            expand::expand_env(&self.confluence.base_url, "confluence.base_url")?;
        self.confluence.username =
            expand::expand_env(&self.confluence.username, "confluence.username")?;
        self.confluence.password =
            expand::expand_env(&self.confluence.password, "confluence.password")?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.manifest, "site.manifest")?;
        require_non_empty(&self.site.space_key, "site.space_key")?;
        require_non_empty(&self.site.parent_page, "site.parent_page")?;
        require_http_url(&self.confluence.base_url, "confluence.base_url")?;
        require_non_empty(&self.confluence.username, "confluence.username")?;
        Ok(())
    }

    /// Absolute path of the manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.base_dir.join(&self.site.manifest)
    }

    /// Directory content file uris resolve against (the manifest's
    /// directory).
    #[must_use]
    pub fn site_dir(&self) -> PathBuf {
        self.manifest_path()
            .parent()
            .map_or_else(|| self.base_dir.clone(), Path::to_path_buf)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. `confluence.password`).
        field: String,
        /// Error message (e.g. "${`CONFLUENCE_PASSWORD`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    const VALID: &str = r#"[site]
manifest = "docs/site.xml"
space_key = "DOCS"

[confluence]
base_url = "https://confluence.example.com"
username = "publisher"
password = "secret"
"#;

    #[test]
    fn loads_and_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, VALID);

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.site.space_key, "DOCS");
        // parent_page falls back to the default anchor.
        assert_eq!(config.site.parent_page, "Home");
        assert_eq!(config.manifest_path(), dir.path().join("docs/site.xml"));
        assert_eq!(config.site_dir(), dir.path().join("docs"));
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let err = Config::load(Some(Path::new("/nonexistent/consite.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"[site]
manifest = "site.yml"
space_key = "DOCS"

[confluence]
base_url = "ftp://confluence.example.com"
username = "publisher"
"#,
        );

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn credentials_expand_from_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"[site]
manifest = "site.yml"
space_key = "DOCS"

[confluence]
base_url = "https://confluence.example.com"
username = "${CONSITE_TEST_USER:-fallback}"
password = "${CONSITE_TEST_PASSWORD:-}"
"#,
        );

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.confluence.username, "fallback");
        assert_eq!(config.confluence.password, "");
    }

    #[test]
    fn unset_variable_without_default_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"[site]
manifest = "site.yml"
space_key = "DOCS"

[confluence]
base_url = "https://confluence.example.com"
username = "${CONSITE_SURELY_UNSET_VAR}"
"#,
        );

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CONSITE_SURELY_UNSET_VAR"));
    }

    #[test]
    fn template_round_trips() {
        // The init template must parse once its variables resolve.
        let parsed: Result<Config, _> = toml::from_str(CONFIG_TEMPLATE);
        assert!(parsed.is_ok());
    }
}
