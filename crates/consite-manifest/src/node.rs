//! Generic site tree produced by the manifest adapters.

use std::collections::BTreeMap;

/// One element of the site manifest: a page, or an attachment of a page.
///
/// The same node shape serves both purposes; attachments simply never carry
/// children of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteNode {
    /// Page title, or attachment file name.
    pub name: String,
    /// Path of the source file, relative to the manifest directory.
    /// Falls back to `name` when absent.
    pub uri: Option<String>,
    /// Remaining attributes (`comment`, `contentType`, ...).
    pub attributes: BTreeMap<String, String>,
    /// Sub-pages, in manifest order.
    pub children: Vec<SiteNode>,
    /// Binary assets attached to this page, in manifest order.
    pub attachments: Vec<SiteNode>,
    /// Label names applied to this page, in manifest order.
    pub labels: Vec<String>,
}

impl SiteNode {
    /// Node with a name and nothing else.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Relative path of the node's source file (`uri`, or `name` when unset).
    #[must_use]
    pub fn source_path(&self) -> &str {
        self.uri.as_deref().unwrap_or(&self.name)
    }

    /// Look up an extra attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_path_falls_back_to_name() {
        let mut node = SiteNode::named("Home");
        assert_eq!(node.source_path(), "Home");

        node.uri = Some("home.md".to_owned());
        assert_eq!(node.source_path(), "home.md");
    }
}
