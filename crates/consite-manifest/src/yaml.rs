//! YAML manifest adapter.
//!
//! The YAML layout maps 1:1 onto [`SiteNode`]: a mapping with `name`, `uri`,
//! `children`, `attachments` and `labels` keys, recursively nested. Unknown
//! scalar keys become node attributes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ManifestFormat;
use crate::error::ManifestError;
use crate::node::SiteNode;

/// YAML flavour of the site manifest.
pub struct YamlManifest;

impl ManifestFormat for YamlManifest {
    fn read_root(&self, path: &Path) -> Result<SiteNode, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawNode = serde_yaml::from_str(&text)?;
        raw.into_node()
    }
}

/// Manifest mapping as written on disk. `name` is validated during the
/// conversion so a missing attribute reports uniformly with the XML adapter.
#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
    #[serde(default)]
    attachments: Vec<RawNode>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(flatten)]
    attributes: BTreeMap<String, String>,
}

impl RawNode {
    fn into_node(self) -> Result<SiteNode, ManifestError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(ManifestError::MissingAttribute {
                    element: "page".to_owned(),
                    attribute: "name".to_owned(),
                });
            }
        };

        Ok(SiteNode {
            name,
            uri: self.uri,
            attributes: self.attributes,
            children: collect(self.children)?,
            attachments: collect(self.attachments)?,
            labels: self.labels,
        })
    }
}

fn collect(raw: Vec<RawNode>) -> Result<Vec<SiteNode>, ManifestError> {
    raw.into_iter().map(RawNode::into_node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r"name: Home
uri: home.md
labels:
  - documentation
children:
  - name: Getting Started
    uri: start.md
    children:
      - name: Install
  - name: Reference
    uri: reference.md
attachments:
  - name: arch.png
    uri: images/arch.png
    contentType: image/png
    comment: architecture diagram
";

    fn parse(text: &str) -> Result<SiteNode, ManifestError> {
        let raw: RawNode = serde_yaml::from_str(text)?;
        raw.into_node()
    }

    #[test]
    fn parses_nested_tree_in_document_order() {
        let root = parse(MANIFEST).unwrap();

        assert_eq!(root.name, "Home");
        assert_eq!(root.labels, vec!["documentation"]);

        let titles: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(titles, vec!["Getting Started", "Reference"]);
        assert_eq!(root.children[0].children[0].name, "Install");

        let attachment = &root.attachments[0];
        assert_eq!(attachment.attribute("contentType"), Some("image/png"));
        assert_eq!(attachment.attribute("comment"), Some("architecture diagram"));
    }

    #[test]
    fn missing_name_is_rejected_anywhere_in_the_tree() {
        let err = parse("name: Home\nchildren:\n  - uri: broken.md\n").unwrap_err();
        assert!(matches!(err, ManifestError::MissingAttribute { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse("name: [unterminated").unwrap_err();
        assert!(matches!(err, ManifestError::Yaml(_)));
    }
}
