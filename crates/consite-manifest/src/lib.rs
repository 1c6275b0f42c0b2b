//! Declarative site manifest parsing.
//!
//! A manifest describes the page tree to publish: one root page, nested
//! sub-pages, attachments and labels. Two interchangeable formats (XML and
//! YAML) are supported, selected by file extension. Both produce the same
//! [`SiteNode`] tree, so consumers stay format-agnostic.

mod error;
mod node;
mod xml;
mod yaml;

pub use error::ManifestError;
pub use node::SiteNode;
pub use xml::XmlManifest;
pub use yaml::YamlManifest;

use std::path::Path;

/// A manifest flavour that can produce the site tree from a file.
pub trait ManifestFormat {
    /// Read and parse the manifest, returning the root page node.
    fn read_root(&self, path: &Path) -> Result<SiteNode, ManifestError>;
}

/// Select the manifest format for a file by its extension.
pub fn manifest_format_for(path: &Path) -> Result<&'static dyn ManifestFormat, ManifestError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("xml") => Ok(&XmlManifest),
        Some("yml" | "yaml") => Ok(&YamlManifest),
        other => Err(ManifestError::UnsupportedFormat(
            other.unwrap_or("").to_owned(),
        )),
    }
}

/// Pick the format by extension and read the root node.
pub fn read_manifest(path: &Path) -> Result<SiteNode, ManifestError> {
    manifest_format_for(path)?.read_root(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_manifest(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn format_selected_by_extension() {
        assert!(manifest_format_for(Path::new("site.xml")).is_ok());
        assert!(manifest_format_for(Path::new("site.yml")).is_ok());
        assert!(manifest_format_for(Path::new("site.yaml")).is_ok());
        assert!(matches!(
            manifest_format_for(Path::new("site.json")),
            Err(ManifestError::UnsupportedFormat(ext)) if ext == "json"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_manifest(Path::new("/nonexistent/site.yml")).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    /// An XML list of exactly one `child` element and a YAML single mapping
    /// must produce the identical in-memory tree.
    #[test]
    fn single_child_trees_are_format_equivalent() {
        let dir = tempfile::tempdir().unwrap();

        let xml = write_manifest(
            &dir,
            "site.xml",
            r#"<site>
  <home name="Home" uri="home.md">
    <label>docs</label>
    <child name="Guide" uri="guide.md"/>
    <attachment name="logo.png" contentType="image/png" comment="project logo"/>
  </home>
</site>"#,
        );

        let yaml = write_manifest(
            &dir,
            "site.yml",
            r#"name: Home
uri: home.md
labels:
  - docs
children:
  - name: Guide
    uri: guide.md
attachments:
  - name: logo.png
    contentType: image/png
    comment: project logo
"#,
        );

        let from_xml = read_manifest(&xml).unwrap();
        let from_yaml = read_manifest(&yaml).unwrap();
        assert_eq!(from_xml, from_yaml);
        assert_eq!(from_xml.children.len(), 1);
        assert_eq!(from_xml.children[0].name, "Guide");
        assert_eq!(
            from_xml.attachments[0].attribute("contentType"),
            Some("image/png")
        );
    }
}
