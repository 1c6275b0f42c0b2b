//! Error types for manifest parsing.

use std::path::PathBuf;

/// Error while reading or parsing a site manifest.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("cannot read manifest {}", .path.display())]
    Io {
        /// Path of the manifest file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML.
    #[error("XML parse error")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Malformed YAML.
    #[error("YAML parse error")]
    Yaml(#[from] serde_yaml::Error),

    /// A manifest element lacks an attribute the site tree requires.
    #[error("manifest element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element the attribute is missing from.
        element: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// The manifest contains no root page element.
    #[error("manifest has no root page element")]
    MissingRoot,

    /// The manifest ended inside an open element.
    #[error("unexpected end of manifest")]
    UnexpectedEof,

    /// The manifest file extension maps to no known format.
    #[error("unsupported manifest format: '{0}'")]
    UnsupportedFormat(String),
}
