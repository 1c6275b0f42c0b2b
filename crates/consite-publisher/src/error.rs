//! Error types for site publishing.

use std::path::PathBuf;

use consite_confluence::ConfluenceError;

/// Error during a publish or delete run.
///
/// The first error aborts the remainder of the run; pages already written
/// stay in place.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PublishError {
    /// A remote operation failed.
    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    /// A node's content file could not be read.
    #[error("cannot read content file {}", .path.display())]
    ContentFile {
        /// Resolved path of the missing or unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A parent page was still transient when a descendant needed its id.
    #[error("page '{title}' has no identifier yet")]
    MissingPageId {
        /// Title of the transient page.
        title: String,
    },
}
