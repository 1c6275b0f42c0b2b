//! Attachment type.

/// A binary asset attached to exactly one page.
///
/// Uploading with an `id` set records a new version of the existing
/// attachment instead of creating a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    /// Identifier of an attachment that already exists under the page.
    pub id: Option<String>,
    /// File name, unique per page.
    pub file_name: String,
    /// Upload comment shown in the attachment history.
    pub comment: Option<String>,
    /// MIME type; the backend sniffs one when absent.
    pub content_type: Option<String>,
}
