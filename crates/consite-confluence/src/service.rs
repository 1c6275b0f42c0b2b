//! Backend-agnostic content service contract.

use async_trait::async_trait;

use crate::error::ConfluenceError;
use crate::types::{Attachment, ContentStorage, Page, PageSummary};

/// Operations the synchronization engine needs from a Confluence backend.
///
/// Implementations perform the remote calls; the caller supplies ordering.
#[async_trait]
pub trait ConfluenceService: Send + Sync {
    /// Find a page by space and title. Fails if no page matches.
    async fn get_page(&self, space_key: &str, title: &str) -> Result<Page, ConfluenceError>;

    /// Find a direct child of `parent_id` by title.
    ///
    /// `Ok(None)` means the title does not exist under that parent;
    /// callers use it to drive create-on-miss. Transport failures stay
    /// errors and must not be mistaken for a missing page.
    async fn get_page_by_title(
        &self,
        parent_id: &str,
        title: &str,
    ) -> Result<Option<PageSummary>, ConfluenceError>;

    /// Fetch a page by id, including its current version.
    async fn get_page_by_id(&self, page_id: &str) -> Result<Page, ConfluenceError>;

    /// Flat listing of every page below `page_id`.
    async fn get_descendants(&self, page_id: &str) -> Result<Vec<PageSummary>, ConfluenceError>;

    /// Create a page. The input must not carry an id.
    async fn add_page(&self, page: Page) -> Result<Page, ConfluenceError>;

    /// Overwrite the body of an existing page, incrementing its version.
    async fn store_page_content(
        &self,
        page: Page,
        content: ContentStorage,
    ) -> Result<Page, ConfluenceError>;

    /// Remove a single page by id.
    async fn remove_page_by_id(&self, page_id: &str) -> Result<bool, ConfluenceError>;

    /// Apply labels to a page. Returns `false` when `labels` is empty.
    async fn add_labels_by_name(
        &self,
        page: &Page,
        labels: &[&str],
    ) -> Result<bool, ConfluenceError>;

    /// Find an attachment on a page by file name.
    async fn get_attachment(
        &self,
        page_id: &str,
        file_name: &str,
    ) -> Result<Option<Attachment>, ConfluenceError>;

    /// Upload attachment bytes. An id on `attachment` versions the existing
    /// file instead of duplicating it.
    async fn add_attachment(
        &self,
        page: &Page,
        attachment: &Attachment,
        data: Vec<u8>,
    ) -> Result<Attachment, ConfluenceError>;

    /// Release any session held by the backend.
    async fn close(&self) -> Result<bool, ConfluenceError>;
}
