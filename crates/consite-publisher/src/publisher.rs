//! Depth-first site reconciliation against a Confluence space.

use std::path::PathBuf;

use futures::FutureExt;
use futures::future::{BoxFuture, try_join, try_join_all};
use tracing::{debug, info};

use consite_confluence::{Attachment, ConfluenceService, ContentStorage, Page};
use consite_manifest::SiteNode;
use consite_markup::markdown_to_wiki;

use crate::error::PublishError;

/// Publishes a manifest tree under an anchor page of one space.
///
/// All remote calls go through the borrowed [`ConfluenceService`]; the
/// publisher owns ordering, not transport. Within one page, attachment
/// uploads and label adds run concurrently with each other; everything else
/// is sequential. Sibling pages are reconciled one at a time because the
/// lookup-then-create resolution is not atomic on the remote side.
pub struct SitePublisher<'a> {
    service: &'a dyn ConfluenceService,
    space_key: String,
    parent_title: String,
    site_dir: PathBuf,
}

impl<'a> SitePublisher<'a> {
    /// Create a publisher for one space and anchor page.
    ///
    /// `site_dir` is the directory content file uris resolve against,
    /// normally the manifest's directory.
    pub fn new(
        service: &'a dyn ConfluenceService,
        space_key: impl Into<String>,
        parent_title: impl Into<String>,
        site_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            service,
            space_key: space_key.into(),
            parent_title: parent_title.into(),
            site_dir: site_dir.into(),
        }
    }

    /// Publish the tree rooted at `root` under the anchor page.
    ///
    /// Every page is overwritten unconditionally; a run that changes nothing
    /// locally still bumps each page's version once.
    pub async fn synchronize(&self, root: &SiteNode) -> Result<(), PublishError> {
        let anchor = self
            .service
            .get_page(&self.space_key, &self.parent_title)
            .await?;

        info!(
            space = %self.space_key,
            anchor = %anchor.title,
            root = %root.name,
            "publishing site"
        );

        self.reconcile(root, &anchor).await
    }

    /// Remove the previously published subtree rooted at `root`'s remote
    /// counterpart. Returns the number of pages removed (descendants plus
    /// the root page itself).
    pub async fn delete_subtree(&self, root: &SiteNode) -> Result<usize, PublishError> {
        let anchor = self
            .service
            .get_page(&self.space_key, &self.parent_title)
            .await?;
        let anchor_id = page_id(&anchor)?;

        let Some(home) = self.service.get_page_by_title(anchor_id, &root.name).await? else {
            info!(title = %root.name, "site root page not found, nothing to remove");
            return Ok(0);
        };

        let descendants = self.service.get_descendants(&home.id).await?;

        let mut removed = 0;
        for summary in &descendants {
            self.service.remove_page_by_id(&summary.id).await?;
            info!(title = %summary.title, "page removed");
            removed += 1;
        }

        self.service.remove_page_by_id(&home.id).await?;
        info!(title = %home.title, "page removed");

        Ok(removed + 1)
    }

    /// Reconcile one node and, recursively, its subtree.
    ///
    /// The recursion is boxed so sibling order stays an explicit
    /// await-in-loop; a child subtree completes before the next sibling
    /// starts.
    fn reconcile<'b>(
        &'b self,
        node: &'b SiteNode,
        parent: &'b Page,
    ) -> BoxFuture<'b, Result<(), PublishError>> {
        async move {
            let page = self.get_or_create(parent, &node.name).await?;
            let storage = self.read_content(node).await?;
            let page = self.store_content(page, storage).await?;

            // Attachments and labels of this page are independent of each
            // other; both finish before any descendant is touched.
            let attachments = try_join_all(
                node.attachments
                    .iter()
                    .map(|attachment| self.upload_attachment(&page, attachment)),
            );
            let labels = try_join_all(node.labels.iter().map(|label| self.add_label(&page, label)));
            try_join(attachments, labels).await?;

            for child in &node.children {
                self.reconcile(child, &page).await?;
            }

            Ok(())
        }
        .boxed()
    }

    /// Resolve a page by title under `parent`, or construct a transient
    /// value for it.
    ///
    /// Only a lookup that genuinely finds nothing selects the create path;
    /// transport failures propagate rather than masquerade as a missing
    /// page.
    async fn get_or_create(&self, parent: &Page, title: &str) -> Result<Page, PublishError> {
        match self.service.get_page_by_title(page_id(parent)?, title).await? {
            Some(summary) => Ok(self.service.get_page_by_id(&summary.id).await?),
            None => {
                debug!(title, parent = %parent.title, "page not found, will create");
                Ok(Page::child_of(parent, title))
            }
        }
    }

    /// Store `storage` as the page body, creating the page first when it is
    /// still transient. The content store bumps the remote version.
    async fn store_content(
        &self,
        page: Page,
        storage: ContentStorage,
    ) -> Result<Page, PublishError> {
        let page = if page.id.is_none() {
            info!(title = %page.title, "creating page");
            self.service.add_page(page).await?
        } else {
            info!(title = %page.title, version = page.version, "updating page");
            page
        };
        Ok(self.service.store_page_content(page, storage).await?)
    }

    /// Read and convert the node's source file.
    ///
    /// Markdown converts to wiki markup; anything else passes through
    /// unchanged. A node with neither `uri` nor a file named after it fails
    /// here, not at parse time.
    async fn read_content(&self, node: &SiteNode) -> Result<ContentStorage, PublishError> {
        let path = self.site_dir.join(node.source_path());
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| PublishError::ContentFile {
                path: path.clone(),
                source,
            })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let storage = match path.extension().and_then(|ext| ext.to_str()) {
            Some("md") => ContentStorage::wiki(markdown_to_wiki(&text)),
            _ => ContentStorage::wiki(text),
        };
        Ok(storage)
    }

    /// Upload one attachment, reusing the id of an existing attachment with
    /// the same file name so the backend records a new version of it.
    async fn upload_attachment(&self, page: &Page, node: &SiteNode) -> Result<(), PublishError> {
        let mut attachment = Attachment {
            id: None,
            file_name: node.name.clone(),
            comment: node.attribute("comment").map(str::to_owned),
            content_type: node.attribute("contentType").map(str::to_owned),
        };

        if let Some(existing) = self
            .service
            .get_attachment(page_id(page)?, &attachment.file_name)
            .await?
        {
            attachment.id = existing.id;
        }

        let path = self.site_dir.join(node.source_path());
        let data = tokio::fs::read(&path)
            .await
            .map_err(|source| PublishError::ContentFile {
                path: path.clone(),
                source,
            })?;

        info!(file = %attachment.file_name, page = %page.title, "uploading attachment");
        self.service.add_attachment(page, &attachment, data).await?;
        Ok(())
    }

    async fn add_label(&self, page: &Page, label: &str) -> Result<(), PublishError> {
        self.service.add_labels_by_name(page, &[label]).await?;
        Ok(())
    }
}

/// The page's id, which every remote child operation needs.
fn page_id(page: &Page) -> Result<&str, PublishError> {
    page.id.as_deref().ok_or_else(|| PublishError::MissingPageId {
        title: page.title.clone(),
    })
}
