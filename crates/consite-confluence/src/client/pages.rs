//! Page and label operations for the REST client.

use serde_json::json;
use tracing::info;

use super::wire::{PageResults, RemotePage};
use super::{EXPAND, RESULT_LIMIT, RestClient};
use crate::error::ConfluenceError;
use crate::types::{ContentStorage, Page, PageSummary};

impl RestClient {
    /// Find a page by space key and title.
    pub(crate) async fn find_page(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        info!("Looking up page '{}' in space {}", title, space_key);

        let listing: PageResults = self
            .get_json(
                &url,
                &[("spaceKey", space_key), ("title", title), ("expand", EXPAND)],
            )
            .await?;

        listing
            .results
            .into_iter()
            .next()
            .map(|page| page.into_page(space_key))
            .ok_or_else(|| ConfluenceError::PageNotFound {
                space_key: space_key.to_owned(),
                title: title.to_owned(),
            })
    }

    /// Find a direct child of `parent_id` by title; `None` when absent.
    pub(crate) async fn find_child_by_title(
        &self,
        parent_id: &str,
        title: &str,
    ) -> Result<Option<PageSummary>, ConfluenceError> {
        let url = format!("{}/content/{}/child/page", self.api_url(), parent_id);
        let limit = RESULT_LIMIT.to_string();

        let listing: PageResults = self.get_json(&url, &[("limit", &limit)]).await?;

        Ok(listing
            .results
            .into_iter()
            .find(|page| page.title == title)
            .map(RemotePage::into_summary))
    }

    /// Fetch a page by id with its current version.
    pub(crate) async fn fetch_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Getting page {}", page_id);

        let page: RemotePage = self.get_json(&url, &[("expand", EXPAND)]).await?;
        Ok(page.into_page(""))
    }

    /// Flat listing of all pages below `page_id`.
    pub(crate) async fn descendants(
        &self,
        page_id: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        let url = format!("{}/content/{}/descendant/page", self.api_url(), page_id);
        let limit = RESULT_LIMIT.to_string();

        let listing: PageResults = self.get_json(&url, &[("limit", &limit)]).await?;
        Ok(listing
            .results
            .into_iter()
            .map(RemotePage::into_summary)
            .collect())
    }

    /// Create a new page under the page's `parent_id`.
    pub(crate) async fn create_page(&self, page: Page) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        let mut payload = json!({
            "type": "page",
            "title": page.title.as_str(),
            "space": {"key": page.space_key.as_str()},
            "body": {"storage": {"value": "", "representation": "storage"}}
        });
        if let Some(parent_id) = &page.parent_id {
            payload["ancestors"] = json!([{"id": parent_id}]);
        }

        info!("Creating page '{}' in space {}", page.title, page.space_key);

        let response = self
            .authorized(self.http.post(&url).query(&[("expand", EXPAND)]))
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?;
        let created: RemotePage = Self::check(response).await?.json().await?;
        Ok(created.into_page(&page.space_key))
    }

    /// Overwrite a page's body, bumping its version by one.
    pub(crate) async fn update_page_content(
        &self,
        page: Page,
        content: ContentStorage,
    ) -> Result<Page, ConfluenceError> {
        let Some(page_id) = page.id.as_deref() else {
            return Err(ConfluenceError::MissingPageId { title: page.title });
        };
        let url = format!("{}/content/{}", self.api_url(), page_id);

        let representation = content.representation.as_str();
        let mut payload = json!({
            "type": "page",
            "title": page.title.as_str(),
            "version": {"number": page.version + 1},
            "body": {}
        });
        // The body is keyed by its representation (`storage` or `wiki`).
        payload["body"][representation] = json!({
            "value": content.value,
            "representation": representation
        });

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            page.version,
            page.version + 1
        );

        let response = self
            .authorized(self.http.put(&url).query(&[("expand", EXPAND)]))
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?;
        let updated: RemotePage = Self::check(response).await?.json().await?;
        Ok(updated.into_page(&page.space_key))
    }

    /// Remove a page by id.
    pub(crate) async fn remove_page(&self, page_id: &str) -> Result<bool, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Removing page {}", page_id);

        let response = self.authorized(self.http.delete(&url)).send().await?;
        Self::check(response).await?;
        Ok(true)
    }

    /// Apply global labels to a page.
    pub(crate) async fn add_labels(
        &self,
        page: &Page,
        labels: &[&str],
    ) -> Result<bool, ConfluenceError> {
        if labels.is_empty() {
            return Ok(false);
        }
        let Some(page_id) = page.id.as_deref() else {
            return Err(ConfluenceError::MissingPageId {
                title: page.title.clone(),
            });
        };
        let url = format!("{}/content/{}/label", self.api_url(), page_id);

        let payload: Vec<_> = labels
            .iter()
            .map(|label| json!({"prefix": "global", "name": label}))
            .collect();

        info!("Adding label(s) {:?} to page {}", labels, page_id);

        let response = self
            .authorized(self.http.post(&url))
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(true)
    }
}
