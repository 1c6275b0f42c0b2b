//! Confluence REST API client.
//!
//! Async HTTP client for the Confluence Server/Data Center REST API with
//! basic authentication.

mod attachments;
mod pages;
mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ConfluenceError;
use crate::service::ConfluenceService;
use crate::types::{Attachment, ContentStorage, Page, PageSummary};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Fields expanded on every page fetch.
const EXPAND: &str = "space,version,ancestors";

/// Upper bound on listing sizes; published trees stay well below it.
const RESULT_LIMIT: u32 = 1000;

/// Confluence REST API client.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl RestClient {
    /// Create a client from config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ConfluenceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// The REST API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }

    /// Fail on error statuses, preserving the response body for diagnosis.
    async fn check(response: Response) -> Result<Response, ConfluenceError> {
        let status = response.status().as_u16();
        if status >= 400 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse { status, body });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ConfluenceError> {
        let response = self
            .authorized(self.http.get(url).query(query))
            .header("Accept", "application/json")
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[async_trait]
impl ConfluenceService for RestClient {
    async fn get_page(&self, space_key: &str, title: &str) -> Result<Page, ConfluenceError> {
        self.find_page(space_key, title).await
    }

    async fn get_page_by_title(
        &self,
        parent_id: &str,
        title: &str,
    ) -> Result<Option<PageSummary>, ConfluenceError> {
        self.find_child_by_title(parent_id, title).await
    }

    async fn get_page_by_id(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        self.fetch_page(page_id).await
    }

    async fn get_descendants(&self, page_id: &str) -> Result<Vec<PageSummary>, ConfluenceError> {
        self.descendants(page_id).await
    }

    async fn add_page(&self, page: Page) -> Result<Page, ConfluenceError> {
        self.create_page(page).await
    }

    async fn store_page_content(
        &self,
        page: Page,
        content: ContentStorage,
    ) -> Result<Page, ConfluenceError> {
        self.update_page_content(page, content).await
    }

    async fn remove_page_by_id(&self, page_id: &str) -> Result<bool, ConfluenceError> {
        self.remove_page(page_id).await
    }

    async fn add_labels_by_name(
        &self,
        page: &Page,
        labels: &[&str],
    ) -> Result<bool, ConfluenceError> {
        self.add_labels(page, labels).await
    }

    async fn get_attachment(
        &self,
        page_id: &str,
        file_name: &str,
    ) -> Result<Option<Attachment>, ConfluenceError> {
        self.find_attachment(page_id, file_name).await
    }

    async fn add_attachment(
        &self,
        page: &Page,
        attachment: &Attachment,
        data: Vec<u8>,
    ) -> Result<Attachment, ConfluenceError> {
        self.upload_attachment(page, attachment, data).await
    }

    async fn close(&self) -> Result<bool, ConfluenceError> {
        // REST holds no session; the operation exists for session-oriented
        // transports.
        Ok(true)
    }
}
