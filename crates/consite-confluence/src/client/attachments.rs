//! Attachment operations for the REST client.

use reqwest::multipart::{Form, Part};
use tracing::info;

use super::RestClient;
use super::wire::{AttachmentResults, RemoteAttachment};
use crate::error::ConfluenceError;
use crate::types::{Attachment, Page};

impl RestClient {
    /// Find an attachment by file name; `None` when the page has no
    /// attachment with that name.
    pub(crate) async fn find_attachment(
        &self,
        page_id: &str,
        file_name: &str,
    ) -> Result<Option<Attachment>, ConfluenceError> {
        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);

        let listing: AttachmentResults = self.get_json(&url, &[("filename", file_name)]).await?;
        Ok(listing
            .results
            .into_iter()
            .next()
            .map(RemoteAttachment::into_attachment))
    }

    /// Upload attachment bytes (upsert by id).
    pub(crate) async fn upload_attachment(
        &self,
        page: &Page,
        attachment: &Attachment,
        data: Vec<u8>,
    ) -> Result<Attachment, ConfluenceError> {
        let Some(page_id) = page.id.as_deref() else {
            return Err(ConfluenceError::MissingPageId {
                title: page.title.clone(),
            });
        };

        // Posting against an existing id records a new version instead of a
        // duplicate.
        let url = if let Some(attachment_id) = &attachment.id {
            info!(
                "Updating existing attachment '{}' (id={})",
                attachment.file_name, attachment_id
            );
            format!(
                "{}/content/{}/child/attachment/{}/data",
                self.api_url(),
                page_id,
                attachment_id
            )
        } else {
            info!(
                "Uploading new attachment '{}' to page {}",
                attachment.file_name, page_id
            );
            format!("{}/content/{}/child/attachment", self.api_url(), page_id)
        };

        let mut part = Part::bytes(data).file_name(attachment.file_name.clone());
        if let Some(content_type) = &attachment.content_type {
            part = part.mime_str(content_type)?;
        }
        let mut form = Form::new().part("file", part);
        if let Some(comment) = &attachment.comment {
            form = form.text("comment", comment.clone());
        }

        let response = self
            .authorized(self.http.post(&url))
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await?;
        let response = Self::check(response).await?;

        // New uploads answer with a result list, updates with a single
        // object.
        if attachment.id.is_some() {
            Ok(response
                .json::<RemoteAttachment>()
                .await?
                .into_attachment())
        } else {
            let listing: AttachmentResults = response.json().await?;
            listing
                .results
                .into_iter()
                .next()
                .map(RemoteAttachment::into_attachment)
                .ok_or_else(|| {
                    ConfluenceError::InvalidResponse("empty attachment response".to_owned())
                })
        }
    }

    /// Fetch raw page source through the export actions outside the REST
    /// prefix. `wiki` selects the legacy wiki source action instead of
    /// storage format.
    pub async fn download_page_source(
        &self,
        page_id: &str,
        wiki: bool,
    ) -> Result<String, ConfluenceError> {
        let action = if wiki {
            "pages/viewpagesrc.action"
        } else {
            "plugins/viewstorage/viewpagestorage.action"
        };
        let url = format!("{}/{}", self.base_url, action);

        info!("Downloading page {} source ({})", page_id, action);

        let response = self
            .authorized(self.http.get(&url).query(&[("pageId", page_id)]))
            .send()
            .await?;
        Ok(Self::check(response).await?.text().await?)
    }
}
