//! Wire-format structs for the REST API.
//!
//! Only the fields the client reads are declared; serde skips the rest of
//! the API response.

use serde::Deserialize;

use crate::types::{Attachment, Page, PageSummary};

#[derive(Debug, Deserialize)]
pub(crate) struct RemotePage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub version: Option<RemoteVersion>,
    #[serde(default)]
    pub space: Option<RemoteSpace>,
    #[serde(default)]
    pub ancestors: Vec<RemoteRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteVersion {
    pub number: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteSpace {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageResults {
    #[serde(default)]
    pub results: Vec<RemotePage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteAttachment {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttachmentResults {
    #[serde(default)]
    pub results: Vec<RemoteAttachment>,
}

impl RemotePage {
    /// Map the wire shape onto the domain page. `fallback_space` covers
    /// responses where the space was not expanded.
    pub(crate) fn into_page(mut self, fallback_space: &str) -> Page {
        Page {
            parent_id: self.ancestors.pop().map(|ancestor| ancestor.id),
            id: Some(self.id),
            space_key: self
                .space
                .map_or_else(|| fallback_space.to_owned(), |space| space.key),
            title: self.title,
            version: self.version.map_or(1, |version| version.number),
        }
    }

    pub(crate) fn into_summary(self) -> PageSummary {
        PageSummary {
            id: self.id,
            title: self.title,
        }
    }
}

impl RemoteAttachment {
    pub(crate) fn into_attachment(self) -> Attachment {
        Attachment {
            id: Some(self.id),
            file_name: self.title,
            comment: None,
            content_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_response_maps_to_domain_page() {
        let raw = r#"{
            "id": "123",
            "type": "page",
            "title": "Home",
            "version": {"number": 7},
            "space": {"key": "DOCS"},
            "ancestors": [{"id": "1"}, {"id": "42"}]
        }"#;
        let page: RemotePage = serde_json::from_str(raw).unwrap();
        let page = page.into_page("FALLBACK");

        assert_eq!(page.id.as_deref(), Some("123"));
        assert_eq!(page.title, "Home");
        assert_eq!(page.space_key, "DOCS");
        // The direct parent is the last ancestor.
        assert_eq!(page.parent_id.as_deref(), Some("42"));
        assert_eq!(page.version, 7);
    }

    #[test]
    fn sparse_response_falls_back() {
        let page: RemotePage = serde_json::from_str(r#"{"id": "9", "title": "New"}"#).unwrap();
        let page = page.into_page("DOCS");

        assert_eq!(page.space_key, "DOCS");
        assert_eq!(page.parent_id, None);
        assert_eq!(page.version, 1);
    }

    #[test]
    fn listing_without_results_is_empty() {
        let listing: PageResults = serde_json::from_str("{}").unwrap();
        assert!(listing.results.is_empty());
    }
}
