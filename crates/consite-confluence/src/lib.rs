//! Confluence content service: backend-agnostic contract plus the REST
//! client implementing it.

mod client;
mod error;
mod service;
mod types;

pub use client::RestClient;
pub use error::ConfluenceError;
pub use service::ConfluenceService;
pub use types::{Attachment, ContentStorage, Page, PageSummary, Representation};
