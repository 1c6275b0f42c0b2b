//! Site synchronization engine.
//!
//! Walks a parsed site manifest depth-first and drives a
//! [`ConfluenceService`](consite_confluence::ConfluenceService) so the
//! remote page tree mirrors the local declaration: pages are created or
//! overwritten, attachments uploaded and labels applied, in a strictly
//! defined order.

mod error;
mod publisher;


pub use error::PublishError;
pub use publisher::SitePublisher;
