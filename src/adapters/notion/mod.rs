//! Notion API adapter
//!
//! This module provides the HTTP client for the Notion REST API, the raw API
//! models and the [`PageSource`] trait the export pipeline reads through.

pub mod client;
pub mod models;
pub mod source;

pub use client::NotionClient;
pub use models::{BlockObject, DatabaseObject, PageObject, PaginatedList, QueryRequest};
pub use source::PageSource;
