//! Adapters for external systems
//!
//! - [`notion`] - Notion REST API client and the [`notion::PageSource`] trait
//! - [`markdown`] - Page body to Markdown conversion

pub mod markdown;
pub mod notion;
