//! Domain models and types for n2md.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DatabaseId`], [`PageId`])
//! - **Records** ([`Page`], [`PropertyValue`]) and page bodies ([`Block`])
//! - **Output documents** ([`FrontmatterDocument`], [`ExportedFile`])
//! - **Error types** ([`N2mdError`], [`NotionError`], [`ExportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use n2md::domain::{Page, PageId, PropertyValue, RichText};
//!
//! let page = Page::new(PageId::new("page-1").unwrap())
//!     .with_property("title", PropertyValue::Title(vec![RichText::plain("Hello")]));
//! assert_eq!(page.title("title"), Some("Hello"));
//! ```

pub mod block;
pub mod errors;
pub mod frontmatter;
pub mod ids;
pub mod page;
pub mod result;

// Re-export commonly used types for convenience
pub use block::{Block, BlockContent};
pub use errors::{ExportError, N2mdError, NotionError};
pub use frontmatter::{ExportedFile, FrontmatterDocument, FrontmatterValue};
pub use ids::{DatabaseId, PageId};
pub use page::{Annotations, DateRange, Page, Property, PropertyValue, RichText, SelectOption};
pub use result::Result;
