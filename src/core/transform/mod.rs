//! Record transformation
//!
//! Turns a database record into the pieces of an exported file:
//!
//! - [`fields`] - Typed property values to frontmatter values
//! - [`slug`] - File name derivation

pub mod fields;
pub mod slug;

pub use fields::{build_frontmatter, map_property, read_title, EMPTY_VALUE};
pub use slug::{resolve_slug, slugify};
