// n2md - Notion database to Markdown exporter
// Copyright (c) 2025 n2md Contributors
// Licensed under the MIT License

//! # n2md - Notion database to Markdown
//!
//! n2md exports every page of a Notion database as a Markdown file with a
//! YAML-like frontmatter block, ready for static site generators.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** database records and page bodies from the Notion REST API
//! - **Mapping** typed properties into frontmatter values
//! - **Converting** page bodies to Markdown
//! - **Writing** one `<slug>.md` per page, optionally split by language
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, transform, output routing)
//! - [`adapters`] - External integrations (Notion API, Markdown rendering)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use n2md::config::load_config;
//! use n2md::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration (n2md.toml if present, then environment)
//!     let config = load_config(None)?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = ExportCoordinator::from_config(config, shutdown_rx)?;
//!
//!     let summary = coordinator.execute_export().await?;
//!     println!("Exported {} pages", summary.exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Frontmatter
//!
//! Property values are mapped by type. Unset values are written as `""`
//! (unset numbers as `null`):
//!
//! ```rust
//! use n2md::core::transform::build_frontmatter;
//! use n2md::domain::{Page, PageId, PropertyValue, RichText, SelectOption};
//!
//! let page = Page::new(PageId::new("page-1").unwrap())
//!     .with_property("title", PropertyValue::Title(vec![RichText::plain("Hello World")]))
//!     .with_property("Tags", PropertyValue::MultiSelect(vec![SelectOption::new("rust")]))
//!     .with_property("Category", PropertyValue::Select(None));
//!
//! let frontmatter = build_frontmatter(&page, None).unwrap();
//! assert_eq!(
//!     frontmatter.render(),
//!     "---\ntitle: Hello World\nTags: [rust]\nCategory: \"\"\n---\n"
//! );
//! ```
//!
//! ## Error Handling
//!
//! The library uses [`domain::N2mdError`] for all errors. Failures of single
//! pages are collected in the export summary instead of aborting the run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
