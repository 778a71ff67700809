//! Core business logic for n2md.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration and summary
//! - [`transform`] - Frontmatter mapping and slug resolution
//! - [`output`] - Output directory routing
//!
//! # Export Workflow
//!
//! 1. **Query**: Fetch every record of the Notion database
//! 2. **Freeze**: Skip records whose freeze checkbox is set (optional)
//! 3. **Transform**: Map properties to frontmatter, derive the slug
//! 4. **Convert**: Fetch the page body and render it as Markdown
//! 5. **Route**: Pick the output directory, per language if enabled
//! 6. **Write**: Write `<slug>.md` files concurrently and await them all
//! 7. **Report**: Produce an export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use n2md::config::load_config;
//! use n2md::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration
//! let config = load_config(None)?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! // Create export coordinator
//! let coordinator = ExportCoordinator::from_config(config, shutdown_rx)?;
//!
//! // Execute export
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Total: {}", summary.total_pages);
//! println!("Exported: {}", summary.exported);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod output;
pub mod transform;
