//! Export orchestration
//!
//! This module provides the core export logic for n2md:
//! - Export coordination over a [`PageSource`](crate::adapters::notion::PageSource)
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportFailure, ExportStage, ExportSummary};
