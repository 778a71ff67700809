//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of records returned by the database query
    pub total_pages: usize,

    /// Files written (or, in dry-run mode, that would have been written)
    pub exported: usize,

    /// Records skipped because they are frozen
    pub skipped: usize,

    /// Records that failed at any stage
    pub failed: usize,

    /// Paths of written files, sorted
    pub written_files: Vec<PathBuf>,

    pub dry_run: bool,

    /// Stopped early by a shutdown signal
    pub interrupted: bool,

    /// Stopped early after a failure with `fail_fast` enabled
    pub aborted: bool,

    pub duration: Duration,

    pub failures: Vec<ExportFailure>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a written file
    pub fn record_written(&mut self, path: PathBuf) {
        self.exported += 1;
        self.written_files.push(path);
    }

    /// Record a frozen record
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Record a failed record
    pub fn add_failure(&mut self, failure: ExportFailure) {
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Records that reached a final state
    pub fn processed(&self) -> usize {
        self.exported + self.skipped + self.failed
    }

    /// Check if the export was successful (no failures, not cut short)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && !self.interrupted && !self.aborted
    }

    /// Share of processed, non-skipped records that were exported
    pub fn success_rate(&self) -> f64 {
        let attempted = self.exported + self.failed;
        if attempted == 0 {
            return 100.0;
        }
        (self.exported as f64 / attempted as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total_pages,
            exported = self.exported,
            skipped = self.skipped,
            failed = self.failed,
            dry_run = self.dry_run,
            interrupted = self.interrupted,
            aborted = self.aborted,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export summary"
        );

        for failure in &self.failures {
            tracing::warn!(
                page_id = %failure.page_id,
                slug = failure.slug.as_deref().unwrap_or(""),
                stage = %failure.stage,
                error = %failure.message,
                "Page export failed"
            );
        }
    }
}

/// Step of the per-record pipeline at which a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    /// Freeze column lookup
    Freeze,
    /// Frontmatter mapping
    Frontmatter,
    /// Title lookup
    Title,
    /// Body fetch
    Content,
    /// Output directory resolution
    Output,
    /// File write
    Write,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportStage::Freeze => "freeze",
            ExportStage::Frontmatter => "frontmatter",
            ExportStage::Title => "title",
            ExportStage::Content => "content",
            ExportStage::Output => "output",
            ExportStage::Write => "write",
        };
        f.write_str(name)
    }
}

/// A record that could not be exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub page_id: String,

    /// Slug, when the failure happened after it was resolved
    pub slug: Option<String>,

    pub stage: ExportStage,

    pub message: String,
}

impl ExportFailure {
    /// Create a new export failure
    pub fn new(page_id: impl Into<String>, stage: ExportStage, message: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            slug: None,
            stage,
            message: message.into(),
        }
    }

    /// Attach the slug of the record
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slug {
            Some(slug) => write!(
                f,
                "{} ({slug}) [{}]: {}",
                self.page_id, self.stage, self.message
            ),
            None => write!(f, "{} [{}]: {}", self.page_id, self.stage, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.total_pages, 0);
        assert_eq!(summary.exported, 0);
        assert_eq!(summary.failed, 0);
        assert!(summary.is_successful());
        assert_eq!(summary.success_rate(), 100.0);
    }

    #[test]
    fn test_counters() {
        let mut summary = ExportSummary::new();
        summary.total_pages = 4;
        summary.record_written(PathBuf::from("out/a.md"));
        summary.record_written(PathBuf::from("out/b.md"));
        summary.record_skipped();
        summary.add_failure(ExportFailure::new("p4", ExportStage::Title, "no title"));

        assert_eq!(summary.exported, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed(), 4);
        assert!(!summary.is_successful());
        assert!((summary.success_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_interrupted_is_not_successful() {
        let summary = ExportSummary {
            interrupted: true,
            ..ExportSummary::default()
        };
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(3));
        assert_eq!(summary.duration, Duration::from_secs(3));
    }

    #[test]
    fn test_failure_display() {
        let failure = ExportFailure::new("p1", ExportStage::Write, "disk full").with_slug("hello");
        assert_eq!(failure.to_string(), "p1 (hello) [write]: disk full");

        let failure = ExportFailure::new("p2", ExportStage::Frontmatter, "column missing");
        assert_eq!(failure.to_string(), "p2 [frontmatter]: column missing");
    }
}
