//! Export coordinator - main orchestrator for the export process
//!
//! This module drives the per-record pipeline: freeze check, frontmatter,
//! title and slug, body conversion, output routing and the file write.
//! Records are transformed one after another; writes run concurrently and are
//! all awaited before the summary is returned.

use crate::adapters::markdown::{MarkdownConverter, NotionMarkdown};
use crate::adapters::notion::{NotionClient, PageSource};
use crate::config::ExporterConfig;
use crate::core::export::summary::{ExportFailure, ExportStage, ExportSummary};
use crate::core::output::{ensure_base_dir, join_within, resolve_output_dir, target_dir};
use crate::core::transform::{build_frontmatter, read_title, resolve_slug};
use crate::domain::{DatabaseId, ExportError, ExportedFile, N2mdError, Page, PropertyValue, Result};
use crate::{log_export_complete, log_export_start};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Export coordinator
pub struct ExportCoordinator {
    config: ExporterConfig,
    source: Arc<dyn PageSource>,
    converter: Arc<dyn MarkdownConverter>,
    shutdown_signal: watch::Receiver<bool>,
}

/// A rendered record, ready to be written
struct RenderedPage {
    slug: String,
    file: ExportedFile,
}

impl ExportCoordinator {
    /// Create a coordinator with explicit collaborators
    pub fn new(
        config: ExporterConfig,
        source: Arc<dyn PageSource>,
        converter: Arc<dyn MarkdownConverter>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            source,
            converter,
            shutdown_signal,
        }
    }

    /// Create a coordinator backed by the Notion API
    ///
    /// # Errors
    ///
    /// Returns an error if the Notion client cannot be built.
    pub fn from_config(
        config: ExporterConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let client = NotionClient::new(config.notion.clone())?;
        Ok(Self::new(
            config,
            Arc::new(client),
            Arc::new(NotionMarkdown),
            shutdown_signal,
        ))
    }

    /// Execute the export
    ///
    /// Fetches every record of the database and exports them one by one.
    /// Failures of single records are collected in the summary; only
    /// configuration problems, the base directory and the initial query are
    /// fatal.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let dry_run = self.config.is_dry_run();
        let mut summary = ExportSummary {
            dry_run,
            ..ExportSummary::default()
        };

        let database_id = DatabaseId::new(self.config.notion.database_id.as_str())
            .map_err(N2mdError::Configuration)?;
        let base_dir = PathBuf::from(&self.config.export.output_dir);
        log_export_start!(database_id, base_dir.display());

        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
        } else {
            ensure_base_dir(&base_dir).await?;
        }

        let pages = self.source.query_database(&database_id).await?;
        summary.total_pages = pages.len();

        match &self.config.export.frontmatter_columns {
            Some(columns) => tracing::info!(columns = ?columns, "Using configured frontmatter columns"),
            None => tracing::info!("Using all properties of each record as frontmatter"),
        }

        let mut writes = JoinSet::new();

        for page in &pages {
            if *self.shutdown_signal.borrow() {
                tracing::warn!(
                    remaining = pages.len() - summary.processed() - writes.len(),
                    "Shutdown requested, not starting further records"
                );
                summary.interrupted = true;
                break;
            }

            match self.render_page(page, &base_dir, dry_run).await {
                Ok(None) => {
                    tracing::info!(page_id = %page.id, "Skipping frozen page");
                    summary.record_skipped();
                }
                Ok(Some(rendered)) if dry_run => {
                    tracing::info!(
                        page_id = %page.id,
                        slug = %rendered.slug,
                        path = %rendered.file.path.display(),
                        "Dry run: would write page"
                    );
                    summary.record_written(rendered.file.path);
                }
                Ok(Some(rendered)) => {
                    tracing::debug!(
                        page_id = %page.id,
                        slug = %rendered.slug,
                        "Scheduling page write"
                    );
                    writes.spawn(write_page(page.id.to_string(), rendered));
                }
                Err(failure) => {
                    tracing::error!(
                        page_id = %failure.page_id,
                        stage = %failure.stage,
                        error = %failure.message,
                        "Failed to export page"
                    );
                    summary.add_failure(failure);

                    if self.config.export.fail_fast {
                        tracing::warn!("fail_fast is enabled, not starting further records");
                        summary.aborted = true;
                        break;
                    }
                }
            }
        }

        while let Some(joined) = writes.join_next().await {
            match joined {
                Ok(Ok(path)) => {
                    tracing::info!(path = %path.display(), "Wrote page");
                    summary.record_written(path);
                }
                Ok(Err(failure)) => {
                    tracing::error!(
                        page_id = %failure.page_id,
                        error = %failure.message,
                        "Failed to write page"
                    );
                    summary.add_failure(failure);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Write task did not complete");
                    summary.add_failure(ExportFailure::new(
                        "unknown",
                        ExportStage::Write,
                        format!("write task did not complete: {e}"),
                    ));
                }
            }
        }

        summary.written_files.sort();
        let summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(summary.exported, summary.duration);
        summary.log_summary();

        Ok(summary)
    }

    /// Run the pipeline for one record up to (not including) the write
    ///
    /// Returns `Ok(None)` for frozen records.
    async fn render_page(
        &self,
        page: &Page,
        base_dir: &Path,
        dry_run: bool,
    ) -> std::result::Result<Option<RenderedPage>, ExportFailure> {
        let page_id = page.id.to_string();
        let fail = |stage: ExportStage, message: String| {
            ExportFailure::new(page_id.clone(), stage, message)
        };

        if self
            .is_frozen(page)
            .map_err(|e| fail(ExportStage::Freeze, e.to_string()))?
        {
            return Ok(None);
        }

        let export = &self.config.export;
        let frontmatter = build_frontmatter(page, export.frontmatter_columns.as_deref())
            .map_err(|e| fail(ExportStage::Frontmatter, e.to_string()))?;
        let title =
            read_title(page, &export.title_column).map_err(|e| fail(ExportStage::Title, e.to_string()))?;
        let slug = resolve_slug(&frontmatter, title);

        tracing::debug!(page_id = %page.id, title = %title, slug = %slug, "Exporting page");

        let blocks = self
            .source
            .fetch_blocks(&page.id)
            .await
            .map_err(|e| fail(ExportStage::Content, e.to_string()).with_slug(slug.as_str()))?;
        let body = self.converter.convert(&blocks);

        let dir = if dry_run {
            target_dir(base_dir, &export.language, page)
        } else {
            resolve_output_dir(base_dir, &export.language, page)
                .await
                .map_err(|e| fail(ExportStage::Output, e.to_string()).with_slug(slug.as_str()))?
        };

        let path = join_within(&dir, &format!("{slug}.md"));
        Ok(Some(RenderedPage {
            file: ExportedFile::new(path, &frontmatter, &body),
            slug,
        }))
    }

    fn is_frozen(&self, page: &Page) -> std::result::Result<bool, ExportError> {
        let freeze = &self.config.export.freeze;
        let Some(column) = freeze.column.as_deref().filter(|_| freeze.enabled) else {
            return Ok(false);
        };

        match page.property(column) {
            Some(PropertyValue::Checkbox(frozen)) => Ok(*frozen),
            Some(other) => Err(ExportError::FreezeColumnNotCheckbox {
                page_id: page.id.to_string(),
                column: column.to_string(),
                kind: other.kind().to_string(),
            }),
            None => Err(ExportError::ColumnNotFound {
                page_id: page.id.to_string(),
                column: column.to_string(),
            }),
        }
    }
}

async fn write_page(
    page_id: String,
    rendered: RenderedPage,
) -> std::result::Result<PathBuf, ExportFailure> {
    let RenderedPage { slug, file } = rendered;
    let written = async {
        // Slugs containing `/` name a subdirectory of the output directory
        if let Some(parent) = file.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file.path, file.content.as_bytes()).await
    };
    match written.await {
        Ok(()) => Ok(file.path),
        Err(e) => Err(ExportFailure::new(
            page_id,
            ExportStage::Write,
            format!("{}: {e}", file.path.display()),
        )
        .with_slug(slug)),
    }
}
