//! Page source trait
//!
//! The export pipeline reads records and page bodies through [`PageSource`],
//! so it can run against the live API or an in-memory fixture.

use crate::domain::{Block, DatabaseId, Page, PageId, Result};
use async_trait::async_trait;

/// Read access to a Notion database and the bodies of its pages
///
/// # Example
///
/// ```no_run
/// use n2md::adapters::notion::{NotionClient, PageSource};
/// use n2md::config::NotionConfig;
/// use n2md::domain::DatabaseId;
///
/// # async fn example() -> n2md::domain::Result<()> {
/// let client = NotionClient::new(NotionConfig::default())?;
/// let database_id = DatabaseId::new("668d797c76fa49349b05ad288df2d136").unwrap();
///
/// for page in client.query_database(&database_id).await? {
///     let blocks = client.fetch_blocks(&page.id).await?;
///     println!("{} has {} top-level blocks", page.id, blocks.len());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Every record of the database, following pagination to the end
    async fn query_database(&self, database_id: &DatabaseId) -> Result<Vec<Page>>;

    /// The block tree of a page body, children already attached
    async fn fetch_blocks(&self, page_id: &PageId) -> Result<Vec<Block>>;
}
