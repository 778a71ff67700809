//! Notion REST API client
//!
//! Wraps `reqwest` with the Notion authentication headers, cursor pagination,
//! status code mapping and retry with exponential backoff.

use super::models::{
    ApiErrorBody, BlockObject, DatabaseObject, PageObject, PaginatedList, QueryRequest,
};
use super::source::PageSource;
use crate::config::{NotionConfig, RetryConfig};
use crate::domain::{Block, DatabaseId, N2mdError, NotionError, Page, PageId, Result};
use crate::log_retry_attempt;
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

/// HTTP client for the Notion API
///
/// # Example
///
/// ```no_run
/// use n2md::adapters::notion::NotionClient;
/// use n2md::config::NotionConfig;
/// use n2md::domain::DatabaseId;
///
/// # async fn example() -> n2md::domain::Result<()> {
/// let client = NotionClient::new(NotionConfig::default())?;
/// let database = client
///     .retrieve_database(&DatabaseId::new("668d797c76fa49349b05ad288df2d136").unwrap())
///     .await?;
/// println!("{}", database.title_text());
/// # Ok(())
/// # }
/// ```
pub struct NotionClient {
    /// API root, always ending with a slash
    base_url: Url,

    client: Client,

    config: NotionConfig,
}

impl NotionClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: NotionConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            N2mdError::Configuration(format!(
                "Invalid Notion base URL '{}': {e}",
                config.base_url
            ))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("n2md/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                NotionError::ConnectionFailed(format!("Failed to build HTTP client: {e}"))
            })?;

        tracing::debug!(
            base_url = %base_url,
            notion_version = %config.notion_version,
            "Notion client created"
        );

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Fetch database metadata (title and column schema)
    pub async fn retrieve_database(&self, database_id: &DatabaseId) -> Result<DatabaseObject> {
        let url = self.endpoint(&format!("v1/databases/{database_id}"))?;
        self.get_json(&url, &[]).await
    }

    /// Fetch every direct child of a block, following pagination
    pub async fn list_children(&self, block_id: &str) -> Result<Vec<BlockObject>> {
        let url = self.endpoint(&format!("v1/blocks/{block_id}/children"))?;
        let mut cursor: Option<String> = None;
        let mut children = Vec::new();

        loop {
            let mut query = vec![("page_size", self.config.page_size.to_string())];
            if let Some(cursor) = &cursor {
                query.push(("start_cursor", cursor.clone()));
            }

            let batch: PaginatedList<BlockObject> = self.get_json(&url, &query).await?;
            children.extend(batch.results);

            match (batch.has_more, batch.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        Ok(children)
    }

    fn fetch_tree<'a>(
        &'a self,
        block_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Block>>> + Send + 'a>> {
        Box::pin(async move {
            let objects = self.list_children(block_id).await?;
            let mut blocks = Vec::with_capacity(objects.len());

            for object in objects {
                let mut block = object.to_domain();
                if object.should_descend() {
                    block.children = self.fetch_tree(&object.id).await?;
                }
                blocks.push(block);
            }

            Ok(blocks)
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            N2mdError::Configuration(format!("Invalid Notion endpoint '{path}': {e}"))
        })
    }

    fn token(&self) -> Result<&str> {
        self.config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().as_ref())
            .ok_or_else(|| N2mdError::Configuration("notion.api_key is not set".to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url, query: &[(&str, String)]) -> Result<T> {
        self.retry_request(|| async {
            let request = self.client.get(url.clone()).query(query);
            self.execute(request).await
        })
        .await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<T> {
        self.retry_request(|| async {
            let request = self.client.post(url.clone()).json(body);
            self.execute(request).await
        })
        .await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(self.token()?)
            .header("Notion-Version", &self.config.notion_version)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, retry_after, &body).into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NotionError::InvalidResponse(e.to_string()).into())
    }

    /// Run `operation`, retrying retryable failures up to `max_retries` times
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let retry = &self.config.retry;
        let max_attempts = retry.max_retries + 1;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    let retry_after_ms = match &e {
                        N2mdError::Notion(NotionError::RateLimited(secs)) => {
                            Some(retry_after_delay(retry, *secs))
                        }
                        N2mdError::Notion(err) if err.is_retryable() => Some(0),
                        _ => None,
                    };
                    let Some(retry_after_ms) = retry_after_ms else {
                        return Err(e);
                    };
                    if attempt >= max_attempts {
                        return Err(e);
                    }

                    let delay_ms = backoff_delay(retry, attempt).max(retry_after_ms);
                    log_retry_attempt!(attempt, max_attempts, delay_ms, e);

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

#[async_trait]
impl PageSource for NotionClient {
    async fn query_database(&self, database_id: &DatabaseId) -> Result<Vec<Page>> {
        let url = self.endpoint(&format!("v1/databases/{database_id}/query"))?;
        let mut cursor: Option<String> = None;
        let mut pages = Vec::new();

        loop {
            let body = QueryRequest {
                page_size: self.config.page_size,
                start_cursor: cursor.take(),
            };
            let batch: PaginatedList<PageObject> = self.post_json(&url, &body).await?;

            for object in &batch.results {
                pages.push(object.to_domain()?);
            }
            tracing::debug!(
                fetched = pages.len(),
                has_more = batch.has_more,
                "Fetched database query batch"
            );

            match (batch.has_more, batch.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::info!(
            database_id = %database_id,
            count = pages.len(),
            "Fetched database records"
        );
        Ok(pages)
    }

    async fn fetch_blocks(&self, page_id: &PageId) -> Result<Vec<Block>> {
        self.fetch_tree(page_id.as_str()).await
    }
}

fn map_transport_error(err: reqwest::Error) -> N2mdError {
    if err.is_timeout() {
        NotionError::Timeout(err.to_string()).into()
    } else {
        NotionError::ConnectionFailed(err.to_string()).into()
    }
}

/// Map a non-success HTTP status to a NotionError
fn map_status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> NotionError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .filter(|b| !b.message.is_empty())
        .map(|b| format!("{} ({})", b.message, b.code))
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            NotionError::AuthenticationFailed(message)
        }
        StatusCode::NOT_FOUND => NotionError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => NotionError::RateLimited(retry_after.unwrap_or(0)),
        s if s.is_server_error() => NotionError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => NotionError::ClientError {
            status: s.as_u16(),
            message,
        },
    }
}

/// Delay before the retry following the given (1-based) failed attempt
fn backoff_delay(retry: &RetryConfig, attempt: usize) -> u64 {
    let exponent = attempt.saturating_sub(1).min(32) as i32;
    let delay = retry.initial_delay_ms as f64 * retry.backoff_multiplier.powi(exponent);
    (delay as u64).min(retry.max_delay_ms)
}

/// Delay asked for by a `Retry-After` header, capped at `max_delay_ms`
fn retry_after_delay(retry: &RetryConfig, secs: u64) -> u64 {
    secs.saturating_mul(1000).min(retry.max_delay_ms)
}
