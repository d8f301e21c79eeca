//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ApiError;
use crate::error::Error;
use crate::model::Artwork;
use crate::model::Page;
use crate::source::RecordSource;

/// Default base URL of the public artworks API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Fields requested from the API; only the columns the table displays.
const ARTWORK_FIELDS: &str = "id,title,place_of_origin,artist_display,date_start,date_end";

/// The client for the Art Institute of Chicago artworks API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use artic_lib::ArticClient;
///
/// let client = ArticClient::builder()
///     .page_size(12)
///     .build();
///
/// let page = client.fetch_artworks(1).await?;
/// println!("{} of {} records", page.len(), page.total_records());
/// ```
#[derive(Clone)]
pub struct ArticClient {
    inner: Arc<ArticClientInner>,
}

struct ArticClientInner {
    base_url: String,
    page_size: Option<usize>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Creates a client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns the base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the page size sent as the `limit` query parameter, if any.
    ///
    /// When unset, the API's own default page size applies; the actual
    /// per-page yield is always read from the response.
    pub fn page_size(&self) -> Option<usize> {
        self.inner.page_size
    }

    /// Fetches one 1-based page of artworks.
    ///
    /// Maps non-success statuses, network failures, and malformed payloads
    /// to [`ApiError`]. No retry is attempted.
    pub async fn fetch_artworks(&self, page: u32) -> Result<Page, Error> {
        let url = format!("{}/artworks", self.inner.base_url.trim_end_matches('/'));

        let mut request = self.inner.http_client.get(&url).query(&[
            ("page", page.to_string()),
            ("fields", ARTWORK_FIELDS.to_string()),
        ]);

        if let Some(size) = self.inner.page_size {
            request = request.query(&[("limit", size.to_string())]);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::http(status, body)));
        }

        let body = response.text().await.map_err(ApiError::from)?;
        let envelope: ArtworksResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

        Ok(Page::new(page, envelope.data, envelope.pagination.total))
    }
}

impl Default for ArticClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSource for ArticClient {
    async fn fetch_page(&self, page: u32) -> Result<Page, Error> {
        self.fetch_artworks(page).await
    }
}

/// Response envelope for artwork collection requests.
#[derive(Debug, Deserialize)]
struct ArtworksResponse {
    pagination: Pagination,
    data: Vec<Artwork>,
}

/// Pagination block of the response envelope. Only the total is consumed;
/// pager math derives everything else from the display page size.
#[derive(Debug, Deserialize)]
struct Pagination {
    total: usize,
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing an [`ArticClient`].
///
/// Every field has a default, so `ArticClient::builder().build()` is a
/// working client against the public API.
pub struct ArticClientBuilder {
    base_url: String,
    page_size: Option<usize>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the base URL of the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the page size requested via the `limit` query parameter.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ArticClient`].
    pub fn build(self) -> ArticClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        ArticClient {
            inner: Arc::new(ArticClientInner {
                base_url: self.base_url,
                page_size: self.page_size,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
