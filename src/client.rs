use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::download::PageSource;
use crate::error::{Error, Result};
use crate::query::{self, SearchFilter};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings captured once when the client is built
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Client for the `/boards` search endpoint.
///
/// The bearer token becomes a default header of the underlying
/// `reqwest::Client`, so it cannot change after construction.
#[derive(Debug, Clone)]
pub struct BoardsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl BoardsClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoint = query::boards_endpoint(&config.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| Error::InvalidApiKey)?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch one page of boards and return the raw body.
    pub async fn search_boards(&self, filter: &SearchFilter) -> Result<Vec<u8>> {
        let url = query::search_url(&self.endpoint, filter);
        tracing::debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Request { status, body });
        }

        let body = resp.bytes().await?;
        tracing::debug!("page {} returned {} bytes", filter.page, body.len());
        Ok(body.to_vec())
    }
}

impl PageSource for BoardsClient {
    async fn fetch_page(&self, filter: &SearchFilter) -> Result<Vec<u8>> {
        self.search_boards(filter).await
    }
}
