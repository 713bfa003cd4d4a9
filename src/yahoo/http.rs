//! Authenticated GETs behind the disk cache and a fixed rate-limit delay.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{header::ETAG, header::HeaderMap, StatusCode};
use tracing::debug;

use crate::auth::Token;
use crate::core::{CacheEntry, WebCache};
use crate::error::{Result, YahooError};
use crate::yahoo::oauth::AuthorizedClient;


/// A response, either fresh from the network or replayed from cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub body: String,
    pub from_cache: bool,
    /// Final URL after redirects
    pub url: String,
    pub status: StatusCode,
    pub headers: BTreeMap<String, String>,
}

impl Response {
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Turn a non-2xx status into [`YahooError::Status`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(YahooError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }

    fn from_entry(entry: CacheEntry) -> Result<Self> {
        let status = StatusCode::from_u16(entry.status).map_err(|e| YahooError::Cache {
            message: format!("cached status {} is invalid: {e}", entry.status),
        })?;

        Ok(Self {
            body: entry.body,
            from_cache: true,
            url: entry.resolved_url,
            status,
            headers: entry.headers,
        })
    }
}

/// Caching, rate-limited wrapper around [`AuthorizedClient`].
pub struct CachingHttpClient {
    client: AuthorizedClient,
    cache: WebCache,
    request_delay: Duration,
}

impl CachingHttpClient {
    pub fn new(client: AuthorizedClient, cache: WebCache, request_delay: Duration) -> Self {
        Self {
            client,
            cache,
            request_delay,
        }
    }

    pub fn cache(&self) -> &WebCache {
        &self.cache
    }

    pub fn token(&self) -> &Token {
        self.client.token()
    }

    /// GET `url`, failing on any non-2xx status.
    pub async fn get(&mut self, url: &str) -> Result<Response> {
        self.fetch(url).await?.error_for_status()
    }

    /// GET `url` through the cache without judging the status code.
    ///
    /// A fresh cache entry is returned as-is. Otherwise the request goes to the
    /// network, a successful response is stored, and the configured delay is
    /// slept before returning.
    pub async fn fetch(&mut self, url: &str) -> Result<Response> {
        if let Some(entry) = self.cache.get(url) {
            debug!(url, "cache hit");
            return Response::from_entry(entry);
        }

        debug!(url, "cache miss, fetching");
        let response = self.client.get(url).await?;

        if response.headers().contains_key(ETAG) {
            return Err(YahooError::UnexpectedEtag {
                url: response.url().to_string(),
            });
        }

        let status = response.status();
        let resolved_url = response.url().to_string();
        let headers = flatten_headers(response.headers());
        let body = response.text().await?;

        if status.is_success() {
            let entry = CacheEntry::new(url, &resolved_url, status.as_u16(), headers.clone(), &body);
            self.cache.put(&entry)?;
        }

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        Ok(Response {
            body,
            from_cache: false,
            url: resolved_url,
            status,
            headers,
        })
    }
}

/// Collapse a header map into one string per name, joining repeats with ", ".
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    flat
}
