//! Yahoo Fantasy API session
//!
//! Construction runs the whole bootstrap: credentials, token (interactive on
//! the first run), refresh write-through and the caching client. Afterwards
//! [`Session::get`] is the only call most code needs.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Client;
use tracing::debug;

use crate::auth::{AuthorizationPrompt, CredentialStore, StdinPrompt, TokenStore};
use crate::config::SessionConfig;
use crate::core::{cache_key, WebCache};
use crate::error::Result;
use crate::yahoo::http::{CachingHttpClient, Response};
use crate::yahoo::oauth::{AuthorizedClient, OAuthClient};

const USER_AGENT: &str = concat!("yahoo-ffl/", env!("CARGO_PKG_VERSION"));

/// Authenticated, cached, rate-limited access to the Yahoo Fantasy API.
pub struct Session {
    client: CachingHttpClient,
    /// Resolved URL of every `get`, in call order
    urls: Vec<String>,
    /// Cache key -> resolved URL for every response fetched over the network
    cached_urls: BTreeMap<String, String>,
}

impl Session {
    /// Build a session, prompting on stdin if no token exists yet.
    pub async fn new(config: SessionConfig) -> Result<Self> {
        Self::with_prompt(config, &mut StdinPrompt).await
    }

    /// Build a session with a caller-supplied authorization prompt.
    pub async fn with_prompt(
        config: SessionConfig,
        prompt: &mut dyn AuthorizationPrompt,
    ) -> Result<Self> {
        let credentials = CredentialStore::new(&config.credentials_file).load()?;

        let http = Client::builder().user_agent(USER_AGENT).build()?;
        let oauth = OAuthClient::from_config(http, credentials, &config);

        let token_store = Arc::new(TokenStore::new(&config.token_file));
        let token = token_store.load(&oauth, prompt).await?;

        let authorized = AuthorizedClient::new(oauth, token, token_store);
        let cache = WebCache::new(&config.web_cache_dir, config.cache_expire_hours);
        let client = CachingHttpClient::new(authorized, cache, config.request_delay);

        Ok(Self {
            client,
            urls: Vec::new(),
            cached_urls: BTreeMap::new(),
        })
    }

    /// GET `url` and return the body text.
    pub async fn get(&mut self, url: &str) -> Result<String> {
        Ok(self.get_response(url).await?.body)
    }

    /// GET `url` and return the full response, including the cache-hit flag.
    pub async fn get_response(&mut self, url: &str) -> Result<Response> {
        let response = self.client.fetch(url).await?;

        if !response.from_cache {
            self.cached_urls
                .insert(cache_key(url), response.url.clone());
        }
        self.urls.push(response.url.clone());
        debug!(url = %response.url, from_cache = response.from_cache, "request complete");

        response.error_for_status()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn cached_urls(&self) -> &BTreeMap<String, String> {
        &self.cached_urls
    }

    pub fn client(&self) -> &CachingHttpClient {
        &self.client
    }
}
