//! OAuth2 authorization-code flow against Yahoo's login endpoints
//!
//! Two token endpoint interactions, both POSTing a form to the token URL:
//! 1. Authorization code exchange (first run)
//! 2. Refresh (whenever the stored token has passed its `expires_at`)
//!
//! [`AuthorizedClient`] issues bearer-authenticated GETs and refreshes the
//! token transparently. A refreshed token is handed to the injected
//! [`TokenUpdater`] and written before it is used for any request.

use std::sync::Arc;

use reqwest::{Client, Response, Url};
use tracing::debug;

use crate::auth::{Credentials, Token, TokenUpdater};
use crate::config::SessionConfig;
use crate::error::{Result, YahooError};

/// Client identity plus the two OAuth endpoints.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    credentials: Credentials,
    auth_base_url: String,
    access_token_url: String,
}

impl OAuthClient {
    pub fn new(
        http: Client,
        credentials: Credentials,
        auth_base_url: impl Into<String>,
        access_token_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            credentials,
            auth_base_url: auth_base_url.into(),
            access_token_url: access_token_url.into(),
        }
    }

    pub fn from_config(http: Client, credentials: Credentials, config: &SessionConfig) -> Self {
        Self::new(
            http,
            credentials,
            &config.auth_base_url,
            &config.access_token_url,
        )
    }

    /// URL the operator opens to grant access.
    pub fn authorization_url(&self) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.auth_base_url,
            &[
                ("response_type", "code"),
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", self.credentials.callback_url.as_str()),
            ],
        )?)
    }

    /// Exchange an authorization code for a token (first run).
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let response = self
            .http
            .post(&self.access_token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.credentials.callback_url.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(YahooError::TokenExchange(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let mut token: Token = response
            .json()
            .await
            .map_err(|e| YahooError::TokenExchange(format!("invalid token response: {e}")))?;
        token.stamp_expiry();
        Ok(token)
    }

    /// Obtain a new access token using `token`'s refresh token.
    ///
    /// The returned token keeps the previous refresh token when the endpoint
    /// does not issue a new one.
    pub async fn refresh(&self, token: &Token) -> Result<Token> {
        let refresh_token = token.refresh_token.as_deref().ok_or_else(|| {
            YahooError::Authentication("token expired and has no refresh token".to_string())
        })?;

        let response = self
            .http
            .post(&self.access_token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("redirect_uri", self.credentials.callback_url.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));

            // 400/401/403 mean the refresh token is revoked or the app is gone
            if matches!(status.as_u16(), 400 | 401 | 403) {
                return Err(YahooError::Authentication(format!(
                    "refresh token rejected ({status}): {body}"
                )));
            }

            return Err(YahooError::TokenExchange(format!(
                "token refresh returned {status}: {body}"
            )));
        }

        let mut refreshed: Token = response
            .json()
            .await
            .map_err(|e| YahooError::TokenExchange(format!("invalid refresh response: {e}")))?;
        refreshed.stamp_expiry();
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = token.refresh_token.clone();
        }
        Ok(refreshed)
    }
}

/// Bearer-authenticated GETs with write-through token refresh.
pub struct AuthorizedClient {
    oauth: OAuthClient,
    token: Token,
    updater: Arc<dyn TokenUpdater>,
}

impl AuthorizedClient {
    pub fn new(oauth: OAuthClient, token: Token, updater: Arc<dyn TokenUpdater>) -> Self {
        Self {
            oauth,
            token,
            updater,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Refresh the token if it has expired, persisting it before adopting it.
    pub async fn ensure_fresh_token(&mut self) -> Result<()> {
        if !self.token.is_expired() {
            return Ok(());
        }

        debug!("access token expired, refreshing");
        let refreshed = self.oauth.refresh(&self.token).await?;
        self.updater.persist(&refreshed)?;
        self.token = refreshed;
        Ok(())
    }

    /// Send an authenticated GET. Status codes are left to the caller.
    pub async fn get(&mut self, url: &str) -> Result<Response> {
        self.ensure_fresh_token().await?;

        let response = self
            .oauth
            .http
            .get(url)
            .bearer_auth(&self.token.access_token)
            .send()
            .await?;
        Ok(response)
    }
}
