//! OAuth2 token and its on-disk store
//!
//! The token file is created once through the interactive authorization-code
//! flow and afterwards rewritten every time the HTTP layer refreshes the token.
//! Writes are atomic (temp file + rename) so a crash never leaves a torn file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::auth::prompt::AuthorizationPrompt;
use crate::error::{Result, YahooError};
use crate::yahoo::oauth::OAuthClient;

/// Token as returned by the token endpoint.
///
/// `expires_at` is an absolute unix timestamp in seconds, stamped when the
/// token is received. Fields this crate does not use (for instance
/// `xoauth_yahoo_guid`) are preserved in `extra` so the file round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Token {
    /// Fill in `expires_at` from `expires_in` relative to now.
    pub fn stamp_expiry(&mut self) {
        if let Some(expires_in) = self.expires_in {
            self.expires_at = Some(now_secs() + expires_in);
        }
    }

    /// Whether the token has an expiry and it lies in the past.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_secs())
    }

    pub fn is_expired_at(&self, now: f64) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Receives every token the HTTP layer obtains through a silent refresh.
///
/// Implementations must finish writing before returning: the refreshed token
/// is not used until `persist` has completed.
pub trait TokenUpdater: Send + Sync {
    fn persist(&self, token: &Token) -> Result<()>;
}

/// Loads and saves the OAuth2 token file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token, running the interactive flow first if none exists.
    pub async fn load(
        &self,
        oauth: &OAuthClient,
        prompt: &mut dyn AuthorizationPrompt,
    ) -> Result<Token> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "authorization file does not exist, creating");
            let token = authorize_interactively(oauth, prompt).await?;
            self.write(&token)?;
        }

        self.read()
    }

    /// Read the token file without any fallback.
    pub fn read(&self) -> Result<Token> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write(&self, token: &Token) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };
        let tmp_path = dir.join(format!(".token.tmp.{}", std::process::id()));

        fs::write(&tmp_path, json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), "persisted token");
        Ok(())
    }
}

impl TokenUpdater for TokenStore {
    fn persist(&self, token: &Token) -> Result<()> {
        info!(
            path = %self.path.display(),
            "token refreshed after expiry, saving new token"
        );
        self.write(token)
    }
}

/// Three-legged authorization: URL, operator-supplied code, code exchange.
pub async fn authorize_interactively(
    oauth: &OAuthClient,
    prompt: &mut dyn AuthorizationPrompt,
) -> Result<Token> {
    let authorization_url = oauth.authorization_url()?;
    let code = prompt.authorization_code(authorization_url.as_str())?;
    let code = code.trim();
    if code.is_empty() {
        return Err(YahooError::Authentication(
            "no authorization code entered".to_string(),
        ));
    }

    oauth.exchange_code(code).await
}
