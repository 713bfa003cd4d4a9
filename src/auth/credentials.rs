//! Application credentials file
//!
//! The credentials file holds the client identity registered at
//! <https://developer.yahoo.com/apps/>. A missing file is replaced with an
//! empty template and the load fails until the operator fills it in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::write_string;
use crate::error::{Result, YahooError};

/// Out-of-band redirect: Yahoo shows the authorization code on screen.
pub const OOB_CALLBACK: &str = "oob";

/// Yahoo application identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
}

fn default_callback_url() -> String {
    OOB_CALLBACK.to_string()
}

impl Credentials {
    /// The blank template written when no credentials file exists.
    pub fn template() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            callback_url: default_callback_url(),
        }
    }
}

/// Loads [`Credentials`] from a JSON file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the credentials file, creating a template if it does not exist.
    ///
    /// Fails with [`YahooError::MissingCredentials`] when the template had to be
    /// created, and with [`YahooError::IncompleteCredentials`] when the id or
    /// secret is still empty.
    pub fn load(&self) -> Result<Credentials> {
        if !self.path.exists() {
            let template = serde_json::to_string_pretty(&Credentials::template())?;
            write_string(&self.path, &template)?;
            return Err(YahooError::MissingCredentials {
                path: self.path.clone(),
            });
        }

        debug!(path = %self.path.display(), "loading credentials file");
        let contents = fs::read_to_string(&self.path)?;
        let credentials: Credentials = serde_json::from_str(&contents)?;

        if credentials.client_id.is_empty() {
            return Err(self.incomplete("client_id"));
        }
        if credentials.client_secret.is_empty() {
            return Err(self.incomplete("client_secret"));
        }

        Ok(credentials)
    }

    fn incomplete(&self, field: &str) -> YahooError {
        YahooError::IncompleteCredentials {
            path: self.path.clone(),
            field: field.to_string(),
        }
    }
}
