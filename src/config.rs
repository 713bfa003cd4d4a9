//! Session configuration: file locations, cache policy and OAuth endpoints.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, YahooError};
use crate::yahoo::{ACCESS_TOKEN_URL, AUTH_BASE_URL};

pub const REQUEST_DELAY_ENV_VAR: &str = "YAHOO_FFL_REQUEST_DELAY";
pub const CACHE_EXPIRE_HOURS_ENV_VAR: &str = "YAHOO_FFL_CACHE_EXPIRE_HOURS";
pub const WEB_CACHE_DIR_ENV_VAR: &str = "YAHOO_FFL_WEB_CACHE_DIR";

pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_CACHE_EXPIRE_HOURS: u64 = 168;
pub const DEFAULT_WEB_CACHE_DIR: &str = ".yahoo_web_cache";
pub const DEFAULT_CREDENTIALS_FILE: &str = ".yahoo_fantasy_credentials.json";
pub const DEFAULT_TOKEN_FILE: &str = ".yahoo_fantasy_auth_token.json";

/// Everything a [`Session`](crate::session::Session) needs to know before it starts.
///
/// Relative paths resolve against the working directory, so by default the
/// credentials, token and cache all live next to where the process runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Pause after every request that was not served from cache
    pub request_delay: Duration,
    pub cache_expire_hours: u64,
    pub web_cache_dir: PathBuf,
    pub credentials_file: PathBuf,
    pub token_file: PathBuf,
    pub auth_base_url: String,
    pub access_token_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY,
            cache_expire_hours: DEFAULT_CACHE_EXPIRE_HOURS,
            web_cache_dir: PathBuf::from(DEFAULT_WEB_CACHE_DIR),
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            auth_base_url: AUTH_BASE_URL.to_string(),
            access_token_url: ACCESS_TOKEN_URL.to_string(),
        }
    }
}

impl SessionConfig {
    /// Defaults overlaid with any `YAHOO_FFL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().overlay_env()
    }

    /// Apply `YAHOO_FFL_*` environment overrides on top of `self`.
    pub fn overlay_env(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var(REQUEST_DELAY_ENV_VAR) {
            self.request_delay = parse_delay_secs(REQUEST_DELAY_ENV_VAR, &value)?;
        }

        if let Ok(value) = std::env::var(CACHE_EXPIRE_HOURS_ENV_VAR) {
            self.cache_expire_hours =
                value
                    .trim()
                    .parse()
                    .map_err(|_| YahooError::InvalidConfig {
                        var: CACHE_EXPIRE_HOURS_ENV_VAR.to_string(),
                        value: value.clone(),
                    })?;
        }

        if let Ok(value) = std::env::var(WEB_CACHE_DIR_ENV_VAR) {
            if !value.trim().is_empty() {
                self.web_cache_dir = PathBuf::from(value);
            }
        }

        Ok(self)
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_cache_expire_hours(mut self, hours: u64) -> Self {
        self.cache_expire_hours = hours;
        self
    }

    pub fn with_web_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.web_cache_dir = dir.into();
        self
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = path.into();
        self
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    /// Point the OAuth flow at different authorize/token endpoints.
    pub fn with_oauth_endpoints(
        mut self,
        auth_base_url: impl Into<String>,
        access_token_url: impl Into<String>,
    ) -> Self {
        self.auth_base_url = auth_base_url.into();
        self.access_token_url = access_token_url.into();
        self
    }
}

/// Parse a non-negative number of seconds (fractions allowed) into a delay.
pub fn parse_delay_secs(var: &str, value: &str) -> Result<Duration> {
    let invalid = || YahooError::InvalidConfig {
        var: var.to_string(),
        value: value.to_string(),
    };

    let secs: f64 = value.trim().parse().map_err(|_| invalid())?;
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();

        assert_eq!(config.request_delay, Duration::from_millis(100));
        assert_eq!(config.cache_expire_hours, 168);
        assert_eq!(config.web_cache_dir, PathBuf::from(".yahoo_web_cache"));
        assert_eq!(
            config.credentials_file,
            PathBuf::from(".yahoo_fantasy_credentials.json")
        );
        assert_eq!(
            config.token_file,
            PathBuf::from(".yahoo_fantasy_auth_token.json")
        );
        assert_eq!(
            config.auth_base_url,
            "https://api.login.yahoo.com/oauth2/request_auth"
        );
        assert_eq!(
            config.access_token_url,
            "https://api.login.yahoo.com/oauth2/get_token"
        );
    }

    #[test]
    fn test_builder_setters() {
        let config = SessionConfig::default()
            .with_request_delay(Duration::ZERO)
            .with_cache_expire_hours(1)
            .with_web_cache_dir("/tmp/cache")
            .with_credentials_file("/tmp/creds.json")
            .with_token_file("/tmp/token.json")
            .with_oauth_endpoints("http://localhost/auth", "http://localhost/token");

        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.cache_expire_hours, 1);
        assert_eq!(config.web_cache_dir, PathBuf::from("/tmp/cache"));
        assert_eq!(config.credentials_file, PathBuf::from("/tmp/creds.json"));
        assert_eq!(config.token_file, PathBuf::from("/tmp/token.json"));
        assert_eq!(config.auth_base_url, "http://localhost/auth");
        assert_eq!(config.access_token_url, "http://localhost/token");
    }

    #[test]
    fn test_parse_delay_secs() {
        assert_eq!(
            parse_delay_secs("X", "0.25").unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(parse_delay_secs("X", " 2 ").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_delay_secs("X", "0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_delay_secs_rejects_garbage() {
        assert!(matches!(
            parse_delay_secs("X", "soon"),
            Err(YahooError::InvalidConfig { .. })
        ));
        assert!(parse_delay_secs("X", "-1").is_err());
        assert!(parse_delay_secs("X", "NaN").is_err());
    }

    // All env-var cases live in one test so they cannot race each other.
    #[test]
    fn test_overlay_env() {
        std::env::set_var(REQUEST_DELAY_ENV_VAR, "0.5");
        std::env::set_var(CACHE_EXPIRE_HOURS_ENV_VAR, "24");
        std::env::set_var(WEB_CACHE_DIR_ENV_VAR, "/var/cache/yahoo");

        let config = SessionConfig::from_env().unwrap();
        assert_eq!(config.request_delay, Duration::from_millis(500));
        assert_eq!(config.cache_expire_hours, 24);
        assert_eq!(config.web_cache_dir, PathBuf::from("/var/cache/yahoo"));

        std::env::set_var(CACHE_EXPIRE_HOURS_ENV_VAR, "a week");
        match SessionConfig::from_env().unwrap_err() {
            YahooError::InvalidConfig { var, value } => {
                assert_eq!(var, CACHE_EXPIRE_HOURS_ENV_VAR);
                assert_eq!(value, "a week");
            }
            _ => panic!("Expected InvalidConfig error"),
        }

        std::env::remove_var(REQUEST_DELAY_ENV_VAR);
        std::env::remove_var(CACHE_EXPIRE_HOURS_ENV_VAR);
        std::env::remove_var(WEB_CACHE_DIR_ENV_VAR);

        assert_eq!(SessionConfig::from_env().unwrap(), SessionConfig::default());
    }
}
