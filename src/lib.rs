//! Yahoo Fantasy Sports API session
//!
//! A thin OAuth2 session for the Yahoo Fantasy API with an on-disk response
//! cache and request rate limiting.
//!
//! ## Features
//!
//! - **Credential bootstrap**: `.yahoo_fantasy_credentials.json` is created as a
//!   template on first run and must be filled in with your app's id and secret
//! - **Token management**: the OAuth2 token is obtained interactively once,
//!   stored on disk, and rewritten whenever it is silently refreshed
//! - **Web cache**: responses are cached per URL for a fixed number of hours
//!   (168 by default), independent of server cache headers
//! - **Rate limiting**: a fixed delay follows every request that missed the cache
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yahoo_ffl::{Session, SessionConfig};
//!
//! # async fn example() -> yahoo_ffl::Result<()> {
//! let mut session = Session::new(SessionConfig::from_env()?).await?;
//!
//! let response = session
//!     .get_response("https://fantasysports.yahooapis.com/fantasy/v2/game/nfl")
//!     .await?;
//! println!("from_cache={} url={}", response.from_cache, response.url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export YAHOO_FFL_REQUEST_DELAY=0.5
//! export YAHOO_FFL_CACHE_EXPIRE_HOURS=24
//! export YAHOO_FFL_WEB_CACHE_DIR=/var/cache/yahoo-ffl
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod session;
pub mod yahoo;

// Re-export commonly used types
pub use auth::{Credentials, Token};
pub use config::SessionConfig;
pub use error::{Result, YahooError};
pub use session::Session;
pub use yahoo::http::Response;
