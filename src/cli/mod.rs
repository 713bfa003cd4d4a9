//! CLI argument definitions and parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{parse_delay_secs, SessionConfig};
use crate::Result;

/// Session options shared between commands; unset flags keep env/default values.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Seconds to sleep after each request not served from cache (e.g. 0.1).
    #[clap(long)]
    pub delay: Option<String>,

    /// Hours a cached response stays valid.
    #[clap(long)]
    pub expire_hours: Option<u64>,

    /// Directory for cached responses.
    #[clap(long)]
    pub cache_dir: Option<PathBuf>,

    /// Path of the application credentials file.
    #[clap(long)]
    pub credentials: Option<PathBuf>,

    /// Path of the OAuth token file.
    #[clap(long)]
    pub token: Option<PathBuf>,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[clap(long, short)]
    pub verbose: bool,
}

impl SessionArgs {
    /// Apply the flags on top of `base`.
    pub fn apply(&self, mut base: SessionConfig) -> Result<SessionConfig> {
        if let Some(delay) = &self.delay {
            base.request_delay = parse_delay_secs("--delay", delay)?;
        }
        if let Some(hours) = self.expire_hours {
            base.cache_expire_hours = hours;
        }
        if let Some(dir) = &self.cache_dir {
            base.web_cache_dir = dir.clone();
        }
        if let Some(path) = &self.credentials {
            base.credentials_file = path.clone();
        }
        if let Some(path) = &self.token {
            base.token_file = path.clone();
        }
        Ok(base)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// GET any Yahoo Fantasy API URL and print the body
    Get {
        /// Full resource URL.
        url: String,

        /// Print resolved URL, status and cache flag before the body.
        #[clap(long)]
        meta: bool,

        #[clap(flatten)]
        session: SessionArgs,
    },

    /// Fetch a game resource and print its game_id
    Game {
        /// Game code (nfl, mlb, nba, nhl) or numeric game key.
        #[clap(long, default_value = "nfl")]
        code: String,

        #[clap(flatten)]
        session: SessionArgs,
    },
}

impl Commands {
    pub fn session_args(&self) -> &SessionArgs {
        match self {
            Commands::Get { session, .. } | Commands::Game { session, .. } => session,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "yahoo-ffl", about = "Yahoo Fantasy Sports API session CLI")]
pub struct YahooCli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Pull the `game_id` element out of a game resource body, tags included.
pub fn extract_game_id(body: &str) -> Option<&str> {
    let start = body.find("<game_id>")?;
    let end = body[start..].find("</game_id>")? + start + "</game_id>".len();
    Some(&body[start..end])
}
