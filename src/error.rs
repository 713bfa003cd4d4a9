//! Error types for the Yahoo Fantasy session

use std::path::PathBuf;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, YahooError>;

#[derive(Error, Debug)]
pub enum YahooError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(
        "Credentials file is required, {} has been created, please modify it with your application credentials from https://developer.yahoo.com/apps/",
        .path.display()
    )]
    MissingCredentials { path: PathBuf },

    #[error("Credentials file {} needs to be updated: {field} is empty", .path.display())]
    IncompleteCredentials { path: PathBuf, field: String },

    #[error("Invalid value for {var}: {value}")]
    InvalidConfig { var: String, value: String },

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Response from {url} carried an ETag header; the web cache expects time-based expiry only")]
    UnexpectedEtag { url: String },

    #[error("Request to {url} failed with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Cache error: {message}")]
    Cache { message: String },
}
