//! Credential and token persistence plus the first-run authorization flow.

pub mod credentials;
pub mod prompt;
pub mod token;

pub use credentials::{CredentialStore, Credentials};
pub use prompt::{AuthorizationPrompt, StaticCodePrompt, StdinPrompt};
pub use token::{Token, TokenStore, TokenUpdater};
