//! Operator interaction for the first authorization.

use std::io::{self, BufRead, Write};

use crate::Result;

/// Obtains an authorization code after the operator visits `authorization_url`.
pub trait AuthorizationPrompt: Send {
    fn authorization_code(&mut self, authorization_url: &str) -> Result<String>;
}

/// Prints the authorization URL to stderr and reads the code from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl AuthorizationPrompt for StdinPrompt {
    fn authorization_code(&mut self, authorization_url: &str) -> Result<String> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "Please go to\n{authorization_url}\nand authorize")?;
        write!(stderr, "\nEnter the authorization code here: ")?;
        stderr.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Returns a code fixed up front; for scripted setups and tests.
#[derive(Debug, Clone)]
pub struct StaticCodePrompt {
    code: String,
    /// Every URL the prompt was shown, in order
    pub shown_urls: Vec<String>,
}

impl StaticCodePrompt {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            shown_urls: Vec::new(),
        }
    }
}

impl AuthorizationPrompt for StaticCodePrompt {
    fn authorization_code(&mut self, authorization_url: &str) -> Result<String> {
        self.shown_urls.push(authorization_url.to_string());
        Ok(self.code.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_prompt_records_urls() {
        let mut prompt = StaticCodePrompt::new("abc123");

        assert_eq!(prompt.authorization_code("https://a").unwrap(), "abc123");
        assert_eq!(prompt.authorization_code("https://b").unwrap(), "abc123");
        assert_eq!(prompt.shown_urls, vec!["https://a", "https://b"]);
    }
}
