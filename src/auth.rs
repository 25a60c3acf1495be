// ABOUTME: Credential pair for HTTP Basic auth against the blog API
// ABOUTME: API key precedence: CLI argument → BLOGSYNC_API_KEY env var

use crate::{Error, Result};
use std::env;
use std::fmt;

pub const API_KEY_ENV: &str = "BLOGSYNC_API_KEY";

#[derive(Clone)]
pub struct Credentials {
    pub account_id: String,
    api_key: String,
}

impl Credentials {
    pub fn new(account_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Credentials {
            account_id: account_id.into(),
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

pub fn resolve_credentials(account_id: String, cli_key: Option<String>) -> Result<Credentials> {
    resolve_with(account_id, cli_key, env::var(API_KEY_ENV).ok())
}

fn resolve_with(
    account_id: String,
    cli_key: Option<String>,
    env_key: Option<String>,
) -> Result<Credentials> {
    if account_id.trim().is_empty() {
        return Err(Error::Auth("account id must not be empty".into()));
    }

    cli_key
        .or(env_key)
        .filter(|key| !key.trim().is_empty())
        .map(|key| Credentials::new(account_id, key))
        .ok_or_else(|| {
            Error::Auth(format!(
                "No API key found. Pass it as the third argument or set {}",
                API_KEY_ENV
            ))
        })
}
