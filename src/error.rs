// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Separates run-fatal feed errors from per-entry store errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status} on {url}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Feed parse error: {0}")]
    Parse(#[from] quick_xml::de::DeError),

    #[error("Invalid date {value:?}: {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Front matter error: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Auth(_) => 2,
            Error::Network(_) => 3,
            Error::Api { .. } => 4,
            Error::Parse(_) => 5,
            Error::DateParse { .. } => 6,
            Error::Filesystem(_) => 7,
            Error::Frontmatter(_) => 8,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
