//! Link validation
//!
//! An integration link must be a well-formed absolute URL over http or
//! https. Everything else is rejected before it ever reaches the backend.

use thiserror::Error;
use url::Url;

/// Why a link was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid URL: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("unsupported scheme '{0}': only http and https links can be integrated")]
    UnsupportedScheme(String),
}

/// Parse and validate an integration link
pub fn parse_link(raw: &str) -> Result<Url, LinkError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LinkError::UnsupportedScheme(other.to_string())),
    }
}
