//! Common utilities shared by HTTP-backed stores.

use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default HTTP timeout for store requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates an HTTP client with the given request timeout.
///
/// # Errors
///
/// Returns [`Error::Config`] if the TLS backend cannot be initialized.
pub fn create_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))
}

/// Validates a store endpoint URL.
///
/// # Errors
///
/// Returns [`Error::Config`] for anything other than an http(s) URL.
pub fn validate_url(url: &str) -> Result<()> {
    let has_valid_scheme = ["http://", "https://"].iter().any(|s| url.starts_with(s));
    if !has_valid_scheme {
        return Err(Error::Config(format!(
            "Invalid URL scheme in '{}'. Allowed: http, https",
            redact_url(url)
        )));
    }

    if url.len() < 10 {
        return Err(Error::Config(format!(
            "Invalid URL format: {}",
            redact_url(url)
        )));
    }

    Ok(())
}

/// Replaces the userinfo part of a URL (`user:password@`) with `***@`.
#[must_use]
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
        None => url.to_string(),
    }
}

/// Describes an unsuccessful HTTP response from a store.
#[must_use]
pub fn describe_http_error(status_code: u16, body: &str, store_name: &str) -> String {
    match status_code {
        401 | 403 => format!("{store_name} auth failed: {body}"),
        429 => format!("{store_name} rate limit exceeded: {body}"),
        _ => format!("{store_name} error {status_code}: {body}"),
    }
}

/// Truncates a message to at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
