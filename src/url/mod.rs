//! URL handling module for Wiki-Pathfinder
//!
//! This module provides URL normalization, domain extraction, and article link
//! classification.

mod classify;
mod domain;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use classify::{is_article_link, LinkPolicy};
pub use domain::{extract_domain, same_site};
pub use normalize::normalize_url;

/// Parses a user-supplied article URL
///
/// Endpoints of a search must be absolute HTTP(S) URLs with a host; anything
/// else is rejected before any request is made.
///
/// # Examples
///
/// ```
/// use wiki_pathfinder::url::parse_article_url;
///
/// assert!(parse_article_url("https://en.wikipedia.org/wiki/Rust").is_ok());
/// assert!(parse_article_url("/wiki/Rust").is_err());
/// ```
pub fn parse_article_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}
