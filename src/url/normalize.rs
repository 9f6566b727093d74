use url::Url;

/// Normalizes a URL into its canonical article identity
///
/// # Normalization Steps
///
/// 1. Parse the URL (falls back to plain text stripping if parsing fails)
/// 2. Keep only scheme, host (with explicit port) and path
/// 3. Drop the query string and fragment
/// 4. Strip trailing slashes
///
/// Two URLs name the same article iff their normalized forms are byte-equal.
/// Malformed input never fails: it yields a best-effort form whose scheme or
/// host may be empty, which simply never compares equal to a real article.
///
/// # Examples
///
/// ```
/// use wiki_pathfinder::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("https://en.example.org/wiki/Foo/?action=view#History"),
///     "https://en.example.org/wiki/Foo"
/// );
/// ```
pub fn normalize_url(url_str: &str) -> String {
    let canonical = match Url::parse(url_str.trim()) {
        Ok(url) => match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => {
                format!("{}://{}:{}{}", url.scheme(), host, port, url.path())
            }
            (Some(host), None) => format!("{}://{}{}", url.scheme(), host, url.path()),
            // No authority at all (mailto:, data:, ...): keep the opaque path
            (None, _) => format!("{}:{}", url.scheme(), url.path()),
        },
        Err(_) => strip_query_and_fragment(url_str.trim()).to_string(),
    };

    canonical.trim_end_matches('/').to_string()
}

/// Textual fallback for strings the URL parser rejects
fn strip_query_and_fragment(url_str: &str) -> &str {
    let end = url_str.find(['?', '#']).unwrap_or(url_str.len());
    &url_str[..end]
}
