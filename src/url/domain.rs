use url::Url;

/// Extracts the lowercase host of a URL
///
/// The host is what the link classifier compares against to decide whether a
/// full URL stays on the searched site.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wiki_pathfinder::url::extract_domain;
///
/// let url = Url::parse("https://en.wikipedia.org/wiki/Rust").unwrap();
/// assert_eq!(extract_domain(&url), Some("en.wikipedia.org".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if `host` names the same site as `site_host`
pub fn same_site(host: &str, site_host: &str) -> bool {
    !host.is_empty() && host.eq_ignore_ascii_case(site_host)
}
