use crate::config::SiteConfig;
use crate::url::domain::same_site;
use percent_encoding::percent_decode_str;
use url::Url;

/// Which hyperlinks count as links to topic articles
///
/// Built from [`SiteConfig`]; the namespace denylist is data so other sites
/// and locales only need a different config.
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    article_prefix: String,
    excluded_namespaces: Vec<String>,
}

impl LinkPolicy {
    /// Creates a policy from an article path prefix and a namespace denylist
    pub fn new(article_prefix: impl Into<String>, excluded_namespaces: Vec<String>) -> Self {
        Self {
            article_prefix: article_prefix.into(),
            excluded_namespaces,
        }
    }

    /// Creates the policy described by a site configuration
    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(
            site.article_prefix.clone(),
            site.excluded_namespaces.clone(),
        )
    }

    /// The path prefix shared by all article URLs (e.g. `/wiki/`)
    pub fn article_prefix(&self) -> &str {
        &self.article_prefix
    }

    /// Checks the part of an article href that follows the prefix
    ///
    /// Rejects empty titles, in-page anchors and meta namespaces. Namespaces
    /// are compared against both the raw and the percent-decoded title so
    /// that localized names match the encoded form sites actually emit.
    fn is_article_title(&self, title: &str) -> bool {
        if title.is_empty() || title.contains('#') {
            return false;
        }

        let decoded = percent_decode_str(title).decode_utf8_lossy();

        !self
            .excluded_namespaces
            .iter()
            .any(|ns| title.starts_with(ns.as_str()) || decoded.starts_with(ns.as_str()))
    }

    /// Returns the title part of a full same-site article URL
    fn full_url_title(&self, href: &str, site_host: &str) -> Option<String> {
        let url = if href.starts_with("//") {
            Url::parse(&format!("https:{}", href)).ok()?
        } else {
            Url::parse(href).ok()?
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return None;
        }

        if !same_site(url.host_str()?, site_host) {
            return None;
        }

        let path = url.path();
        let idx = path.rfind(self.article_prefix.as_str())?;
        let mut title = path[idx + self.article_prefix.len()..].to_string();

        // Keep the fragment so the title check sees the anchor
        if let Some(fragment) = url.fragment() {
            title.push('#');
            title.push_str(fragment);
        }

        Some(title)
    }
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::from_site(&SiteConfig::default())
    }
}

/// Decides whether a raw href is a link to another article on the site
///
/// # Decision Rules
///
/// 1. Empty hrefs are rejected
/// 2. `/wiki/Title` style hrefs are accepted unless the title carries a
///    fragment or starts with an excluded namespace
/// 3. Full (or protocol-relative) URLs on `site_host` whose path contains the
///    article prefix get rule 2 applied to the title after the prefix
/// 4. Everything else is rejected
///
/// # Examples
///
/// ```
/// use wiki_pathfinder::url::{is_article_link, LinkPolicy};
///
/// let policy = LinkPolicy::default();
/// assert!(is_article_link("/wiki/Foo", "en.wikipedia.org", &policy));
/// assert!(!is_article_link("/wiki/Category:Foo", "en.wikipedia.org", &policy));
/// assert!(!is_article_link("/wiki/Foo#Bar", "en.wikipedia.org", &policy));
/// ```
pub fn is_article_link(href: &str, site_host: &str, policy: &LinkPolicy) -> bool {
    let href = href.trim();

    if href.is_empty() {
        return false;
    }

    if let Some(title) = href.strip_prefix(policy.article_prefix()) {
        return policy.is_article_title(title);
    }

    match policy.full_url_title(href, site_host) {
        Some(title) => policy.is_article_title(&title),
        None => false,
    }
}
