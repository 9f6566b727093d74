use serde::Deserialize;

/// Default article namespaces that never count as topic pages
///
/// Covers the English meta namespaces, their talk variants and the Russian
/// localized equivalents.
pub const DEFAULT_EXCLUDED_NAMESPACES: &[&str] = &[
    "File:",
    "Category:",
    "Template:",
    "Help:",
    "Special:",
    "User:",
    "Wikipedia:",
    "Talk:",
    "User_talk:",
    "Wikipedia_talk:",
    "Template_talk:",
    "Help_talk:",
    "Category_talk:",
    "Portal:",
    "Файл:",
    "Категория:",
    "Шаблон:",
    "Справка:",
    "Участник:",
    "Обсуждение:",
    "Служебная:",
    "Портал:",
];

/// Main configuration structure for Wiki-Pathfinder
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of articles on an expanded path (start included)
    #[serde(rename = "max-depth")]
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 5 }
    }
}

/// Fetch layer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Requests per second, also the number of concurrent in-flight requests
    #[serde(rename = "rate-limit")]
    pub rate_limit: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            rate_limit: 10,
            timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    pub name: String,

    /// Version of the client
    pub version: String,

    /// Free-form comment shown in parentheses
    pub comment: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "WikipediaPathFinder".to_string(),
            version: "1.0".to_string(),
            comment: "Educational Purpose".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (Comment)`
    pub fn header_value(&self) -> String {
        if self.comment.is_empty() {
            format!("{}/{}", self.name, self.version)
        } else {
            format!("{}/{} ({})", self.name, self.version, self.comment)
        }
    }
}

/// Layout of the target site's article pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Path prefix shared by all article URLs
    #[serde(rename = "article-prefix")]
    pub article_prefix: String,

    /// Namespace prefixes (after the article prefix) that are not articles
    #[serde(rename = "excluded-namespaces")]
    pub excluded_namespaces: Vec<String>,

    /// CSS selector of the main content container
    #[serde(rename = "content-selector")]
    pub content_selector: String,

    /// CSS selector of the narrative container inside the main content
    #[serde(rename = "narrative-selector")]
    pub narrative_selector: String,

    /// Classes of auxiliary boxes whose links are ignored
    #[serde(rename = "excluded-box-classes")]
    pub excluded_box_classes: Vec<String>,

    /// Element ids that mark the references section
    #[serde(rename = "references-anchor-ids")]
    pub references_anchor_ids: Vec<String>,

    /// Regex matched against `h2` text when no anchor id is present
    #[serde(rename = "references-heading-pattern")]
    pub references_heading_pattern: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            article_prefix: "/wiki/".to_string(),
            excluded_namespaces: DEFAULT_EXCLUDED_NAMESPACES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            content_selector: "#mw-content-text".to_string(),
            narrative_selector: ".mw-parser-output".to_string(),
            excluded_box_classes: ["navbox", "infobox", "metadata", "ambox"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            references_anchor_ids: vec!["References".to_string()],
            references_heading_pattern: "References|Примечания|Источники".to_string(),
        }
    }
}
