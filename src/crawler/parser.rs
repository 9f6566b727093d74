//! Article link extraction from fetched pages
//!
//! This module parses page HTML and collects the links that form the article
//! graph:
//! - Links in paragraphs and list items of the article narrative
//! - Links in the references/citations section
//!
//! Links inside auxiliary boxes (navigation, info, metadata and message boxes)
//! are ignored wherever they appear in the main content.

use crate::config::SiteConfig;
use crate::url::{extract_domain, is_article_link, LinkPolicy};
use crate::ConfigError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Class that marks a section heading wrapper
const HEADING_WRAPPER_CLASS: &str = "mw-heading";

/// Class that marks a top-level section heading wrapper
const TOP_HEADING_WRAPPER_CLASS: &str = "mw-heading2";

/// Compiles a CSS selector, mapping failures to configuration errors
fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidPattern(format!("selector '{}': {:?}", selector, e)))
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn is_heading(element: ElementRef<'_>) -> bool {
    matches!(
        element.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

/// Returns true if `element` starts the next top-level section
fn is_top_level_heading(element: ElementRef<'_>) -> bool {
    element.value().name() == "h2" || has_class(element, TOP_HEADING_WRAPPER_CLASS)
}

/// Extracts article links from pages of one site layout
///
/// All selectors and patterns are compiled once, at construction.
#[derive(Debug)]
pub struct ArticleExtractor {
    policy: LinkPolicy,
    content: Selector,
    narrative: Selector,
    boxes: Option<Selector>,
    text_blocks: Selector,
    anchors: Selector,
    headings: Selector,
    with_id: Selector,
    reference_ids: Vec<String>,
    references_heading: Regex,
}

impl ArticleExtractor {
    /// Creates an extractor for the given site layout
    ///
    /// # Returns
    ///
    /// * `Ok(ArticleExtractor)` - Ready to extract
    /// * `Err(ConfigError)` - A selector or the heading pattern is invalid
    pub fn new(site: &SiteConfig) -> Result<Self, ConfigError> {
        let boxes = if site.excluded_box_classes.is_empty() {
            None
        } else {
            let selector = site
                .excluded_box_classes
                .iter()
                .map(|class| format!(".{}", class))
                .collect::<Vec<_>>()
                .join(", ");
            Some(compile(&selector)?)
        };

        let references_heading = Regex::new(&site.references_heading_pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("references_heading_pattern: {}", e))
        })?;

        Ok(Self {
            policy: LinkPolicy::from_site(site),
            content: compile(&site.content_selector)?,
            narrative: compile(&site.narrative_selector)?,
            boxes,
            text_blocks: compile("p, li")?,
            anchors: compile("a[href]")?,
            headings: compile("h2")?,
            with_id: compile("[id]")?,
            reference_ids: site.references_anchor_ids.clone(),
            references_heading,
        })
    }

    /// Extracts the article links of a page
    ///
    /// # Extraction Rules
    ///
    /// **Include:**
    /// - `<a href>` inside `<p>` and `<li>` of the narrative container
    /// - `<a href>` anywhere in the references section, up to the next
    ///   top-level heading
    ///
    /// **Exclude:**
    /// - Anything inside an auxiliary box of the main content
    /// - Hrefs the [`LinkPolicy`] rejects, or that point to another host
    ///
    /// # Arguments
    ///
    /// * `html` - The page HTML
    /// * `base_url` - The page URL, used for the site host and to resolve
    ///   relative links
    ///
    /// # Returns
    ///
    /// Absolute URLs of the linked articles. Empty or unparseable documents
    /// yield an empty set.
    pub fn extract_links(&self, html: &str, base_url: &Url) -> HashSet<String> {
        let mut links = HashSet::new();

        if html.trim().is_empty() {
            return links;
        }

        let site_host = match extract_domain(base_url) {
            Some(host) => host,
            None => return links,
        };

        let document = Html::parse_document(html);
        let main = document.select(&self.content).next();

        // Boxes are pruned rather than removed: their subtrees are skipped
        let mut pruned = HashSet::new();
        if let (Some(main), Some(boxes)) = (main, &self.boxes) {
            pruned.extend(main.select(boxes).map(|element| element.id()));
        }
        let is_pruned = |element: ElementRef<'_>| {
            pruned.contains(&element.id())
                || element.ancestors().any(|node| pruned.contains(&node.id()))
        };

        let mut collect = |anchor: ElementRef<'_>| {
            if is_pruned(anchor) {
                return;
            }
            let Some(href) = anchor.value().attr("href") else {
                return;
            };
            if !is_article_link(href, &site_host, &self.policy) {
                return;
            }
            match base_url.join(href.trim()) {
                Ok(absolute) => {
                    links.insert(absolute.to_string());
                }
                Err(e) => tracing::trace!("Skipping unresolvable href {}: {}", href, e),
            }
        };

        if let Some(narrative) = main.and_then(|main| main.select(&self.narrative).next()) {
            for block in narrative.select(&self.text_blocks) {
                block.select(&self.anchors).for_each(&mut collect);
            }
        }

        if let Some(start) = self.references_start(&document) {
            for sibling in start.next_siblings().filter_map(ElementRef::wrap) {
                if is_top_level_heading(sibling) {
                    break;
                }
                if sibling.value().name() == "a" {
                    collect(sibling);
                }
                sibling.select(&self.anchors).for_each(&mut collect);
            }
        }

        links
    }

    /// Finds the element after which the references section content begins
    ///
    /// Looks for a configured anchor id first, then for an `h2` whose text
    /// matches the references pattern. A heading inside a wrapper `div` is
    /// replaced by the wrapper, since the section content are its siblings.
    fn references_start<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let anchor = document.select(&self.with_id).find(|element| {
            element
                .value()
                .id()
                .is_some_and(|id| self.reference_ids.iter().any(|r| r == id))
        });

        let heading = match anchor {
            Some(anchor) if is_heading(anchor) => anchor,
            Some(anchor) => anchor.parent().and_then(ElementRef::wrap).unwrap_or(anchor),
            None => document.select(&self.headings).find(|heading| {
                let text = heading.text().collect::<String>();
                self.references_heading.is_match(text.trim())
            })?,
        };

        match heading.parent().and_then(ElementRef::wrap) {
            Some(wrapper) if has_class(wrapper, HEADING_WRAPPER_CLASS) => Some(wrapper),
            _ => Some(heading),
        }
    }
}
