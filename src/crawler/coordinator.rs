//! Path finder - breadth-first search over the article graph
//!
//! This module contains the search loop that coordinates:
//! - Canonicalizing the endpoints
//! - Managing the FIFO frontier and the visited set
//! - Fetching, extracting and normalizing links per dequeued article
//! - Enforcing the depth bound

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::ArticleExtractor;
use crate::url::normalize_url;
use crate::PathfinderError;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use url::Url;

/// Outcome of a one-directional search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResult {
    /// Canonical article URLs from start to target, both inclusive
    Found(Vec<String>),

    /// The target was not reached within `max_depth` articles
    NotFound {
        /// The depth bound that was exhausted
        max_depth: usize,
    },
}

impl PathResult {
    /// Returns the path if one was found
    pub fn path(&self) -> Option<&[String]> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound { .. } => None,
        }
    }

    /// Returns true if a path was found
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

/// A frontier entry: an article and the path that reached it
#[derive(Debug)]
struct SearchNode {
    url: String,
    path: Vec<String>,
}

/// Breadth-first path finder
pub struct PathFinder {
    fetcher: Arc<Fetcher>,
    extractor: ArticleExtractor,
    max_depth: usize,
}

impl PathFinder {
    /// Creates a path finder
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Shared fetcher; its cache outlives individual searches
    /// * `extractor` - Link extractor for the site layout
    /// * `max_depth` - Maximum number of articles on an expanded path
    pub fn new(fetcher: Arc<Fetcher>, extractor: ArticleExtractor, max_depth: usize) -> Self {
        Self {
            fetcher,
            extractor,
            max_depth,
        }
    }

    /// Creates a path finder with its own fetcher from the configuration
    pub fn from_config(config: &Config) -> Result<Self, PathfinderError> {
        let fetcher = Arc::new(Fetcher::from_config(config)?);
        let extractor = ArticleExtractor::new(&config.site)?;
        Ok(Self::new(fetcher, extractor, config.search.max_depth))
    }

    /// Overrides the depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The depth bound
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The fetcher used by this finder
    pub fn fetcher(&self) -> &Arc<Fetcher> {
        &self.fetcher
    }

    /// Searches for a link path from `start` to `target`
    ///
    /// Articles are expanded in FIFO order, so the first path found is of
    /// minimal length given that no article is enqueued twice. Paths holding
    /// more than `max_depth` articles are never expanded; the returned path
    /// may be one longer, since the target itself is never expanded.
    ///
    /// Fetch failures and unparseable pages are dead ends, not errors.
    pub async fn find_path(&self, start: &str, target: &str) -> PathResult {
        let start = normalize_url(start);
        let target = normalize_url(target);

        if start == target {
            return PathResult::Found(vec![start]);
        }

        let mut visited = HashSet::from([start.clone()]);
        let mut frontier = VecDeque::from([SearchNode {
            url: start.clone(),
            path: vec![start],
        }]);

        while let Some(node) = frontier.pop_front() {
            let depth = node.path.len();

            if depth > self.max_depth {
                tracing::debug!("Depth bound reached, skipping {}", node.url);
                continue;
            }

            tracing::info!("Processing: {} (depth: {})", node.url, depth);

            let body = match self.fetcher.fetch(&node.url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("{}", e);
                    continue;
                }
            };

            let base_url = match Url::parse(&node.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Cannot resolve links of {}: {}", node.url, e);
                    continue;
                }
            };

            // Sorted so the first-found path does not depend on hash order
            let mut links: Vec<String> = self
                .extractor
                .extract_links(&body, &base_url)
                .into_iter()
                .map(|link| normalize_url(&link))
                .collect();
            links.sort();
            links.dedup();

            tracing::debug!("{} article links on {}", links.len(), node.url);

            for link in links {
                if link == target {
                    let mut path = node.path;
                    path.push(link);
                    tracing::info!("Found path of {} articles", path.len());
                    return PathResult::Found(path);
                }

                if depth < self.max_depth && visited.insert(link.clone()) {
                    let mut path = node.path.clone();
                    path.push(link.clone());
                    frontier.push_back(SearchNode { url: link, path });
                }
            }
        }

        tracing::info!(
            "Frontier exhausted: {} not reachable within {} hops ({} articles seen)",
            target,
            self.max_depth,
            visited.len()
        );

        PathResult::NotFound {
            max_depth: self.max_depth,
        }
    }

    /// Searches in both directions, one after the other
    ///
    /// The two searches are independent: a path found in one direction does
    /// not shorten or skip the other, and frontiers are not shared. Only the
    /// fetch cache carries over.
    pub async fn find_bidirectional_path(&self, from: &str, to: &str) -> (PathResult, PathResult) {
        tracing::info!("Searching path from {} to {}", from, to);
        let forward = self.find_path(from, to).await;

        tracing::info!("Searching path from {} to {}", to, from);
        let backward = self.find_path(to, from).await;

        (forward, backward)
    }
}
