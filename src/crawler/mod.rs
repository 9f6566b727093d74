//! Crawler module: fetching pages and searching the article graph
//!
//! This module contains the core search logic, including:
//! - Rate-limited, cached HTTP fetching
//! - Article link extraction from page HTML
//! - Request admission (concurrency and sliding-window rate limits)
//! - Breadth-first path search

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{PathFinder, PathResult};
pub use fetcher::{build_http_client, FetchStats, Fetcher};
pub use parser::ArticleExtractor;
pub use scheduler::{RateWindow, RequestSlot, Scheduler, WINDOW_SPAN};
