//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the path finder, including:
//! - Building HTTP clients with the identifying user agent string
//! - Caching page bodies for the lifetime of the process
//! - Admitting requests through the [`Scheduler`]
//! - Error classification

use crate::config::{validate_fetch_config, Config, FetchConfig, UserAgentConfig};
use crate::crawler::scheduler::Scheduler;
use crate::{FetchError, PathfinderError};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::OnceCell;

/// One cache entry; empty until the first successful fetch of its URL
type CacheSlot = Arc<OnceCell<Arc<str>>>;

/// Snapshot of fetcher activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Requests actually sent over the network
    pub requests: usize,

    /// Fetches answered from the cache
    pub cache_hits: usize,

    /// Requests that ended in a transport error or non-success status
    pub failures: usize,

    /// Requests that had to wait for the rate window
    pub window_waits: usize,

    /// Number of distinct URLs with a cached body
    pub cached_pages: usize,
}

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicUsize,
    cache_hits: AtomicUsize,
    failures: AtomicUsize,
    window_waits: AtomicUsize,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited, caching page fetcher
///
/// The cache and the rate window are owned here and only reachable through
/// `&self`; share the fetcher with `Arc` rather than copying its state.
pub struct Fetcher {
    client: Client,
    scheduler: Scheduler,
    cache: Mutex<HashMap<String, CacheSlot>>,
    counters: Counters,
}

impl Fetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `fetch` - Rate limit and timeout
    /// * `user_agent` - Identification sent with every request
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Ready to fetch
    /// * `Err(PathfinderError)` - Invalid rate limit/timeout or client build failure
    pub fn new(fetch: &FetchConfig, user_agent: &UserAgentConfig) -> Result<Self, PathfinderError> {
        validate_fetch_config(fetch)?;

        let client = build_http_client(user_agent, Duration::from_secs(fetch.timeout_secs))?;

        Ok(Self {
            client,
            scheduler: Scheduler::new(fetch.rate_limit),
            cache: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        })
    }

    /// Creates a fetcher from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, PathfinderError> {
        Self::new(&config.fetch, &config.user_agent)
    }

    /// Fetches a page body
    ///
    /// # Request Flow
    ///
    /// 1. Look up the exact `url` string in the cache; return on hit
    /// 2. Acquire a concurrency slot and pass the rate window
    /// 3. GET the page; store the body on success
    ///
    /// Concurrent calls for the same uncached URL share a single request.
    /// Failures are returned, never cached, and may be retried later.
    pub async fn fetch(&self, url: &str) -> Result<Arc<str>, FetchError> {
        let slot = self.cache_slot(url);

        if let Some(body) = slot.get() {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Cache hit: {}", url);
            return Ok(body.clone());
        }

        let mut issued = false;
        let body = slot
            .get_or_try_init(|| {
                issued = true;
                self.fetch_uncached(url)
            })
            .await?;

        if !issued {
            // Another caller fetched it while we waited
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
        }

        Ok(body.clone())
    }

    /// Returns whether a body for `url` is cached
    pub fn is_cached(&self, url: &str) -> bool {
        self.lock_cache()
            .get(url)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of requests that could start right now without waiting for a
    /// concurrency slot
    pub fn available_slots(&self) -> usize {
        self.scheduler.available_slots()
    }

    /// Returns a snapshot of the activity counters
    pub fn stats(&self) -> FetchStats {
        let cached_pages = self
            .lock_cache()
            .values()
            .filter(|slot| slot.initialized())
            .count();

        FetchStats {
            requests: self.counters.requests.load(Ordering::Relaxed),
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            window_waits: self.counters.window_waits.load(Ordering::Relaxed),
            cached_pages,
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheSlot>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cache slot for `url`, creating an empty one if needed
    fn cache_slot(&self, url: &str) -> CacheSlot {
        self.lock_cache()
            .entry(url.to_string())
            .or_default()
            .clone()
    }

    /// Issues the network request for a cache miss
    async fn fetch_uncached(&self, url: &str) -> Result<Arc<str>, FetchError> {
        let request = self
            .scheduler
            .acquire()
            .await
            .ok_or_else(|| FetchError::SchedulerClosed {
                url: url.to_string(),
            })?;

        if !request.waited.is_zero() {
            self.counters.window_waits.fetch_add(1, Ordering::Relaxed);
        }

        self.counters.requests.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("GET {}", url);

        let result = self.get_body(url).await;
        drop(request);

        if let Err(e) = &result {
            self.counters.failures.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Fetch failed: {}", e);
        }

        result
    }

    async fn get_body(&self, url: &str) -> Result<Arc<str>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(Arc::from(body))
    }
}

/// Maps a transport error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
