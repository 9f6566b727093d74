//! Fetch statistics reporting

use crate::crawler::FetchStats;

/// Formats fetcher statistics as an indented block
pub fn format_fetch_statistics(stats: &FetchStats) -> String {
    let lookups = stats.requests + stats.cache_hits;
    let hit_rate = if lookups > 0 {
        (stats.cache_hits as f64 / lookups as f64) * 100.0
    } else {
        0.0
    };

    let mut out = String::from("=== Fetch Statistics ===\n");
    out.push_str(&format!("  Network requests: {}\n", stats.requests));
    out.push_str(&format!("  Failed requests: {}\n", stats.failures));
    out.push_str(&format!(
        "  Cache hits: {} ({:.1}% of lookups)\n",
        stats.cache_hits, hit_rate
    ));
    out.push_str(&format!("  Cached pages: {}\n", stats.cached_pages));
    out.push_str(&format!("  Rate window waits: {}\n", stats.window_waits));
    out
}

/// Prints fetcher statistics to stdout
pub fn print_fetch_statistics(stats: &FetchStats) {
    println!();
    print!("{}", format_fetch_statistics(stats));
}
