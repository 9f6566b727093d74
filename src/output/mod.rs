//! Output module for presenting search results
//!
//! This module handles:
//! - Formatting found paths and not-found messages
//! - Reporting fetch statistics

mod format;
mod stats;

pub use format::{format_path, format_result, format_results, print_results};
pub use stats::{format_fetch_statistics, print_fetch_statistics};
