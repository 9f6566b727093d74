//! Configuration module for Wiki-Pathfinder
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file is the same as loading an
//! empty one.
//!
//! # Example
//!
//! ```no_run
//! use wiki_pathfinder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pathfinder.toml")).unwrap();
//! println!("Search depth: {}", config.search.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, SearchConfig, SiteConfig, UserAgentConfig, DEFAULT_EXCLUDED_NAMESPACES,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
pub(crate) use validation::validate_fetch_config;
