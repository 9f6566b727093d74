use crate::config::types::{Config, FetchConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use regex::Regex;
use scraper::Selector;

/// Upper bound on the request rate; anything above is not polite
const MAX_RATE_LIMIT: usize = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    // Any max_depth is valid: 0 finds nothing but the trivial path
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_site_config(&config.site)?;
    Ok(())
}

/// Validates fetch configuration
pub(crate) fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.rate_limit < 1 || config.rate_limit > MAX_RATE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "rate_limit must be between 1 and {}, got {}",
            MAX_RATE_LIMIT, config.rate_limit
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters, '-' and '_', got '{}'",
            config.name
        )));
    }

    Ok(())
}

/// Validates site layout configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let prefix = &config.article_prefix;
    if prefix.len() < 2 || !prefix.starts_with('/') || !prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "article_prefix must start and end with '/', got '{}'",
            prefix
        )));
    }

    if config.excluded_namespaces.iter().any(|ns| ns.is_empty()) {
        return Err(ConfigError::InvalidPattern(
            "excluded namespace cannot be empty".to_string(),
        ));
    }

    validate_selector(&config.content_selector)?;
    validate_selector(&config.narrative_selector)?;

    for class in &config.excluded_box_classes {
        validate_class_name(class)?;
    }

    Regex::new(&config.references_heading_pattern).map_err(|e| {
        ConfigError::InvalidPattern(format!(
            "references_heading_pattern '{}': {}",
            config.references_heading_pattern, e
        ))
    })?;

    Ok(())
}

/// Checks that a CSS selector compiles
fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidPattern(format!("selector '{}': {:?}", selector, e)))
}

/// Checks that a class name can be used as a `.class` selector
fn validate_class_name(class: &str) -> Result<(), ConfigError> {
    if class.is_empty()
        || !class
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "box class '{}' must be a plain class name",
            class
        )));
    }
    Ok(())
}
