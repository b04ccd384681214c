//! Configuration module for Outline-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a default, so a run needs no config file at all;
//! CLI flags override whatever was loaded.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, RenderConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation for CLI overrides applied after loading
pub use validation::validate;
