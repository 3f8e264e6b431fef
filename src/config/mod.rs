//! Ruleset loading and management for the HOS compliance engine.
//!
//! This module loads Hours-of-Service limits from YAML files, so the engine
//! can be pointed at a ruleset directory instead of the built-in FMCSA values.
//!
//! # Example
//!
//! ```no_run
//! use hos_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/fmcsa_property").unwrap();
//! println!("Loaded ruleset: {}", config.ruleset().name);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, validate_limits};
pub use types::{RulesetConfig, RulesetMetadata};
