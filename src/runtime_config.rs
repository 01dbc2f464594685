//! # Runtime Configuration Module
//!
//! Environment variable-based knobs for the matching engine.
//!
//! ## Environment Variables
//!
//! ### `PARTROUTE_PATTERN_CACHE`
//!
//! `on` (default) memoizes compiled segment patterns by pattern string; `off`
//! compiles every pattern afresh. Any value other than `off`, `false` or `0`
//! keeps the cache on.
//!
//! ### `PARTROUTE_SLOW_MATCH_US`
//!
//! Match attempts slower than this many microseconds are logged at `WARN`.
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use partroute::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Pattern cache enabled: {}", config.pattern_cache);
//! ```

use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;

static CURRENT: Lazy<RuntimeConfig> = Lazy::new(RuntimeConfig::from_env);

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Whether compiled patterns are memoized (default: true)
    pub pattern_cache: bool,
    /// Threshold above which a match attempt is reported as slow
    pub slow_match: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pattern_cache: true,
            slow_match: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Configuration read once per process, on first use.
    #[must_use]
    pub fn current() -> &'static RuntimeConfig {
        &CURRENT
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pattern_cache = match lookup("PARTROUTE_PATTERN_CACHE") {
            Some(val) => !matches!(val.to_ascii_lowercase().as_str(), "off" | "false" | "0"),
            None => true,
        };
        let slow_match_us = lookup("PARTROUTE_SLOW_MATCH_US")
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig {
            pattern_cache,
            slow_match: Duration::from_micros(slow_match_us),
        }
    }
}
