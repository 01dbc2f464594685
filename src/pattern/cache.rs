//! Read-through cache of compiled segment patterns.
//!
//! The same pattern string always compiles to the same token tree, so the
//! result is shared behind an `Arc`. Population is lock-free per shard via
//! `DashMap`; two threads racing on the same new pattern may both compile it,
//! and whichever insert lands first is kept.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::Pattern;
use crate::error::RouteError;
use crate::runtime_config::RuntimeConfig;

static GLOBAL: Lazy<PatternCache> =
    Lazy::new(|| PatternCache::new(RuntimeConfig::current().pattern_cache));

/// Concurrent pattern cache keyed by pattern string.
#[derive(Debug)]
pub struct PatternCache {
    entries: DashMap<String, Arc<Pattern>>,
    enabled: bool,
}

impl PatternCache {
    /// Create a cache. With `enabled == false` every lookup compiles afresh.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        info!(enabled = enabled, "Initializing segment pattern cache");
        Self {
            entries: DashMap::new(),
            enabled,
        }
    }

    /// Process-wide cache, configured from `PARTROUTE_PATTERN_CACHE`.
    #[must_use]
    pub fn global() -> &'static PatternCache {
        &GLOBAL
    }

    /// Return the cached compilation of `source`, compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates [`RouteError::Syntax`] from [`Pattern::parse`]. Failed
    /// compilations are not cached.
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<Pattern>, RouteError> {
        if !self.enabled {
            return Pattern::parse(source).map(Arc::new);
        }

        if let Some(hit) = self.entries.get(source) {
            debug!(pattern = %source, "Segment pattern cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        let compiled = Arc::new(Pattern::parse(source)?);
        let entry = self
            .entries
            .entry(source.to_string())
            .or_insert_with(|| Arc::clone(&compiled));
        debug!(
            pattern = %source,
            cache_size = self.entries.len(),
            "Segment pattern compiled and cached"
        );
        Ok(Arc::clone(entry.value()))
    }

    /// Number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pattern has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached pattern.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
