//! Configuration for the graph matching search.
//!
//! This module exposes a small, stable surface for consumers (the engine and
//! the command line front end) to parameterize how matching should behave.
//!
//! The three main concepts are:
//! - weights: whether edge weights take part in matching, or only adjacency.
//! - search: whether to stop at the first full mapping, or enumerate all of
//!   them so that symmetric answers are reported faithfully.
//! - step_limit: an optional budget on visited search nodes.
//!
//! Quick examples
//!
//! Unweighted table, every mapping enumerated (default):
//! ```
//! use gmatch_common::Config;
//! let cfg = Config::default();
//! ```
//!
//! Weighted table, first mapping only, bounded search:
//! ```
//! use gmatch_common::{Config, SearchMode, WeightMode};
//! let cfg = Config::builder()
//!     .weights(WeightMode::Weighted)
//!     .search(SearchMode::First)
//!     .step_limit(Some(10_000))
//!     .build();
//! assert_eq!(cfg.search, SearchMode::First);
//! ```

use serde::{Deserialize, Serialize};

/// Global search configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whether edge weights must match exactly or are ignored.
    pub weights: WeightMode,
    /// Whether to stop at the first full mapping or enumerate all of them.
    pub search: SearchMode,
    /// Maximum number of search nodes to visit before aborting.
    pub step_limit: Option<u64>,
}

impl Config {
    /// Create a new configuration.
    pub const fn new(weights: WeightMode, search: SearchMode, step_limit: Option<u64>) -> Self {
        Self {
            weights,
            search,
            step_limit,
        }
    }

    /// Start building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Convenience: weighted matching, all mappings, no step limit.
    pub const fn weighted() -> Self {
        Self::new(WeightMode::Weighted, SearchMode::All, None)
    }

    /// Convenience: unweighted matching, all mappings, no step limit.
    pub const fn unweighted() -> Self {
        Self::new(WeightMode::Unweighted, SearchMode::All, None)
    }
}

impl Default for Config {
    /// Unweighted, all mappings, unbounded.
    fn default() -> Self {
        Self::unweighted()
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the weight mode.
    #[must_use]
    pub fn weights(mut self, weights: WeightMode) -> Self {
        self.config.weights = weights;
        self
    }

    /// Set the search mode.
    #[must_use]
    pub fn search(mut self, search: SearchMode) -> Self {
        self.config.search = search;
        self
    }

    /// Set (or clear) the step limit.
    #[must_use]
    pub fn step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.config.step_limit = step_limit;
        self
    }

    /// Finish building.
    pub fn build(self) -> Config {
        self.config
    }
}

/// Control whether edge weights take part in matching.
///
/// - Unweighted:
///     Only adjacency is compared. Weights present in either graph are
///     ignored by signatures, pruning and search.
/// - Weighted:
///     Every mapped edge must carry exactly the same weight in both graphs,
///     and the global weight multisets must agree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightMode {
    /// Compare adjacency only.
    #[default]
    Unweighted,
    /// Compare adjacency and exact edge weights.
    Weighted,
}

impl WeightMode {
    /// True when weights must be compared.
    pub const fn is_weighted(self) -> bool {
        matches!(self, Self::Weighted)
    }
}

/// Control how many full mappings the search produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchMode {
    /// Stop as soon as one full mapping is found.
    First,
    /// Enumerate every full mapping.
    #[default]
    All,
}
