//! Error types surfaced by `IntHashMap`.

use crate::primes::LARGEST_PRIME;
use thiserror::Error;

/// Rejected construction parameters. A table is never built from options
/// that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// The initial capacity hint cannot be satisfied below `LARGEST_PRIME`
    /// at the requested max load factor.
    #[error("initial capacity too large: {0}")]
    InitialCapacity(usize),
    /// `min_load_factor` must lie in `[0, 1)`.
    #[error("invalid min_load_factor: {0}")]
    MinLoadFactor(f64),
    /// `max_load_factor` must lie in `(0, 1)`.
    #[error("invalid max_load_factor: {0}")]
    MaxLoadFactor(f64),
    /// `min_load_factor` must be strictly smaller than `max_load_factor`.
    #[error("min_load_factor ({min}) must be smaller than max_load_factor ({max})")]
    LoadFactorOrder { min: f64, max: f64 },
}

/// A resize asked for more slots than the prime table can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capacity overflow: {requested} slots requested, at most {} supported", LARGEST_PRIME)]
pub struct CapacityError {
    /// Minimum number of slots the resize needed.
    pub requested: usize,
}
