//! Construction-time configuration for `IntHashMap`.

use crate::error::ConfigError;
use crate::primes::{next_prime, SMALLEST_PRIME};

pub const DEFAULT_INITIAL_CAPACITY: usize = 150;
pub const DEFAULT_MIN_LOAD_FACTOR: f64 = 1.0 / 6.0;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 2.0 / 3.0;

/// Sizing and load-factor bounds for a new table.
///
/// `initial_capacity` is a hint in entries, not slots: the table is sized so
/// that many entries fit at `max_load_factor` without a rehash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOptions {
    pub initial_capacity: usize,
    pub min_load_factor: f64,
    pub max_load_factor: f64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            min_load_factor: DEFAULT_MIN_LOAD_FACTOR,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn min_load_factor(mut self, min_load_factor: f64) -> Self {
        self.min_load_factor = min_load_factor;
        self
    }

    pub fn max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Checks the load-factor bounds and that the capacity hint fits below
    /// the prime table's ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.slot_count().map(|_| ())
    }

    /// Number of slots a table built from these options starts with.
    pub(crate) fn slot_count(&self) -> Result<usize, ConfigError> {
        let (min, max) = (self.min_load_factor, self.max_load_factor);
        // Range checks are written so that NaN fails them.
        if !(0.0..1.0).contains(&min) {
            return Err(ConfigError::MinLoadFactor(min));
        }
        if !(max > 0.0 && max < 1.0) {
            return Err(ConfigError::MaxLoadFactor(max));
        }
        if min >= max {
            return Err(ConfigError::LoadFactorOrder { min, max });
        }

        // slots * max_load_factor >= initial_capacity
        let wanted = (self.initial_capacity as f64 / max).ceil();
        if wanted >= usize::MAX as f64 {
            return Err(ConfigError::InitialCapacity(self.initial_capacity));
        }
        let slots = next_prime(wanted as usize)
            .ok_or(ConfigError::InitialCapacity(self.initial_capacity))?;
        debug_assert!(slots >= SMALLEST_PRIME);
        Ok(slots)
    }
}
