//! prime-hashmap: a single-threaded `i32 -> i32` map using open addressing
//! with double hashing, tombstoned deletion and prime capacities.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a compact map with no per-entry allocation. All state lives in
//!   three parallel arrays (keys, values, slot states) of the same prime
//!   length.
//! - Layers:
//!   - `primes`: a static ascending table of primes and `next_prime`, used
//!     for every capacity decision.
//!   - `Slots`: structural layer owning the three arrays and the two probes
//!     (search and insertion). No accounting, no resizing.
//!   - `IntHashMap`: public API. Keeps the live count and the number of
//!     never-written slots, derives water marks from the load-factor bounds
//!     and rehashes when they are crossed.
//!
//! Probing
//! - hash = key & 0x7fff_ffff; start = hash % capacity;
//!   step = max(1, hash % (capacity - 2)). The probe walks backwards by
//!   `step`, wrapping. A prime capacity makes the sequence visit every slot.
//! - Search skips tombstones and stops at the key or at a `Free` slot.
//! - Insertion stops at the first tombstone, keeps searching past it for an
//!   existing copy of the key, and reuses the tombstone if none is found.
//!
//! Constraints
//! - At least one `Free` slot exists whenever a probe runs. Inserting into the
//!   last free slot triggers a rehash, which drops all tombstones.
//! - Capacity is always an entry of `PRIMES`, so never below 3.
//! - Growth past `LARGEST_PRIME` is reported as `CapacityError` by the
//!   `try_*` methods; the plain methods panic like std collections do.
//!
//! Notes and non-goals
//! - Single-threaded; wrap the whole map in a lock for shared use.
//! - `get` returns `0` for missing keys; `value_of` distinguishes.
//! - `remove` leaves a tombstone; `delete` frees the slot immediately, which
//!   can strand keys that probed past it. Both are kept on purpose.
//! - Iteration order is storage order and changes on rehash.

mod error;
mod int_hash_map;
mod int_hash_map_proptest;
mod options;
pub mod primes;
mod slots;
mod stats;

// Public surface
pub use error::{CapacityError, ConfigError};
pub use int_hash_map::{IntHashMap, Iter, ShrinkPolicy};
pub use options::{
    TableOptions, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, DEFAULT_MIN_LOAD_FACTOR,
};
pub use primes::{next_prime, LARGEST_PRIME};
pub use stats::TableStats;
