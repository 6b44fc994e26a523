//! IntHashMap: accounting layer over `Slots`. Tracks the live count and the
//! number of never-written slots, derives water marks from the load-factor
//! bounds, and rehashes to a new prime capacity when a bound is crossed.

use crate::error::{CapacityError, ConfigError};
use crate::options::TableOptions;
use crate::primes::{next_prime, LARGEST_PRIME};
use crate::slots::{Insertion, SlotState, Slots};
use crate::stats::TableStats;
use core::fmt;

/// Whether a removal may shrink the table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ShrinkPolicy {
    /// Rehash down when the live count drops below the low water mark.
    #[default]
    Allow,
    /// Skip the shrink check; useful when removing many keys in a row.
    Defer,
}

/// An `i32 -> i32` map using open addressing with double hashing.
///
/// Storage is three parallel arrays of prime length. Removed keys leave
/// tombstones (`remove`) or free their slot outright (`delete`). Lookups of
/// missing keys return `0`, which is indistinguishable from a stored `0`; use
/// `value_of` when the difference matters.
///
/// ```
/// use prime_hashmap::IntHashMap;
///
/// let mut m = IntHashMap::new();
/// assert!(m.set(1, 5));
/// assert!(!m.set(1, 4));
/// assert_eq!(m.get(1), 4);
/// assert_eq!(m.get(2), 0);
/// assert!(m.remove(1));
/// assert!(m.is_empty());
/// ```
#[derive(Clone)]
pub struct IntHashMap {
    slots: Slots,
    distinct: usize,
    free_entries: usize,
    min_load_factor: f64,
    max_load_factor: f64,
    low_water_mark: usize,
    high_water_mark: usize,
    rehashes: u64,
}

impl IntHashMap {
    /// Empty map with the default options.
    pub fn new() -> Self {
        Self::with_capacity(TableOptions::default().initial_capacity)
    }

    /// Empty map able to hold `capacity` entries before its first rehash.
    ///
    /// # Panics
    ///
    /// Panics if the hint does not fit below the largest supported capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::with_options(TableOptions::new().initial_capacity(capacity)) {
            Ok(m) => m,
            Err(e) => panic!("capacity overflow: {e}"),
        }
    }

    pub fn with_options(options: TableOptions) -> Result<Self, ConfigError> {
        let capacity = options.slot_count()?;
        let mut m = Self {
            slots: Slots::new(capacity),
            distinct: 0,
            free_entries: capacity,
            min_load_factor: options.min_load_factor,
            max_load_factor: options.max_load_factor,
            low_water_mark: 0,
            high_water_mark: 0,
            rehashes: 0,
        };
        m.reset_water_marks();
        // A fresh table keeps its preallocated size until the first rehash.
        m.low_water_mark = 0;
        Ok(m)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.distinct
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Length of the backing arrays; always a prime from `PRIMES`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn min_load_factor(&self) -> f64 {
        self.min_load_factor
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Value stored for `key`, or `0` if absent.
    #[inline]
    pub fn get(&self, key: i32) -> i32 {
        self.value_of(key).unwrap_or(0)
    }

    /// Value stored for `key`, or `None` if absent.
    #[inline]
    pub fn value_of(&self, key: i32) -> Option<i32> {
        self.slots.index_of_key(key).map(|i| self.slots.value(i))
    }

    #[inline]
    pub fn contains_key(&self, key: i32) -> bool {
        self.slots.index_of_key(key).is_some()
    }

    /// Linear scan over live entries.
    pub fn contains_value(&self, value: i32) -> bool {
        self.slots.index_of_value(value).is_some()
    }

    /// Associates `value` with `key`. Returns `true` if the key was new,
    /// `false` if an existing value was overwritten.
    ///
    /// # Panics
    ///
    /// Panics if growing would exceed the largest supported capacity.
    pub fn set(&mut self, key: i32, value: i32) -> bool {
        match self.try_set(key, value) {
            Ok(inserted) => inserted,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like `set`, but reports capacity exhaustion instead of panicking. On
    /// error the map is unchanged.
    pub fn try_set(&mut self, key: i32, value: i32) -> Result<bool, CapacityError> {
        loop {
            let i = match self.slots.index_of_insertion(key) {
                Insertion::Occupied(i) => {
                    self.slots.set_value(i, value);
                    return Ok(false);
                }
                Insertion::Vacant(i) => i,
            };

            if self.distinct > self.high_water_mark {
                let capacity = self.grow_capacity(self.distinct + 1)?;
                self.rehash(capacity);
                continue;
            }

            // Taking the last free slot forces a rehash afterwards; make sure
            // it can happen before touching anything.
            let consumes_free = self.slots.state(i) == SlotState::Free;
            let regrow = if consumes_free && self.free_entries == 1 {
                Some(self.grow_capacity(self.distinct + 2)?)
            } else {
                None
            };

            if self.slots.fill(i, key, value) == SlotState::Free {
                self.free_entries -= 1;
            }
            self.distinct += 1;

            if let Some(capacity) = regrow {
                debug_assert_eq!(self.free_entries, 0);
                self.rehash(capacity);
            }
            return Ok(true);
        }
    }

    /// Removes `key`, leaving a tombstone. Returns whether it was present.
    pub fn remove(&mut self, key: i32) -> bool {
        self.remove_with(key, ShrinkPolicy::Allow)
    }

    pub fn remove_with(&mut self, key: i32, policy: ShrinkPolicy) -> bool {
        self.vacate(key, SlotState::Removed, policy)
    }

    /// Removes `key`, freeing its slot immediately. Returns whether it was
    /// present.
    ///
    /// Unlike `remove` this breaks the probe chain at the freed slot: another
    /// key that collided with `key` and was placed further along the chain
    /// may no longer be found, although it still counts towards `len`.
    pub fn delete(&mut self, key: i32) -> bool {
        self.delete_with(key, ShrinkPolicy::Allow)
    }

    pub fn delete_with(&mut self, key: i32, policy: ShrinkPolicy) -> bool {
        self.vacate(key, SlotState::Free, policy)
    }

    fn vacate(&mut self, key: i32, to: SlotState, policy: ShrinkPolicy) -> bool {
        let Some(i) = self.slots.index_of_key(key) else {
            return false;
        };
        self.slots.vacate(i, to);
        if to == SlotState::Free {
            self.free_entries += 1;
        }
        self.distinct -= 1;

        if policy == ShrinkPolicy::Allow {
            self.maybe_shrink();
        }
        true
    }

    fn maybe_shrink(&mut self) {
        if self.distinct < self.low_water_mark {
            // Never fails: the current capacity is a table prime above the result.
            if let Some(capacity) = self.shrink_capacity(self.distinct) {
                self.rehash(capacity);
            }
        }
    }

    /// Grows the backing arrays to at least `min_capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `min_capacity` exceeds the largest supported capacity.
    pub fn ensure_capacity(&mut self, min_capacity: usize) {
        if let Err(e) = self.try_ensure_capacity(min_capacity) {
            panic!("{e}");
        }
    }

    pub fn try_ensure_capacity(&mut self, min_capacity: usize) -> Result<(), CapacityError> {
        if self.capacity() < min_capacity {
            let capacity = next_prime(min_capacity).ok_or(CapacityError {
                requested: min_capacity,
            })?;
            self.rehash(capacity);
        }
        Ok(())
    }

    /// Calls `f` on every key in storage order until it returns `false`.
    /// Returns whether the traversal ran to completion.
    pub fn for_each_key<F>(&self, mut f: F) -> bool
    where
        F: FnMut(i32) -> bool,
    {
        self.iter().all(|(k, _)| f(k))
    }

    pub fn for_each_value<F>(&self, mut f: F) -> bool
    where
        F: FnMut(i32) -> bool,
    {
        self.iter().all(|(_, v)| f(v))
    }

    pub fn for_each_pair<F>(&self, mut f: F) -> bool
    where
        F: FnMut(i32, i32) -> bool,
    {
        self.iter().all(|(k, v)| f(k, v))
    }

    /// Live `(key, value)` pairs in storage order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: &self.slots,
            pos: 0,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn stats(&self) -> TableStats {
        let capacity = self.capacity();
        let tombstones = capacity - self.distinct - self.free_entries;
        TableStats {
            len: self.distinct,
            capacity,
            free_slots: self.free_entries,
            tombstones,
            low_water_mark: self.low_water_mark,
            high_water_mark: self.high_water_mark,
            load_factor: self.distinct as f64 / capacity as f64,
            slot_utilization: (self.distinct + tombstones) as f64 / capacity as f64,
            rehashes: self.rehashes,
        }
    }

    fn reset_water_marks(&mut self) {
        (self.low_water_mark, self.high_water_mark) =
            water_marks(self.capacity(), self.min_load_factor, self.max_load_factor);
    }

    fn grow_capacity(&self, size: usize) -> Result<usize, CapacityError> {
        let scaled = 4.0 * size as f64 / (3.0 * self.min_load_factor + self.max_load_factor);
        let requested = (size + 1).max(scaled as usize);
        next_prime(requested).ok_or(CapacityError { requested })
    }

    fn shrink_capacity(&self, size: usize) -> Option<usize> {
        let scaled = 4.0 * size as f64 / (self.min_load_factor + 3.0 * self.max_load_factor);
        next_prime((size + 1).max(scaled as usize))
    }

    /// Rebuilds the arrays at `capacity`, dropping tombstones.
    fn rehash(&mut self, capacity: usize) {
        assert!(
            capacity > self.distinct,
            "rehash to {capacity} slots cannot hold {} entries",
            self.distinct
        );

        let old = core::mem::replace(&mut self.slots, Slots::new(capacity));
        self.reset_water_marks();
        self.rehashes += 1;

        let mut live = 0;
        for i in (0..old.capacity()).filter(|&i| old.state(i) == SlotState::Full) {
            let (key, value) = (old.key(i), old.value(i));
            match self.slots.index_of_insertion(key) {
                Insertion::Vacant(j) => {
                    self.slots.fill(j, key, value);
                    live += 1;
                }
                // Only `delete` can strand an older copy of a key behind a
                // freed slot; keep the copy lookups were returning.
                Insertion::Occupied(j) => {
                    if old.index_of_key(key) == Some(i) {
                        self.slots.set_value(j, value);
                    }
                }
            }
        }
        self.distinct = live;
        self.free_entries = capacity - live;
    }

    #[cfg(test)]
    pub(crate) fn slots_for_test(&self) -> &Slots {
        &self.slots
    }
}

/// `(low, high)` entry counts bounding the comfortable size of a table.
fn water_marks(capacity: usize, min_load_factor: f64, max_load_factor: f64) -> (usize, usize) {
    // No larger prime to grow into, so the last table may fill up.
    let max_load_factor = if capacity == LARGEST_PRIME {
        1.0
    } else {
        max_load_factor
    };
    let low = (capacity as f64 * min_load_factor) as usize;
    let high = (capacity - 2).min((capacity as f64 * max_load_factor) as usize);
    (low, high)
}

impl Default for IntHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IntHashMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over live `(key, value)` pairs of an `IntHashMap`.
pub struct Iter<'a> {
    slots: &'a Slots,
    pos: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i32, i32);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.slots.capacity() {
            let i = self.pos;
            self.pos += 1;
            if self.slots.state(i) == SlotState::Full {
                return Some((self.slots.key(i), self.slots.value(i)));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.capacity() - self.pos))
    }
}

impl<'a> IntoIterator for &'a IntHashMap {
    type Item = (i32, i32);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<(i32, i32)> for IntHashMap {
    fn extend<I: IntoIterator<Item = (i32, i32)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl FromIterator<(i32, i32)> for IntHashMap {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}
