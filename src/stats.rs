//! Point-in-time statistics for an `IntHashMap`.

use core::fmt;

/// Snapshot returned by `IntHashMap::stats`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStats {
    /// Live entries.
    pub len: usize,
    /// Length of the backing arrays.
    pub capacity: usize,
    /// Slots never written since the last rehash (or reclaimed by `delete`).
    pub free_slots: usize,
    /// Slots holding a tombstone.
    pub tombstones: usize,
    /// Shrink when `len` drops below this.
    pub low_water_mark: usize,
    /// Grow when `len` exceeds this.
    pub high_water_mark: usize,
    /// len / capacity
    pub load_factor: f64,
    /// (len + tombstones) / capacity
    pub slot_utilization: f64,
    /// Rehashes over the table's lifetime.
    pub rehashes: u64,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} entries ({:.2}% load), {} free, {} tombstones ({:.2}% used), marks {}..{}, {} rehashes",
            self.len,
            self.capacity,
            self.load_factor * 100.0,
            self.free_slots,
            self.tombstones,
            self.slot_utilization * 100.0,
            self.low_water_mark,
            self.high_water_mark,
            self.rehashes,
        )
    }
}
