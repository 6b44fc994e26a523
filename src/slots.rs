//! Slots: structural layer holding the three parallel arrays and the
//! double-hashing probes. It knows nothing about load factors or resizing;
//! callers keep the accounting and guarantee that at least one slot is
//! `Free` before probing.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SlotState {
    /// Never written since the last rehash, or reclaimed by `delete`.
    Free,
    Full,
    /// Tombstone: skipped by lookups so probe chains through it stay intact.
    Removed,
}

/// Result of the insertion probe.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Insertion {
    /// Key absent; write it at this `Free` or `Removed` index.
    Vacant(usize),
    /// Key already stored at this index.
    Occupied(usize),
}

#[inline(always)]
fn hash(key: i32) -> usize {
    (key as u32 & 0x7fff_ffff) as usize
}

#[derive(Clone, Debug)]
pub(crate) struct Slots {
    keys: Vec<i32>,
    values: Vec<i32>,
    states: Vec<SlotState>,
}

impl Slots {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            keys: vec![0; capacity],
            values: vec![0; capacity],
            states: vec![SlotState::Free; capacity],
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub(crate) fn state(&self, i: usize) -> SlotState {
        self.states[i]
    }

    #[inline]
    pub(crate) fn key(&self, i: usize) -> i32 {
        self.keys[i]
    }

    #[inline]
    pub(crate) fn value(&self, i: usize) -> i32 {
        self.values[i]
    }

    #[inline]
    pub(crate) fn set_value(&mut self, i: usize, value: i32) {
        debug_assert_eq!(self.states[i], SlotState::Full);
        self.values[i] = value;
    }

    /// Writes a live entry at `i` and returns the state the slot had before.
    pub(crate) fn fill(&mut self, i: usize, key: i32, value: i32) -> SlotState {
        let prev = self.states[i];
        debug_assert_ne!(prev, SlotState::Full);
        self.keys[i] = key;
        self.values[i] = value;
        self.states[i] = SlotState::Full;
        prev
    }

    /// Marks the live entry at `i` as `Removed` or `Free`.
    pub(crate) fn vacate(&mut self, i: usize, to: SlotState) {
        debug_assert_eq!(self.states[i], SlotState::Full);
        debug_assert_ne!(to, SlotState::Full);
        self.states[i] = to;
    }

    /// Start index and step of the probe sequence for `key`.
    ///
    /// With a prime capacity and `0 < step < capacity` the sequence visits
    /// every slot before repeating.
    #[inline(always)]
    fn probe_start(&self, key: i32) -> (usize, usize) {
        let len = self.capacity();
        let h = hash(key);
        let step = if len > 2 { h % (len - 2) } else { 0 };
        (h % len, step.max(1))
    }

    #[inline(always)]
    fn probe_next(&self, i: usize, step: usize) -> usize {
        if i >= step {
            i - step
        } else {
            i + self.capacity() - step
        }
    }

    /// Search probe. Walks over tombstones and mismatching keys until it hits
    /// the key or a `Free` slot.
    pub(crate) fn index_of_key(&self, key: i32) -> Option<usize> {
        let (mut i, step) = self.probe_start(key);
        loop {
            match self.states[i] {
                SlotState::Free => return None,
                SlotState::Full if self.keys[i] == key => return Some(i),
                _ => i = self.probe_next(i, step),
            }
        }
    }

    /// Insertion probe. Stops at the first slot that is not a mismatching live
    /// entry. If that slot is a tombstone, keeps searching past it for the key
    /// and falls back to recycling the tombstone when the key is absent.
    pub(crate) fn index_of_insertion(&self, key: i32) -> Insertion {
        let (mut i, step) = self.probe_start(key);
        while self.states[i] == SlotState::Full && self.keys[i] != key {
            i = self.probe_next(i, step);
        }

        match self.states[i] {
            SlotState::Full => Insertion::Occupied(i),
            SlotState::Free => Insertion::Vacant(i),
            SlotState::Removed => {
                let tombstone = i;
                while self.states[i] != SlotState::Free
                    && (self.states[i] == SlotState::Removed || self.keys[i] != key)
                {
                    i = self.probe_next(i, step);
                }
                if self.states[i] == SlotState::Free {
                    Insertion::Vacant(tombstone)
                } else {
                    Insertion::Occupied(i)
                }
            }
        }
    }

    /// First index holding `value` in a live slot.
    pub(crate) fn index_of_value(&self, value: i32) -> Option<usize> {
        self.states
            .iter()
            .zip(&self.values)
            .position(|(&s, &v)| s == SlotState::Full && v == value)
    }

    #[cfg(test)]
    pub(crate) fn count(&self, state: SlotState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keys `a` and `a + cap` share a start slot; the second one lands one
    // step further along the chain.
    fn colliding_pair(slots: &Slots, a: i32) -> (i32, i32) {
        (a, a + slots.capacity() as i32)
    }

    fn insert(slots: &mut Slots, key: i32, value: i32) -> usize {
        match slots.index_of_insertion(key) {
            Insertion::Vacant(i) => {
                slots.fill(i, key, value);
                i
            }
            Insertion::Occupied(i) => panic!("{key} already at {i}"),
        }
    }

    #[test]
    fn hash_masks_sign_bit() {
        assert_eq!(hash(5), 5);
        assert_eq!(hash(-1), 0x7fff_ffff);
        assert_eq!(hash(i32::MIN), 0);
    }

    #[test]
    fn empty_table_misses() {
        let slots = Slots::new(11);
        assert_eq!(slots.index_of_key(3), None);
        assert_eq!(slots.index_of_insertion(3), Insertion::Vacant(3));
    }

    #[test]
    fn probe_reaches_every_slot() {
        let slots = Slots::new(13);
        for key in [0, 1, 7, 12, 25, 1_000_003, -9] {
            let (start, step) = slots.probe_start(key);
            let mut seen = vec![false; slots.capacity()];
            let mut i = start;
            for _ in 0..slots.capacity() {
                seen[i] = true;
                i = slots.probe_next(i, step);
            }
            assert!(seen.iter().all(|&s| s), "key {key} skips slots");
        }
    }

    #[test]
    fn collision_walks_chain() {
        let mut slots = Slots::new(11);
        let (a, b) = colliding_pair(&slots, 4);
        let ia = insert(&mut slots, a, 1);
        let ib = insert(&mut slots, b, 2);
        assert_ne!(ia, ib);
        assert_eq!(slots.index_of_key(a), Some(ia));
        assert_eq!(slots.index_of_key(b), Some(ib));
        assert_eq!(slots.index_of_insertion(b), Insertion::Occupied(ib));
    }

    #[test]
    fn tombstone_keeps_chain_and_free_severs_it() {
        let mut slots = Slots::new(11);
        let (a, b) = colliding_pair(&slots, 4);
        let ia = insert(&mut slots, a, 1);
        let ib = insert(&mut slots, b, 2);

        slots.vacate(ia, SlotState::Removed);
        assert_eq!(slots.index_of_key(a), None);
        assert_eq!(slots.index_of_key(b), Some(ib));

        // Reinserting b finds it past the tombstone instead of duplicating it.
        assert_eq!(slots.index_of_insertion(b), Insertion::Occupied(ib));
        // An absent key with the same start recycles the tombstone.
        let c = b + slots.capacity() as i32;
        assert_eq!(slots.index_of_insertion(c), Insertion::Vacant(ia));

        slots.states[ia] = SlotState::Full;
        slots.vacate(ia, SlotState::Free);
        assert_eq!(slots.index_of_key(b), None);
    }

    #[test]
    fn value_scan_ignores_dead_slots() {
        let mut slots = Slots::new(7);
        let i = insert(&mut slots, 1, 42);
        insert(&mut slots, 2, 43);
        assert_eq!(slots.index_of_value(42), Some(i));
        slots.vacate(i, SlotState::Removed);
        assert_eq!(slots.index_of_value(42), None);
        assert_eq!(slots.index_of_value(0), None);
        assert_eq!(slots.count(SlotState::Removed), 1);
        assert_eq!(slots.count(SlotState::Free), 5);
    }
}
