#![cfg(test)]

// Property tests for IntHashMap kept inside the crate so they can inspect
// the slot arrays and the accounting fields directly.

use crate::int_hash_map::{IntHashMap, ShrinkPolicy};
use crate::options::TableOptions;
use crate::primes::PRIMES;
use crate::slots::SlotState;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations so shrinking moves towards earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum Op {
    Set(usize, i32),
    Remove(usize, bool),
    Delete(usize, bool),
    Get(usize),
    ContainsValue(i32),
    EnsureCapacity(usize),
    Iterate,
}

fn policy(defer: bool) -> ShrinkPolicy {
    if defer {
        ShrinkPolicy::Defer
    } else {
        ShrinkPolicy::Allow
    }
}

// Small keys collide constantly in small tables; arbitrary keys cover the
// sign-bit masking.
fn arb_key() -> impl Strategy<Value = i32> {
    prop_oneof![3 => 0i32..64, 1 => any::<i32>()]
}

fn arb_options() -> impl Strategy<Value = TableOptions> {
    (0usize..40, 0.0f64..0.3, 0.4f64..0.95).prop_map(|(cap, min, max)| {
        TableOptions::new()
            .initial_capacity(cap)
            .min_load_factor(min)
            .max_load_factor(max)
    })
}

fn arb_scenario(with_delete: bool) -> impl Strategy<Value = (TableOptions, Vec<i32>, Vec<Op>)> {
    (arb_options(), proptest::collection::vec(arb_key(), 1..=48)).prop_flat_map(
        move |(options, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                6 => (idx.clone(), -3i32..3).prop_map(|(i, v)| Op::Set(i, v)),
                3 => (idx.clone(), any::<bool>()).prop_map(|(i, d)| Op::Remove(i, d)),
                2 => (idx.clone(), any::<bool>()).prop_map(move |(i, d)| {
                    if with_delete { Op::Delete(i, d) } else { Op::Remove(i, d) }
                }),
                2 => idx.clone().prop_map(Op::Get),
                1 => (-3i32..3).prop_map(Op::ContainsValue),
                1 => (0usize..200).prop_map(Op::EnsureCapacity),
                1 => Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..200).prop_map(move |ops| (options, pool.clone(), ops))
        },
    )
}

// Accounting invariants that hold no matter which removal variant ran.
fn check_structure(m: &IntHashMap) -> Result<(), TestCaseError> {
    let s = m.stats();
    prop_assert!(PRIMES.iter().any(|&p| p as usize == s.capacity), "capacity {} not a table prime", s.capacity);
    prop_assert_eq!(s.len, m.slots_for_test().count(SlotState::Full));
    prop_assert_eq!(s.free_slots, m.slots_for_test().count(SlotState::Free));
    prop_assert_eq!(s.tombstones, m.slots_for_test().count(SlotState::Removed));
    prop_assert!(s.free_slots >= 1, "no free slot left for probing");
    prop_assert!(s.high_water_mark <= s.capacity - 2);
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `set` reports insert-vs-update exactly as the model does.
// - `get`/`value_of`/`contains_key` agree with the model for pool keys.
// - `iter` yields each live entry exactly once.
// - Capacity stays prime and the free/tombstone accounting matches the slots.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((options, pool, ops) in arb_scenario(false)) {
        let mut sut = IntHashMap::with_options(options).unwrap();
        let mut model: HashMap<i32, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(i, v) => {
                    let k = pool[i];
                    let inserted = sut.set(k, v);
                    prop_assert_eq!(inserted, model.insert(k, v).is_none());
                }
                Op::Remove(i, defer) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.remove_with(k, policy(defer)), model.remove(&k).is_some());
                }
                Op::Delete(..) => unreachable!(),
                Op::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.value_of(k), model.get(&k).copied());
                    prop_assert_eq!(sut.get(k), model.get(&k).copied().unwrap_or(0));
                }
                Op::ContainsValue(v) => {
                    prop_assert_eq!(sut.contains_value(v), model.values().any(|&mv| mv == v));
                }
                Op::EnsureCapacity(n) => {
                    let before = sut.capacity();
                    sut.ensure_capacity(n);
                    prop_assert!(sut.capacity() >= n);
                    prop_assert!(sut.capacity() >= before);
                }
                Op::Iterate => {
                    let mut seen: HashMap<i32, i32> = HashMap::new();
                    for (k, v) in sut.iter() {
                        prop_assert!(seen.insert(k, v).is_none(), "key {} yielded twice", k);
                    }
                    prop_assert_eq!(&seen, &model);
                }
            }

            check_structure(&sut)?;
            prop_assert_eq!(sut.len(), model.len());
            for (&k, &v) in &model {
                prop_assert_eq!(sut.value_of(k), Some(v));
            }
        }
    }
}

// Property: with `delete` in the mix keys may become unreachable, but the
// slot accounting must stay exact and probes must still terminate.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_accounting_with_delete((options, pool, ops) in arb_scenario(true)) {
        let mut sut = IntHashMap::with_options(options).unwrap();

        for op in ops {
            match op {
                Op::Set(i, v) => {
                    let k = pool[i];
                    sut.set(k, v);
                    prop_assert_eq!(sut.value_of(k), Some(v));
                }
                Op::Remove(i, defer) => {
                    let k = pool[i];
                    let found = sut.contains_key(k);
                    prop_assert_eq!(sut.remove_with(k, policy(defer)), found);
                }
                Op::Delete(i, defer) => {
                    let k = pool[i];
                    let found = sut.contains_key(k);
                    let before = sut.len();
                    prop_assert_eq!(sut.delete_with(k, policy(defer)), found);
                    prop_assert_eq!(sut.len(), before - usize::from(found));
                }
                Op::Get(i) => {
                    let _ = sut.get(pool[i]);
                }
                Op::ContainsValue(v) => {
                    prop_assert_eq!(sut.contains_value(v), sut.values().any(|sv| sv == v));
                }
                Op::EnsureCapacity(n) => {
                    sut.ensure_capacity(n);
                    prop_assert!(sut.capacity() >= n);
                }
                Op::Iterate => {
                    prop_assert_eq!(sut.iter().count(), sut.len());
                }
            }
            check_structure(&sut)?;
        }
    }
}

// Property: a rehash keeps exactly the live entries.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_rehash_preserves_entries(
        entries in proptest::collection::hash_map(any::<i32>(), any::<i32>(), 0..300),
        extra in 0usize..5000,
    ) {
        let mut sut = IntHashMap::with_capacity(0);
        sut.extend(entries.iter().map(|(&k, &v)| (k, v)));
        let before: HashMap<i32, i32> = sut.iter().collect();
        prop_assert_eq!(&before, &entries);

        sut.ensure_capacity(sut.capacity() + extra);
        let after: HashMap<i32, i32> = sut.iter().collect();
        prop_assert_eq!(&after, &entries);
        check_structure(&sut)?;
    }
}
