// IntHashMap property tests against a hashbrown::HashMap model.
//
// Property 1: map semantics under insert/update/remove churn.
//  - Model: hashbrown::HashMap<i32, i32>.
//  - Invariant: after every step `len`, `get`, `value_of`, `contains_key`
//    agree with the model; capacity is a table prime.
//  - Operations: set, remove (with and without deferred shrink), lookup,
//    full iteration.
//  - Removal uses `remove` only: `delete` can strand keys by design, so it
//    has no faithful HashMap model.
//
// Property 2: clones evolve independently.
//  - Invariant: mutating a clone never changes the original's contents.
use hashbrown::HashMap;
use prime_hashmap::{next_prime, IntHashMap, ShrinkPolicy, TableOptions};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Set(i32, i32),
    Remove(i32, bool),
    Get(i32),
    Iterate,
}

fn arb_op() -> impl Strategy<Value = Op> {
    // A narrow key range keeps collisions and re-insertions frequent.
    let key = prop_oneof![4 => -50i32..50, 1 => any::<i32>()];
    prop_oneof![
        5 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => (key.clone(), any::<bool>()).prop_map(|(k, d)| Op::Remove(k, d)),
        2 => key.prop_map(Op::Get),
        1 => Just(Op::Iterate),
    ]
}

proptest! {
    #[test]
    fn prop_matches_hashmap_model(
        initial in 0usize..64,
        ops in proptest::collection::vec(arb_op(), 1..400),
    ) {
        let mut m = IntHashMap::with_options(TableOptions::new().initial_capacity(initial)).unwrap();
        let mut model: HashMap<i32, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    prop_assert_eq!(m.set(k, v), model.insert(k, v).is_none());
                }
                Op::Remove(k, defer) => {
                    let policy = if defer { ShrinkPolicy::Defer } else { ShrinkPolicy::Allow };
                    prop_assert_eq!(m.remove_with(k, policy), model.remove(&k).is_some());
                    prop_assert!(!m.contains_key(k));
                }
                Op::Get(k) => {
                    let expected = model.get(&k).copied();
                    prop_assert_eq!(m.value_of(k), expected);
                    prop_assert_eq!(m.get(k), expected.unwrap_or(0));
                    prop_assert_eq!(m.contains_key(k), expected.is_some());
                }
                Op::Iterate => {
                    let seen: HashMap<i32, i32> = m.iter().collect();
                    prop_assert_eq!(seen.len(), m.len());
                    prop_assert_eq!(&seen, &model);
                }
            }

            prop_assert_eq!(m.len(), model.len());
            prop_assert_eq!(next_prime(m.capacity()), Some(m.capacity()));
            prop_assert!(m.capacity() > m.len());
        }

        for (&k, &v) in &model {
            prop_assert_eq!(m.value_of(k), Some(v));
        }
    }

    #[test]
    fn prop_clone_is_independent(
        base in proptest::collection::vec((-100i32..100, any::<i32>()), 0..200),
        edits in proptest::collection::vec((-100i32..100, any::<i32>()), 1..200),
    ) {
        let original: IntHashMap = base.iter().copied().collect();
        let snapshot: HashMap<i32, i32> = original.iter().collect();

        let mut copy = original.clone();
        for &(k, v) in &edits {
            if v % 2 == 0 {
                copy.set(k, v);
            } else {
                copy.remove(k);
            }
        }

        let after: HashMap<i32, i32> = original.iter().collect();
        prop_assert_eq!(after, snapshot);
    }
}
