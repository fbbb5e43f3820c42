#![cfg(test)]

// Property tests for CourseTable kept inside the crate so they can check the
// chain structure directly, not just the public surface.

use crate::config::Config;
use crate::course_table::CourseTable;
use crate::error::InsertError;
use crate::prime::next_prime;
use crate::record::CourseRecord;
use proptest::prelude::*;
use std::collections::BTreeMap;

// Pool-indexed operations so shrinking moves towards earlier identifiers and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, u8),
    TryInsert(usize, u8),
    Get(usize),
    Clear,
    Snapshot,
}

fn record_from(pool: &[String], i: usize, version: u8) -> CourseRecord {
    CourseRecord::new(pool[i].clone(), format!("title v{version}"))
        .with_prerequisites((0..version % 3).map(|p| format!("PRE{p}0")))
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[A-Z]{2,4}[0-9]{1,3}", 1..=64).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<u8>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => (idx.clone(), any::<u8>()).prop_map(|(i, v)| OpI::TryInsert(i, v)),
            3 => idx.prop_map(OpI::Get),
            1 => Just(OpI::Snapshot),
            1 => Just(OpI::Clear),
        ];
        (Just(pool), proptest::collection::vec(op, 1..200))
    })
}

// Property: the table behaves like an ordered map under any op sequence,
// every stored record sits in the bucket its hash names, and each resize
// moves capacity to the next prime at or above twice the previous one.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), threshold in 1usize..=6) {
        let mut sut = CourseTable::with_config(Config::new().initial_capacity(3).max_chain_len(threshold));
        let mut model: BTreeMap<String, CourseRecord> = BTreeMap::new();

        for op in ops {
            let before = sut.capacity();
            match op {
                OpI::Insert(i, v) => {
                    let r = record_from(&pool, i, v);
                    let prev = sut.insert(r.clone());
                    prop_assert_eq!(prev, model.insert(r.identifier.clone(), r));
                }
                OpI::TryInsert(i, v) => {
                    let r = record_from(&pool, i, v);
                    let already = model.contains_key(&r.identifier);
                    match sut.try_insert(r.clone()) {
                        Ok(()) => {
                            prop_assert!(!already);
                            model.insert(r.identifier.clone(), r);
                        }
                        Err(InsertError::DuplicateKey) => prop_assert!(already),
                    }
                }
                OpI::Get(i) => {
                    prop_assert_eq!(sut.get(&pool[i]), model.get(&pool[i]));
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), before);
                }
                OpI::Snapshot => {
                    let snapshot = sut.sorted();
                    let expected: Vec<CourseRecord> = model.values().cloned().collect();
                    prop_assert_eq!(snapshot, expected);
                }
            }

            let after = sut.capacity();
            prop_assert!(after == before || after == next_prime(before * 2));
            prop_assert_eq!(sut.len(), model.len());
            sut.assert_consistent();
        }

        for (id, r) in &model {
            prop_assert_eq!(sut.get(id), Some(r));
        }
    }
}
