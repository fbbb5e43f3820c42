// CourseTable property tests (public surface).
//
// Property 1: listing and count match a reference map.
//  - Model: BTreeMap<identifier, record>; last write wins.
//  - Invariant: len() == model.len(); sorted() == model values in key
//    order; every model key resolves to the same record.
//  - Operations: arbitrary insert order, including repeated identifiers.
//
// Property 2: clear forgets everything it held.
//  - Invariant: after clear(), no previously inserted identifier resolves
//    and capacity is unchanged; reinserting a subset works as on a fresh
//    table.
use course_catalog::{CourseRecord, CourseTable};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn arb_record() -> impl Strategy<Value = CourseRecord> {
    (
        "[A-Z]{2,4}[0-9]{3}",
        "[A-Za-z ]{1,20}",
        proptest::collection::vec("[A-Z]{4}[0-9]{3}", 0..3),
    )
        .prop_map(|(id, title, prereqs)| CourseRecord::new(id, title).with_prerequisites(prereqs))
}

proptest! {
    #[test]
    fn prop_sorted_matches_model(records in proptest::collection::vec(arb_record(), 0..400)) {
        let mut t = CourseTable::new();
        let mut model: BTreeMap<String, CourseRecord> = BTreeMap::new();
        for r in records {
            model.insert(r.identifier.clone(), r.clone());
            t.insert(r);
            prop_assert_eq!(t.len(), model.len());
        }

        let sorted = t.sorted();
        prop_assert_eq!(sorted.len(), t.len());
        prop_assert!(sorted.windows(2).all(|w| w[0].identifier <= w[1].identifier));
        let expected: Vec<CourseRecord> = model.values().cloned().collect();
        prop_assert_eq!(&sorted, &expected);

        for (id, r) in &model {
            prop_assert_eq!(t.get(id), Some(r));
        }
    }
}

proptest! {
    #[test]
    fn prop_clear_forgets(
        records in proptest::collection::vec(arb_record(), 1..200),
        keep in 0usize..50,
    ) {
        let mut t: CourseTable = records.iter().cloned().collect();
        let capacity = t.capacity();

        t.clear();
        prop_assert_eq!(t.len(), 0);
        prop_assert_eq!(t.capacity(), capacity);
        for r in &records {
            prop_assert!(t.get(&r.identifier).is_none());
        }

        let subset = &records[..keep.min(records.len())];
        t.extend(subset.iter().cloned());
        let distinct: std::collections::BTreeSet<&str> =
            subset.iter().map(|r| r.identifier.as_str()).collect();
        prop_assert_eq!(t.len(), distinct.len());
    }
}
