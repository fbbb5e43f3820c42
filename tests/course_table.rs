// CourseTable integration suite.
//
// Each test states the behavior under check. The core invariants exercised:
// - Count fidelity: len() and sorted().len() equal the number of distinct
//   identifiers, across resizes.
// - Update: re-inserting an identifier replaces the record in place.
// - Growth: a chain longer than the threshold grows capacity to the next
//   prime at or above twice the old one, before insert returns.
// - Rehash: every record survives a resize with identical content.
// - Clear: empties the table, keeps capacity, repeatable.
use course_catalog::hash::bucket_index;
use course_catalog::{Config, CourseRecord, CourseTable, InsertError};

fn course(id: &str, title: &str, prereqs: &[&str]) -> CourseRecord {
    CourseRecord::new(id, title).with_prerequisites(prereqs.iter().copied())
}

// `n` distinct identifiers that land in one bucket at `capacity`.
fn colliding_ids(capacity: usize, n: usize) -> Vec<String> {
    let target = bucket_index("CSCI000", capacity);
    (0..10_000)
        .map(|i| format!("CSCI{i:03}"))
        .filter(|id| bucket_index(id, capacity) == target)
        .take(n)
        .collect()
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

// Test: two courses with a prerequisite link.
// Verifies: lookup returns the stored title and prerequisite list, and the
// sorted listing orders by identifier.
#[test]
fn two_course_catalog_lookup_and_listing() {
    let mut t = CourseTable::new();
    t.insert(course("CS101", "Intro", &[]));
    t.insert(course("CS201", "Data Structures", &["CS101"]));

    let found = t.get("CS201").expect("CS201 present");
    assert_eq!(found.title, "Data Structures");
    assert_eq!(found.prerequisites, vec!["CS101".to_string()]);

    let ids: Vec<String> = t.sorted().into_iter().map(|r| r.identifier).collect();
    assert_eq!(ids, ["CS101", "CS201"]);
}

// Test: five records sharing one bucket at the initial capacity.
// Verifies: the fifth insert (chain length 5 > 4) resizes exactly once, to
// 67 buckets, and all five stay retrievable.
#[test]
fn five_collisions_resize_once() {
    let ids = colliding_ids(31, 5);
    assert_eq!(ids.len(), 5);

    let mut t = CourseTable::new();
    for (i, id) in ids.iter().enumerate() {
        t.insert(course(id, &format!("Course {i}"), &[]));
        if i < 4 {
            assert_eq!(t.capacity(), 31, "resized before the chain overflowed");
        }
    }
    assert_eq!(t.capacity(), 67);
    assert_eq!(t.len(), 5);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(t.get(id).unwrap().title, format!("Course {i}"));
    }
}

// Test: records present before a resize keep their full content after it.
#[test]
fn rehash_preserves_records() {
    let mut t = CourseTable::new();
    let mut expected = Vec::new();
    let mut capacity = t.capacity();
    let mut resized = false;

    for i in 0..500 {
        let id = format!("MATH{i}");
        let r = course(&id, &format!("Topic {i}"), &["CSCI100", "CSCI101"][..i % 3]);
        let before = expected.clone();
        t.insert(r.clone());
        expected.push(r);

        if t.capacity() != capacity {
            resized = true;
            for old in &before {
                let got = t.get(&old.identifier).expect("lost during rehash");
                assert_eq!(got.title, old.title);
                assert_eq!(got.prerequisites, old.prerequisites);
            }
            capacity = t.capacity();
        }
    }
    assert!(resized, "500 records should outgrow 31 buckets");
    assert_eq!(t.len(), 500);
}

// Test: each resize picks the smallest prime at or above twice the previous
// capacity.
#[test]
fn growth_follows_doubled_next_prime() {
    let mut t = CourseTable::new();
    let mut seen = vec![t.capacity()];
    for i in 0..2_000 {
        t.insert(course(&format!("BIO{i:04}"), "x", &[]));
        let cap = t.capacity();
        if cap != *seen.last().unwrap() {
            let prev = *seen.last().unwrap();
            assert!(is_prime(cap));
            assert!(cap >= 2 * prev);
            assert!((2 * prev..cap).all(|n| !is_prime(n)), "{prev} -> {cap} skipped a prime");
            seen.push(cap);
        }
    }
    assert!(seen.len() > 1);
}

// Test: distinct inserts are counted once each, before and after resizes.
#[test]
fn count_matches_distinct_inserts() {
    let mut t = CourseTable::new();
    for n in 1..=300 {
        t.insert(course(&format!("CHEM{n}"), "x", &[]));
        assert_eq!(t.len(), n);
    }
    assert_eq!(t.sorted().len(), 300);
}

// Test: re-insert of an existing identifier.
// Verifies: title and prerequisites replaced, count unchanged, previous
// record handed back.
#[test]
fn update_overwrites_in_place() {
    let mut t = CourseTable::new();
    t.insert(course("CSCI300", "Algorithms", &["CSCI200"]));
    let prev = t.insert(course("CSCI300", "Intro to Algorithms", &["CSCI200", "MATH201"]));
    assert_eq!(prev.map(|r| r.title), Some("Algorithms".to_string()));
    assert_eq!(t.len(), 1);
    let r = t.get("CSCI300").unwrap();
    assert_eq!(r.title, "Intro to Algorithms");
    assert_eq!(r.prerequisites, vec!["CSCI200", "MATH201"]);
}

#[test]
fn try_insert_is_strict() {
    let mut t = CourseTable::new();
    assert!(t.try_insert(course("CSCI100", "Intro", &[])).is_ok());
    assert_eq!(
        t.try_insert(course("CSCI100", "Other", &[])),
        Err(InsertError::DuplicateKey)
    );
    assert_eq!(t.get("CSCI100").unwrap().title, "Intro");
}

// Test: clear after growth.
// Verifies: len 0, empty listing, every prior identifier absent, capacity
// kept; a second clear is a no-op.
#[test]
fn clear_is_idempotent() {
    let mut t = CourseTable::new();
    let ids: Vec<String> = (0..120).map(|i| format!("PHYS{i}")).collect();
    for id in &ids {
        t.insert(course(id, "x", &[]));
    }
    let capacity = t.capacity();

    t.clear();
    assert_eq!(t.len(), 0);
    assert!(t.is_empty());
    assert!(t.sorted().is_empty());
    assert!(ids.iter().all(|id| t.get(id).is_none()));
    assert_eq!(t.capacity(), capacity);

    t.clear();
    assert_eq!(t.len(), 0);
    assert_eq!(t.capacity(), capacity);
    assert!(t.iter().next().is_none());
}

#[test]
fn custom_config_is_respected() {
    let t = CourseTable::with_config(Config::new().initial_capacity(10).max_chain_len(2));
    assert_eq!(t.capacity(), 11);
    assert_eq!(t.chain_threshold(), 2);
}

#[test]
fn collect_and_extend() {
    let mut t: CourseTable = ["A100", "B200"]
        .into_iter()
        .map(|id| course(id, "x", &[]))
        .collect();
    t.extend([course("C300", "y", &[]), course("A100", "z", &[])]);
    assert_eq!(t.len(), 3);
    assert_eq!(t.get("A100").unwrap().title, "z");
}
