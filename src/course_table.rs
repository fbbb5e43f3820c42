//! CourseTable: chained hash table of course records with prime sizing and
//! load-triggered rehash.

use crate::config::Config;
use crate::error::InsertError;
use crate::hash::{bucket_index, poly_hash};
use crate::prime::next_prime;
use crate::record::CourseRecord;
use core::mem;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of an overflow node.
    struct ChainKey;
}

#[derive(Debug)]
struct Node {
    record: CourseRecord,
    next: Option<ChainKey>, // successor owned by this node
}

impl Node {
    fn new(record: CourseRecord) -> Self {
        Self { record, next: None }
    }
}

/// Head of a bucket. Occupancy is the variant, never a sentinel key.
#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Occupied(Node),
}

/// Where `place` put a record.
enum Placement {
    Head,
    Updated(CourseRecord),
    Appended { bucket: usize, chain_len: usize },
}

/// Chained hash table keyed by course identifier.
///
/// Each bucket holds an inline head slot; overflow nodes live in an arena
/// and each is referenced by exactly one predecessor. When an insert grows a
/// chain beyond the configured threshold the table doubles to the next
/// prime capacity and every record is rehashed before the insert returns.
#[derive(Debug)]
pub struct CourseTable {
    buckets: Vec<Slot>,
    nodes: SlotMap<ChainKey, Node>, // overflow storage, reachable only through chains
    len: usize,
    max_chain_len: usize,
}

impl CourseTable {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_buckets(next_prime(config.initial_capacity), config.max_chain_len.max(1))
    }

    fn with_buckets(capacity: usize, max_chain_len: usize) -> Self {
        debug_assert!(crate::prime::is_prime(capacity));
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Slot::default);
        Self {
            buckets,
            nodes: SlotMap::with_key(),
            len: 0,
            max_chain_len,
        }
    }

    /// Number of distinct identifiers stored.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count. Always prime.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn chain_threshold(&self) -> usize {
        self.max_chain_len
    }

    /// Length of the longest chain, head included. Walks every bucket.
    pub fn longest_chain(&self) -> usize {
        self.buckets
            .iter()
            .map(|slot| self.chain(slot).count())
            .max()
            .unwrap_or(0)
    }

    /// Inserts `record`, or replaces the stored record with the same
    /// identifier and returns it.
    ///
    /// A fresh insert that lengthens its chain beyond the threshold resizes
    /// the table before returning.
    pub fn insert(&mut self, record: CourseRecord) -> Option<CourseRecord> {
        match self.place(record) {
            Placement::Head => None,
            Placement::Updated(previous) => Some(previous),
            Placement::Appended { bucket, chain_len } => {
                if chain_len > self.max_chain_len {
                    log::debug!(
                        "chain length {chain_len} at bucket {bucket} exceeds threshold {}",
                        self.max_chain_len
                    );
                    self.grow(bucket);
                }
                None
            }
        }
    }

    /// Inserts `record` only if its identifier is absent.
    pub fn try_insert(&mut self, record: CourseRecord) -> Result<(), InsertError> {
        if self.contains_key(&record.identifier) {
            return Err(InsertError::DuplicateKey);
        }
        self.insert(record);
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Option<&CourseRecord> {
        let head = &self.buckets[bucket_index(identifier, self.capacity())];
        self.chain(head).find(|r| r.identifier == identifier)
    }

    pub fn contains_key(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    /// Clones of every record, ordered by identifier (byte-wise ascending).
    pub fn sorted(&self) -> Vec<CourseRecord> {
        let mut all: Vec<CourseRecord> = self.iter().cloned().collect();
        all.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        all
    }

    /// Drops every record. The bucket count is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.buckets {
            *slot = Slot::Empty;
        }
        self.nodes.clear();
        self.len = 0;
    }

    /// Records in bucket order, each chain head first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Chain {
                nodes: &self.nodes,
                cursor: None,
            },
        }
    }

    fn chain<'a>(&'a self, head: &'a Slot) -> Chain<'a> {
        let cursor = match head {
            Slot::Occupied(node) => Some(node),
            Slot::Empty => None,
        };
        Chain {
            nodes: &self.nodes,
            cursor,
        }
    }

    /// Stores `record` without checking the chain threshold.
    fn place(&mut self, record: CourseRecord) -> Placement {
        let bucket = bucket_index(&record.identifier, self.capacity());

        let head = match &mut self.buckets[bucket] {
            Slot::Occupied(head) => head,
            empty => {
                *empty = Slot::Occupied(Node::new(record));
                self.len += 1;
                return Placement::Head;
            }
        };
        if head.record.identifier == record.identifier {
            return Placement::Updated(mem::replace(&mut head.record, record));
        }

        let mut chain_len = 1;
        let mut tail = None;
        let mut cursor = head.next;
        while let Some(key) = cursor {
            chain_len += 1;
            let node = &mut self.nodes[key];
            if node.record.identifier == record.identifier {
                return Placement::Updated(mem::replace(&mut node.record, record));
            }
            tail = Some(key);
            cursor = node.next;
        }

        let key = self.nodes.insert(Node::new(record));
        match tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => head.next = Some(key),
        }
        self.len += 1;
        Placement::Appended {
            bucket,
            chain_len: chain_len + 1,
        }
    }

    /// Rehashes every record into a table of `next_prime(2 * capacity)`
    /// buckets and takes over its storage.
    fn grow(&mut self, bucket: usize) {
        if let Some(hash) = self.unsplittable_hash(bucket) {
            log::warn!(
                "every identifier in bucket {bucket} has full hash {hash:#010x}, not resizing"
            );
            return;
        }

        let old_capacity = self.capacity();
        let new_capacity = next_prime(old_capacity.saturating_mul(2));
        log::debug!("resizing course table from {old_capacity} to {new_capacity} buckets");

        let mut grown = Self::with_buckets(new_capacity, self.max_chain_len);
        let buckets = mem::take(&mut self.buckets);
        let mut nodes = mem::take(&mut self.nodes);
        for slot in buckets {
            let Slot::Occupied(head) = slot else {
                continue;
            };
            let mut cursor = head.next;
            // Migration never nests a resize; one call grows by one step.
            grown.place(head.record);
            while let Some(key) = cursor {
                let node = nodes
                    .remove(key)
                    .expect("chain key is owned by its predecessor");
                cursor = node.next;
                grown.place(node.record);
            }
        }
        debug_assert!(nodes.is_empty(), "overflow node unreachable from any chain");
        debug_assert_eq!(grown.len, self.len, "resize changed the record count");

        *self = grown;
        log::debug!("resized course table to {new_capacity} buckets, {} records", self.len);
    }

    /// The full 32-bit hash of this chain when every record in it shares
    /// one. No capacity separates such records, so growing cannot help.
    fn unsplittable_hash(&self, bucket: usize) -> Option<u32> {
        let mut hashes = self
            .chain(&self.buckets[bucket])
            .map(|r| poly_hash(&r.identifier));
        let first = hashes.next()?;
        hashes.all(|h| h == first).then_some(first)
    }
}

impl Default for CourseTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<CourseRecord> for CourseTable {
    fn extend<I: IntoIterator<Item = CourseRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<CourseRecord> for CourseTable {
    fn from_iter<I: IntoIterator<Item = CourseRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a> IntoIterator for &'a CourseTable {
    type Item = &'a CourseRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks one bucket: head, then overflow nodes.
struct Chain<'a> {
    nodes: &'a SlotMap<ChainKey, Node>,
    cursor: Option<&'a Node>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a CourseRecord;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.and_then(|k| self.nodes.get(k));
        Some(&node.record)
    }
}

/// Iterator over the records of a [`CourseTable`].
pub struct Iter<'a> {
    buckets: core::slice::Iter<'a, Slot>,
    chain: Chain<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CourseRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.chain.next() {
                return Some(record);
            }
            match self.buckets.next()? {
                Slot::Occupied(head) => self.chain.cursor = Some(head),
                Slot::Empty => {}
            }
        }
    }
}

#[cfg(test)]
impl CourseTable {
    /// Checks the structural invariants and panics on the first violation.
    pub(crate) fn assert_consistent(&self) {
        assert!(crate::prime::is_prime(self.capacity()), "capacity not prime");
        let mut seen = std::collections::HashSet::new();
        let mut reachable = 0;
        for (idx, slot) in self.buckets.iter().enumerate() {
            for record in self.chain(slot) {
                assert!(!record.identifier.is_empty(), "empty identifier stored");
                assert_eq!(
                    bucket_index(&record.identifier, self.capacity()),
                    idx,
                    "{} sits in the wrong bucket",
                    record.identifier
                );
                assert!(seen.insert(record.identifier.clone()), "duplicate identifier");
                reachable += 1;
            }
        }
        assert_eq!(reachable, self.len, "len disagrees with reachable records");
        let heads = self
            .buckets
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count();
        assert_eq!(heads + self.nodes.len(), self.len, "orphaned overflow node");
    }
}
