//! course-catalog: an in-memory catalog of courses backed by a chained hash
//! table with prime sizing and load-triggered rehash.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the one structure with real invariants (the table) small and
//!   self-checking, and keep parsing and presentation outside of it.
//! - Layers:
//!   - `prime` / `hash`: pure helpers. Capacities are always prime; the bucket
//!     of an identifier is a base-31 polynomial hash modulo the current
//!     capacity.
//!   - CourseTable: bucket array of inline head slots plus an arena of
//!     overflow nodes, each owned by exactly one predecessor. Insert is
//!     insert-or-update; an append that pushes a chain past the threshold
//!     grows the table before returning.
//!   - loader: parses and validates catalog files, then reloads a table
//!     fail-atomically.
//!   - `planner` binary: interactive shell over a single table.
//!
//! Constraints
//! - Single owner, synchronous. Every mutation takes `&mut self`, which is
//!   the exclusive access a resize needs; there is no internal locking.
//! - Occupancy is an explicit enum; no key value is reserved as a sentinel.
//! - No deletion of individual records; `clear()` drops everything and keeps
//!   the bucket count.
//!
//! Resize
//! - Triggered only by an insert that appends to a chain and makes it longer
//!   than the threshold (default 4, counting the head).
//! - New capacity is `next_prime(2 * capacity)`. Records are moved in bucket
//!   then chain order and placed by hashing against the new capacity; the
//!   migration itself never triggers a nested resize.
//! - If every record in the overflowing chain shares one full 32-bit hash,
//!   no capacity can split them and the resize is skipped with a warning.
//!
//! Errors
//! - The table itself cannot fail for well-formed records. `try_insert`
//!   reports an existing identifier for callers that want strict inserts.
//! - Loading reports `LoadError`: an unopenable source leaves the table as it
//!   was; any other failure leaves it empty.
//!
//! Logging
//! - Library code logs through the `log` facade (resize at `debug`, skipped
//!   resize at `warn`, loads at `info`/`warn`); the binary installs a
//!   `tracing` subscriber and bridges `log` records into it.

mod config;
mod course_table;
mod course_table_proptest;
mod error;
pub mod hash;
pub mod loader;
mod prime;
mod record;

// Public surface
pub use config::{Config, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CHAIN_LEN};
pub use course_table::{CourseTable, Iter};
pub use error::{InsertError, LoadError, MalformedKind, Result};
pub use record::CourseRecord;
