//! Sizing configuration for [`CourseTable`](crate::CourseTable).

/// Bucket count of a default table. Prime.
pub const DEFAULT_INITIAL_CAPACITY: usize = 31;

/// Longest chain tolerated before an insert grows the table.
pub const DEFAULT_MAX_CHAIN_LEN: usize = 4;

/// Table configuration builder
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Requested bucket count, rounded up to a prime on construction
    #[doc(hidden)]
    pub initial_capacity: usize,

    /// Chain length threshold
    #[doc(hidden)]
    pub max_chain_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
        }
    }
}

impl Config {
    /// Creates a configuration with the default sizing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial bucket count.
    ///
    /// The table uses the smallest prime at or above `capacity` (at least 2).
    ///
    /// Defaults to 31.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the chain length threshold.
    ///
    /// An insert that grows a bucket's chain (head included) beyond this
    /// length doubles the table to the next prime and rehashes every record.
    /// Clamped to at least 1.
    ///
    /// Defaults to 4.
    #[must_use]
    pub fn max_chain_len(mut self, len: usize) -> Self {
        self.max_chain_len = len.max(1);
        self
    }
}
