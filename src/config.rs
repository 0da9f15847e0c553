//! Configuration of the magic value search.

use std::cmp;

//------------ DefMinMax -----------------------------------------------------

/// Default and bounds of a numeric setting.
///
/// Setters pass user supplied values through [`limit`][Self::limit] so a
/// setting never leaves its bounds.
#[derive(Clone, Copy)]
pub struct DefMinMax<T> {
    /// Used when nothing else was configured.
    def: T,

    /// The smallest accepted value.
    min: T,

    /// The largest accepted value.
    max: T,
}

impl<T> DefMinMax<T> {
    /// Creates bounds from a default, a minimum, and a maximum.
    pub const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default.
    pub fn default(self) -> T {
        self.def
    }

    /// Clamps `value` into the bounds.
    pub fn limit(self, value: T) -> T
    where
        T: Ord,
    {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//------------ Config Values -------------------------------------------------

/// The first magic value tried.
///
/// Zero maps every name to slot zero and is never useful.
const START: DefMinMax<u64> = DefMinMax::new(1, 1, u64::MAX);

/// The number of magic values tried before giving up.
const LIMIT: DefMinMax<u64> = DefMinMax::new(1 << 32, 1, u64::MAX);

//------------ SearchConfig --------------------------------------------------

/// Configuration for a magic value search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    /// The first magic value to try.
    start: u64,

    /// The maximum number of magic values to try.
    limit: u64,
}

impl SearchConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the first magic value to try.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Sets the first magic value to try.
    ///
    /// The value is raised to one if necessary.
    pub fn set_start(&mut self, value: u64) {
        self.start = START.limit(value)
    }

    /// Returns the maximum number of magic values to try.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Sets the maximum number of magic values to try.
    ///
    /// The value is raised to one if necessary. The search never wraps
    /// around, so it may end earlier if it reaches the largest magic value.
    pub fn set_limit(&mut self, value: u64) {
        self.limit = LIMIT.limit(value)
    }

    /// Returns the range of magic values to try.
    pub fn candidates(&self) -> core::ops::RangeInclusive<u64> {
        let end = self.start.saturating_add(self.limit - 1);
        self.start..=end
    }
}

//--- Default

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start: START.default(),
            limit: LIMIT.default(),
        }
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn limits() {
        let mut config = SearchConfig::new();
        assert_eq!(config.start(), 1);
        assert_eq!(config.limit(), 1 << 32);

        config.set_start(0);
        assert_eq!(config.start(), 1);
        config.set_limit(0);
        assert_eq!(config.limit(), 1);
        assert_eq!(config.candidates(), 1..=1);
    }

    #[test]
    fn candidates_saturate() {
        let mut config = SearchConfig::new();
        config.set_start(u64::MAX - 1);
        config.set_limit(10);
        assert_eq!(config.candidates(), u64::MAX - 1..=u64::MAX);
    }
}
