//! The presence table used to detect collisions.

use crate::keys::{Key, BUCKETS, SLOTS};

//------------ PresenceTable -------------------------------------------------

/// A record of which keys have been handed out.
///
/// The table has one bit for each of the [`BUCKETS`] times [`SLOTS`]
/// possible keys. It starts out empty. A key is marked as present when it
/// is inserted for the first time. Any later attempt to insert the same
/// key reveals a collision.
///
/// A table is meant to live for exactly one generation run. It is created
/// by the run and dropped afterwards, so separate runs never share state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresenceTable {
    /// One bit map per bucket, slots are numbered from the lowest bit.
    buckets: [[u64; SLOTS / 64]; BUCKETS],

    /// The number of keys present.
    len: usize,
}

impl PresenceTable {
    /// Creates a new, empty table.
    #[must_use]
    pub const fn new() -> Self {
        PresenceTable {
            buckets: [[0; SLOTS / 64]; BUCKETS],
            len: 0,
        }
    }

    /// Returns whether the key is already present.
    pub fn contains(&self, key: Key) -> bool {
        let (word, bit) = Self::position(key);
        self.buckets[usize::from(key.bucket())][word] & bit != 0
    }

    /// Marks the key as present.
    ///
    /// Returns `true` if the key was not present before. If it returns
    /// `false`, the key collides with an earlier one.
    pub fn insert(&mut self, key: Key) -> bool {
        let (word, bit) = Self::position(key);
        let word = &mut self.buckets[usize::from(key.bucket())][word];
        if *word & bit != 0 {
            return false;
        }
        *word |= bit;
        self.len += 1;
        true
    }

    /// Returns the number of keys present.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether no key has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn position(key: Key) -> (usize, u64) {
        let slot = usize::from(key.slot());
        (slot / 64, 1 << (slot % 64))
    }
}

//--- Default

impl Default for PresenceTable {
    fn default() -> Self {
        Self::new()
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut table = PresenceTable::new();
        assert!(table.is_empty());

        let key = Key::from_parts(8, 40).unwrap();
        assert!(!table.contains(key));
        assert!(table.insert(key));
        assert!(table.contains(key));
        assert!(!table.insert(key));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn cells_are_independent() {
        let mut table = PresenceTable::new();
        for bucket in 0..BUCKETS as u8 {
            for slot in [0u8, 63, 64, 127, 128, 255] {
                assert!(table.insert(Key::from_parts(bucket, slot).unwrap()));
            }
        }
        assert_eq!(table.len(), BUCKETS * 6);
        assert!(!table.contains(Key::from_parts(0, 1).unwrap()));
        assert!(!table.contains(Key::from_parts(31, 254).unwrap()));
        assert!(table.contains(Key::from_parts(31, 255).unwrap()));
    }
}
