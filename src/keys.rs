//! Two-level keys for DNS class and record type mnemonics.
//!
//! A zone file parser needs to tell whether a token is a class, a record
//! type, or neither. Instead of searching through all known mnemonics, it
//! can derive a short key from a handful of octets of the token and use
//! it as an index into a static table. This module derives such keys.
//!
//! A [`Key`] consists of two parts:
//!
//! * the _bucket_, a five bit value derived from the first character of
//!   the mnemonic, and
//! * the _slot_, an eight bit value derived from the last character and
//!   the length of the mnemonic.
//!
//! Together they address one of 32 × 256 cells. For the key to be usable
//! as a perfect hash, no two mnemonics of a set may end up in the same
//! cell. The [`Generator`] derives the keys for a set and reports every
//! collision so that the set, or the key derivation, can be adjusted.
//! Collisions are data, not errors: a run always covers all mnemonics.
//!
//! The derivation has been checked to be collision-free for the reference
//! classes and types in [`sets`][crate::sets]. It is not a good hash for
//! arbitrary strings. Digits and dashes are folded by the same mask as
//! letters, which happens to work for the known set but may well fail for
//! new mnemonics. Rerun the generator whenever a mnemonic is added.

use crate::mnemonic::{Mnemonic, MnemonicError};
use crate::report::Report;
use crate::sets;
use crate::table::PresenceTable;
use core::fmt;
use tracing::{debug, trace, warn};

//------------ Constants -----------------------------------------------------

/// The number of buckets, i.e., the number of possible first-level values.
pub const BUCKETS: usize = 32;

/// The number of slots per bucket.
pub const SLOTS: usize = 256;

/// The mask applied to characters before deriving a key.
///
/// The mask clears bit 0x20. For ASCII letters this forces upper case. All
/// other characters are masked just the same, turning a `'-'` into a
/// `'\r'` and digits into control characters. This is fine as long as the
/// result is only used for hashing.
const CASE_MASK: u8 = !0x20;

/// The value of the first bucket.
const BUCKET_BASE: u8 = b'A';

/// The multiplier for the slot's character part.
const SLOT_FACTOR: u8 = 0x07;

//------------ Key -----------------------------------------------------------

/// The key of a mnemonic.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key {
    /// The bucket, always less than [`BUCKETS`].
    bucket: u8,

    /// The slot within the bucket.
    slot: u8,
}

impl Key {
    /// Derives the key for a mnemonic.
    pub fn of(mnemonic: Mnemonic) -> Self {
        Key {
            bucket: Self::bucket_of(mnemonic),
            slot: Self::slot_of(mnemonic),
        }
    }

    /// Creates a key from its parts.
    ///
    /// Returns `None` if `bucket` is out of range.
    pub fn from_parts(bucket: u8, slot: u8) -> Option<Self> {
        if usize::from(bucket) < BUCKETS {
            Some(Key { bucket, slot })
        } else {
            None
        }
    }

    /// Returns the bucket.
    pub fn bucket(self) -> u8 {
        self.bucket
    }

    /// Returns the slot.
    pub fn slot(self) -> u8 {
        self.slot
    }

    /// Returns the bucket for a mnemonic.
    ///
    /// The bucket is taken from the first character. Case is ignored by
    /// clearing bit 0x20, the value of `'A'` is subtracted, and the result
    /// is wrapped into the five bit range. Thus `'A'` ends up in bucket 0
    /// and `'Z'` in bucket 25.
    fn bucket_of(mnemonic: Mnemonic) -> u8 {
        let first = mnemonic.first() & CASE_MASK;
        first.wrapping_sub(BUCKET_BASE) & (BUCKETS - 1) as u8
    }

    /// Returns the slot for a mnemonic.
    ///
    /// The slot is taken from the last character, again with bit 0x20
    /// cleared, multiplied by seven, plus the length of the mnemonic, all
    /// wrapped into a single octet.
    fn slot_of(mnemonic: Mnemonic) -> u8 {
        let last = mnemonic.last() & CASE_MASK;
        // Only the lowest octet of the length matters after wrapping.
        last.wrapping_mul(SLOT_FACTOR)
            .wrapping_add(mnemonic.len() as u8)
    }
}

//--- Display

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "key: {}, hash: {}", self.bucket, self.slot)
    }
}

//------------ Convenience Functions -----------------------------------------

/// Returns the bucket for the given mnemonic.
///
/// The result is always less than [`BUCKETS`]. Returns an error if the
/// mnemonic is empty or not printable ASCII.
pub fn bucket_of(mnemonic: &str) -> Result<u8, MnemonicError> {
    Mnemonic::new(mnemonic).map(Key::bucket_of)
}

/// Returns the slot for the given mnemonic.
///
/// Returns an error if the mnemonic is empty or not printable ASCII.
pub fn slot_of(mnemonic: &str) -> Result<u8, MnemonicError> {
    Mnemonic::new(mnemonic).map(Key::slot_of)
}

/// Returns the key for the given mnemonic.
pub fn key_of(mnemonic: &str) -> Result<Key, MnemonicError> {
    Mnemonic::new(mnemonic).map(Key::of)
}

/// Generates the keys for a sequence of mnemonics of the same role.
///
/// The returned report contains one entry per mnemonic in the order they
/// were given. Returns an error at the first mnemonic that cannot be
/// hashed.
pub fn generate<'a, I>(
    role: Role,
    mnemonics: I,
) -> Result<Report<'a>, MnemonicError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut generator = Generator::new();
    generator.extend(role, mnemonics)?;
    Ok(generator.finish())
}

/// Generates the keys for the reference classes followed by the types.
///
/// Both sets share a single table, so a type colliding with a class is
/// reported, too.
pub fn generate_reference() -> Report<'static> {
    let mut generator = Generator::new();
    let groups = [(Role::Class, sets::CLASSES), (Role::Type, sets::TYPES)];
    for (role, group) in groups {
        for &mnemonic in group {
            generator.push_mnemonic(role, Mnemonic::from_static(mnemonic));
        }
    }
    generator.finish()
}

//------------ Role ----------------------------------------------------------

/// The kind of DNS parameter a mnemonic names.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Role {
    /// The mnemonic is a DNS class.
    Class,

    /// The mnemonic is a resource record type.
    Type,
}

impl Role {
    /// Returns the name of the role as used in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Class => "class",
            Role::Type => "type",
        }
    }
}

//--- Display

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------ Entry ---------------------------------------------------------

/// The outcome of generating the key for a single mnemonic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entry<'a> {
    /// The role of the mnemonic.
    pub role: Role,

    /// The mnemonic.
    pub mnemonic: Mnemonic<'a>,

    /// The key derived for the mnemonic.
    pub key: Key,

    /// Whether the key was already taken by an earlier mnemonic.
    pub collision: bool,
}

//--- Display

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}, {}", self.role, self.mnemonic, self.key)?;
        if self.collision {
            f.write_str(" (collision)")?;
        }
        Ok(())
    }
}

//------------ Generator -----------------------------------------------------

/// Generates keys for a set of mnemonics and detects collisions.
///
/// A generator owns a fresh [`PresenceTable`]. Mnemonics are pushed in
/// order and their entries collected. Which of two colliding mnemonics is
/// flagged depends on that order: the first one always takes the cell,
/// every later one is marked as a collision. The keys themselves do not
/// depend on the order.
#[derive(Clone, Debug, Default)]
pub struct Generator<'a> {
    /// The cells taken so far.
    table: PresenceTable,

    /// The entries in the order of the mnemonics.
    entries: Vec<Entry<'a>>,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mnemonic and returns its entry.
    ///
    /// Returns an error if the mnemonic is empty or not printable ASCII.
    /// In this case, the generator is left unchanged.
    pub fn push(
        &mut self,
        role: Role,
        mnemonic: &'a str,
    ) -> Result<Entry<'a>, MnemonicError> {
        let mnemonic = Mnemonic::new(mnemonic)?;
        Ok(self.push_mnemonic(role, mnemonic))
    }

    /// Adds an already checked mnemonic and returns its entry.
    pub fn push_mnemonic(
        &mut self,
        role: Role,
        mnemonic: Mnemonic<'a>,
    ) -> Entry<'a> {
        let key = Key::of(mnemonic);
        let collision = !self.table.insert(key);
        if collision {
            warn!(
                "{} {} collides at bucket {}, slot {}",
                role,
                mnemonic,
                key.bucket(),
                key.slot()
            );
        } else {
            trace!(
                "{} {} at bucket {}, slot {}",
                role,
                mnemonic,
                key.bucket(),
                key.slot()
            );
        }
        let entry = Entry {
            role,
            mnemonic,
            key,
            collision,
        };
        self.entries.push(entry);
        entry
    }

    /// Adds a sequence of mnemonics of the same role.
    ///
    /// Stops at the first mnemonic that cannot be hashed. Entries for the
    /// mnemonics before it have been added.
    pub fn extend<I>(
        &mut self,
        role: Role,
        mnemonics: I,
    ) -> Result<(), MnemonicError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for mnemonic in mnemonics {
            self.push(role, mnemonic)?;
        }
        Ok(())
    }

    /// Returns the entries generated so far.
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// Finishes the run and returns the report.
    ///
    /// The presence table is dropped.
    pub fn finish(self) -> Report<'a> {
        let report = Report::new(self.entries);
        debug!(
            "generated {} keys with {} collisions",
            report.len(),
            report.collision_count()
        );
        report
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn in_class() {
        assert_eq!(bucket_of("IN"), Ok(8));
        assert_eq!(slot_of("IN"), Ok(36));
        assert_eq!(key_of("IN"), Ok(Key::from_parts(8, 36).unwrap()));
    }

    #[test]
    fn first_character_ignores_case() {
        assert_eq!(bucket_of("in"), bucket_of("IN"));
        assert_eq!(bucket_of("A"), Ok(0));
        assert_eq!(bucket_of("Z"), Ok(25));
    }

    #[test]
    fn non_letters_wrap() {
        // '*' & 0xdf == 0x0a, minus 0x41 wraps to 0xc9, masked to 9.
        assert_eq!(bucket_of("*"), Ok(9));
        // '-' & 0xdf == 0x0d, times 7 is 0x5b, plus length 2.
        assert_eq!(slot_of("A-"), Ok(0x5d));
        // '2' & 0xdf == 0x12, times 7 is 0x7e, plus length 3.
        assert_eq!(slot_of("L32"), Ok(0x81));
    }

    #[test]
    fn slot_wraps() {
        // 'Z' is 0x5a, times 7 is 0x276, plus length 2 wraps to 0x78.
        assert_eq!(slot_of("AZ"), Ok(0x78));
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(bucket_of(""), Err(MnemonicError::Empty));
        assert_eq!(slot_of(""), Err(MnemonicError::Empty));
        assert_eq!(key_of(""), Err(MnemonicError::Empty));
        assert!(generate(Role::Type, ["A", ""]).is_err());
    }

    #[test]
    fn all_ranges() {
        for first in 0x21u8..0x7f {
            for last in 0x21u8..0x7f {
                for len in [1, 2, 3, 8, 255, 256, 257, 300] {
                    let mut m = vec![b'X'; len];
                    m[0] = first;
                    m[len - 1] = last;
                    let m = Mnemonic::from_slice(&m).unwrap();
                    let key = Key::of(m);
                    assert!(usize::from(key.bucket()) < BUCKETS);
                    assert_eq!(Key::of(m), key);
                }
            }
        }
    }

    #[test]
    fn collisions_depend_on_order() {
        // Same first character, same last character, same length.
        let report = generate(Role::Type, ["NSEC", "NSIC"]).unwrap();
        assert!(!report.entries()[0].collision);
        assert!(report.entries()[1].collision);

        let report = generate(Role::Type, ["NSIC", "NSEC"]).unwrap();
        assert_eq!(report.entries()[1].mnemonic.as_str(), "NSEC");
        assert!(report.entries()[1].collision);
        assert!(!report.entries()[0].collision);
    }

    #[test]
    fn generate_continues_after_collision() {
        let report =
            generate(Role::Type, ["MX", "MX", "NS", "MX"]).unwrap();
        assert_eq!(report.len(), 4);
        assert_eq!(report.collision_count(), 2);
        assert!(!report.entries()[2].collision);
    }

    #[test]
    fn failed_push_leaves_generator() {
        let mut generator = Generator::new();
        generator.push(Role::Class, "IN").unwrap();
        assert!(generator.push(Role::Class, "").is_err());
        assert_eq!(generator.entries().len(), 1);
    }

    #[test]
    fn reference_sets() {
        let report = generate_reference();
        assert_eq!(report.len(), sets::CLASSES.len() + sets::TYPES.len());
        assert!(report.is_perfect());
        assert_eq!(report, generate_reference());
    }

    #[test]
    fn display() {
        let report = generate(Role::Class, ["IN", "IN"]).unwrap();
        assert_eq!(
            format!("{}", report.entries()[0]),
            "class: IN, key: 8, hash: 36"
        );
        assert_eq!(
            format!("{}", report.entries()[1]),
            "class: IN, key: 8, hash: 36 (collision)"
        );
    }
}
