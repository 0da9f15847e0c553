//! The outcome of a key generation run.
//!
//! A [`Report`] lists one [`Entry`] for every mnemonic of a run. Its
//! `Display` impl produces the traditional text report, one line per
//! mnemonic:
//!
//! ```text
//! class: IN, key: 8, hash: 36
//! type: A, key: 0, hash: 200
//! ```
//!
//! Mnemonics whose key was already taken are marked with a trailing
//! ` (collision)`. With the `serde` feature, a report serializes as a
//! sequence of records with the fields `role`, `mnemonic`, `bucket`,
//! `hash`, and `collided`.

use crate::keys::Entry;
use core::fmt;

//------------ Report --------------------------------------------------------

/// The entries of a key generation run in the order of the mnemonics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> Report<'a> {
    pub(crate) fn new(entries: Vec<Entry<'a>>) -> Self {
        Report { entries }
    }

    /// Returns all entries.
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the report has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries marked as collisions.
    pub fn collisions(&self) -> impl Iterator<Item = &Entry<'a>> + '_ {
        self.entries.iter().filter(|entry| entry.collision)
    }

    /// Returns the number of collisions.
    pub fn collision_count(&self) -> usize {
        self.collisions().count()
    }

    /// Returns whether the keys form a perfect hash.
    ///
    /// A table built from a report is only usable if this returns `true`.
    pub fn is_perfect(&self) -> bool {
        self.collisions().next().is_none()
    }

    /// Returns an iterator over the entries that can go into a table.
    pub fn accepted(&self) -> impl Iterator<Item = &Entry<'a>> + '_ {
        self.entries.iter().filter(|entry| !entry.collision)
    }
}

//--- IntoIterator

impl<'a> IntoIterator for Report<'a> {
    type Item = Entry<'a>;
    type IntoIter = std::vec::IntoIter<Entry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

//--- Display

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

//--- Serialize

#[cfg(feature = "serde")]
impl serde::Serialize for Report<'_> {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Entry<'_> {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Entry", 5)?;
        s.serialize_field("role", &self.role)?;
        s.serialize_field("mnemonic", &self.mnemonic)?;
        s.serialize_field("bucket", &self.key.bucket())?;
        s.serialize_field("hash", &self.key.slot())?;
        s.serialize_field("collided", &self.collision)?;
        s.end()
    }
}

//============ Tests =========================================================
