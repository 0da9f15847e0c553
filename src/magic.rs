//! Perfect hashing through a magic multiplier.
//!
//! Some parameters in zone files have small, fixed sets of mnemonics, e.g.,
//! DNSSEC algorithms or the certificate types of the CERT record. For those,
//! a single-level hash over the first eight octets of the mnemonic is
//! enough. The octets are loaded as a little-endian 64 bit integer, its two
//! halves are combined into 32 bits, and that value is multiplied with a
//! _magic value._ The upper half of the product, reduced to the size of the
//! table, is the slot.
//!
//! Whether this works depends entirely on the magic value. The function
//! [`search`] tries one magic value after another until it finds one that
//! maps all mnemonics of a set to distinct slots. Once found, the value can
//! be hard-coded by the parser together with the table in
//! [`MagicTable::slots`] order.
//!
//! The hash only sees the first eight octets. Mnemonics that share a longer
//! prefix can only be told apart if the [`Scheme`] adds the length.

use crate::config::SearchConfig;
use crate::mnemonic::{Mnemonic, MnemonicError};
use core::{cmp, fmt};
use tracing::{debug, trace};

//------------ prefix --------------------------------------------------------

/// Returns the first eight octets of a name as an integer.
///
/// The octets are read in little-endian order. If the name is shorter, the
/// missing octets are zero.
pub fn prefix(name: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let len = cmp::min(name.len(), buf.len());
    buf[..len].copy_from_slice(&name[..len]);
    u64::from_le_bytes(buf)
}

//------------ Scheme --------------------------------------------------------

/// A variant of the magic hash.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Scheme {
    /// The number of slots, a power of two.
    slots: u16,

    /// Whether bit 0x20 is cleared in all octets of the prefix.
    fold_case: bool,

    /// Whether the length of the name is added to the hash.
    add_length: bool,
}

impl Scheme {
    /// The scheme used for DNSSEC algorithm mnemonics.
    pub const ALGORITHMS: Scheme = Scheme {
        slots: 16,
        fold_case: false,
        add_length: false,
    };

    /// The scheme used for certificate type mnemonics.
    pub const CERTIFICATES: Scheme = Scheme {
        slots: 16,
        fold_case: false,
        add_length: false,
    };

    /// The scheme used for well-known service names.
    ///
    /// Service names are matched case-insensitively and several of them
    /// share long prefixes, so both case folding and the length are used.
    pub const SERVICES: Scheme = Scheme {
        slots: 64,
        fold_case: true,
        add_length: true,
    };

    /// Creates a plain scheme with the given number of slots.
    ///
    /// Returns `None` unless `slots` is a power of two no larger than 256.
    pub fn new(slots: u16) -> Option<Self> {
        if slots.is_power_of_two() && slots <= 256 {
            Some(Scheme {
                slots,
                fold_case: false,
                add_length: false,
            })
        } else {
            None
        }
    }

    /// Returns the scheme with case folding enabled.
    #[must_use]
    pub fn with_case_folding(mut self) -> Self {
        self.fold_case = true;
        self
    }

    /// Returns the scheme with the length added to the hash.
    #[must_use]
    pub fn with_length(mut self) -> Self {
        self.add_length = true;
        self
    }

    /// Returns the number of slots.
    pub fn slots(self) -> u16 {
        self.slots
    }

    /// Returns whether the scheme ignores ASCII case.
    pub fn folds_case(self) -> bool {
        self.fold_case
    }

    /// Returns whether the scheme adds the length of the name.
    pub fn adds_length(self) -> bool {
        self.add_length
    }

    /// Returns the slot for `name` given the magic value.
    pub fn hash(self, magic: u64, name: Mnemonic) -> u8 {
        let mut value = prefix(name.as_slice());
        if self.fold_case {
            value &= 0xdfdf_dfdf_dfdf_dfdf;
        }
        let folded = u64::from(((value >> 32) ^ value) as u32);
        let mut hash = folded.wrapping_mul(magic) >> 32;
        if self.add_length {
            hash = hash.wrapping_add(name.len() as u64);
        }
        (hash & u64::from(self.slots - 1)) as u8
    }

    /// Returns whether two names are equal under this scheme.
    fn names_match(self, left: &str, right: &str) -> bool {
        if self.fold_case {
            left.eq_ignore_ascii_case(right)
        } else {
            left == right
        }
    }
}

//------------ search --------------------------------------------------------

/// Searches for a magic value that hashes all names to distinct slots.
///
/// The names are given together with the numeric code they stand for.
/// Magic values are tried in increasing order as described by `config`.
/// The first one without collisions is returned.
pub fn search<'a, I>(
    scheme: Scheme,
    names: I,
    config: &SearchConfig,
) -> Result<MagicTable<'a>, SearchError>
where
    I: IntoIterator<Item = (&'a str, u16)>,
{
    let names = names
        .into_iter()
        .map(|(name, code)| Ok((Mnemonic::new(name)?, code)))
        .collect::<Result<Vec<_>, MnemonicError>>()?;
    if names.len() > usize::from(scheme.slots) {
        return Err(SearchError::TooManyNames {
            names: names.len(),
            slots: scheme.slots,
        });
    }
    if let Some(index) = first_duplicate(scheme, &names) {
        return Err(SearchError::DuplicateName { index });
    }

    let candidates = config.candidates();
    let (start, end) = (*candidates.start(), *candidates.end());
    for magic in candidates {
        if is_perfect(scheme, magic, &names) {
            debug!("found magic value {} for {} names", magic, names.len());
            let entries = names
                .iter()
                .map(|&(name, code)| MagicEntry {
                    name,
                    code,
                    slot: scheme.hash(magic, name),
                })
                .collect();
            return Ok(MagicTable {
                scheme,
                magic,
                entries,
            });
        }
    }
    debug!("no magic value in {}..={}", start, end);
    Err(SearchError::Exhausted { start, end })
}

/// Returns the index of the first name that repeats an earlier one.
///
/// Equal names always share a slot, so no magic value can separate them.
fn first_duplicate(
    scheme: Scheme,
    names: &[(Mnemonic, u16)],
) -> Option<usize> {
    (1..names.len()).find(|&index| {
        let name = names[index].0.as_str();
        names[..index]
            .iter()
            .any(|(other, _)| scheme.names_match(other.as_str(), name))
    })
}

/// Returns whether `magic` maps all names to distinct slots.
fn is_perfect(scheme: Scheme, magic: u64, names: &[(Mnemonic, u16)]) -> bool {
    let mut taken = [false; 256];
    for (name, _) in names {
        let slot = usize::from(scheme.hash(magic, *name));
        if taken[slot] {
            trace!("magic {} collides at {}", magic, name);
            return false;
        }
        taken[slot] = true;
    }
    true
}

//------------ MagicEntry ----------------------------------------------------

/// A name and its slot in a magic table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MagicEntry<'a> {
    /// The name.
    pub name: Mnemonic<'a>,

    /// The code the name stands for.
    pub code: u16,

    /// The slot of the name.
    pub slot: u8,
}

//------------ MagicTable ----------------------------------------------------

/// The result of a successful magic value search.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MagicTable<'a> {
    /// The scheme the table was built for.
    #[cfg_attr(feature = "serde", serde(skip))]
    scheme: Scheme,

    /// The magic value.
    magic: u64,

    /// The entries in the order the names were given.
    entries: Vec<MagicEntry<'a>>,
}

impl<'a> MagicTable<'a> {
    /// Returns the scheme of the table.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the magic value.
    pub fn magic(&self) -> u64 {
        self.magic
    }

    /// Returns the entries in the order the names were given.
    pub fn entries(&self) -> &[MagicEntry<'a>] {
        &self.entries
    }

    /// Returns the entries indexed by their slot.
    ///
    /// This is the table a parser would include. Unused slots are `None`.
    pub fn slots(&self) -> Vec<Option<&MagicEntry<'a>>> {
        let mut res = vec![None; usize::from(self.scheme.slots)];
        for entry in &self.entries {
            res[usize::from(entry.slot)] = Some(entry);
        }
        res
    }

    /// Looks up a name the way a parser would.
    ///
    /// Hashes the name and then compares it to the entry in its slot.
    pub fn lookup(&self, name: &str) -> Option<&MagicEntry<'a>> {
        let name = Mnemonic::new(name).ok()?;
        let slot = self.scheme.hash(self.magic, name);
        self.entries.iter().find(|entry| {
            entry.slot == slot
                && self.scheme.names_match(entry.name.as_str(), name.as_str())
        })
    }

    /// Returns a value displaying the slot-indexed table.
    ///
    /// Each slot is printed on a line of its own, either as
    /// `ENTRY("<name>", <code>),` or as `UNKNOWN(),` for unused slots.
    pub fn display_slots(&self) -> DisplaySlots<'a, '_> {
        self.display_slots_as("ENTRY", "UNKNOWN")
    }

    /// Returns a value displaying the slot-indexed table with own macros.
    ///
    /// Used slots are printed as `<entry>("<name>", <code>),`, unused ones
    /// as `<unknown>(),`. This allows pasting the output straight into a
    /// table that uses its own macro names, e.g., `SERVICE` and
    /// `UNKNOWN_SERVICE`.
    pub fn display_slots_as(
        &self,
        entry: &'static str,
        unknown: &'static str,
    ) -> DisplaySlots<'a, '_> {
        DisplaySlots {
            table: self,
            entry,
            unknown,
        }
    }
}

//--- Display

impl fmt::Display for MagicTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "i: {}, magic: {}", self.entries.len(), self.magic)?;
        for entry in &self.entries {
            writeln!(f, "{}: {} ({})", entry.name, entry.slot, entry.code)?;
        }
        Ok(())
    }
}

//------------ DisplaySlots --------------------------------------------------

/// Displays the slot-indexed table of a [`MagicTable`].
pub struct DisplaySlots<'a, 'b> {
    /// The table to display.
    table: &'b MagicTable<'a>,

    /// The macro name for used slots.
    entry: &'static str,

    /// The macro name for unused slots.
    unknown: &'static str,
}

impl fmt::Display for DisplaySlots<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for slot in self.table.slots() {
            match slot {
                Some(entry) => writeln!(
                    f,
                    "  {}(\"{}\", {}),",
                    self.entry, entry.name, entry.code
                )?,
                None => writeln!(f, "  {}(),", self.unknown)?,
            }
        }
        Ok(())
    }
}

//------------ SearchError ---------------------------------------------------

/// A magic value search failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchError {
    /// One of the names cannot be hashed.
    Mnemonic(MnemonicError),

    /// There are more names than slots.
    TooManyNames {
        /// The number of names.
        names: usize,

        /// The number of slots.
        slots: u16,
    },

    /// A name appears more than once.
    DuplicateName {
        /// The position of the repeated name.
        index: usize,
    },

    /// No magic value in the configured range works.
    Exhausted {
        /// The first magic value tried.
        start: u64,

        /// The last magic value tried.
        end: u64,
    },
}

//--- From

impl From<MnemonicError> for SearchError {
    fn from(err: MnemonicError) -> Self {
        SearchError::Mnemonic(err)
    }
}

//--- Display and Error

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SearchError::Mnemonic(ref err) => err.fmt(f),
            SearchError::TooManyNames { names, slots } => {
                write!(f, "{} names do not fit into {} slots", names, slots)
            }
            SearchError::DuplicateName { index } => {
                write!(f, "name at position {} is a duplicate", index)
            }
            SearchError::Exhausted { start, end } => {
                write!(f, "no magic value between {} and {}", start, end)
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Mnemonic(err) => Some(err),
            _ => None,
        }
    }
}

//============ Tests =========================================================
