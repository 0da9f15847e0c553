//! Mnemonics of DNS identifiers.
//!
//! All keys derived by this crate are computed over the raw octets of a
//! mnemonic, i.e., the textual name of a DNS class, record type, or
//! similar parameter. The hash functions read fixed positions of these
//! octets and thus require at least one octet to be present. This module
//! provides the type [`Mnemonic`] which checks these preconditions once so
//! that the hash functions can rely on them.

use core::fmt;

//------------ Mnemonic ------------------------------------------------------

/// A validated mnemonic.
///
/// A mnemonic is a non-empty sequence of printable ASCII characters, i.e.,
/// octets in the range from `0x21` to `0x7E`. The case of letters is kept
/// as given. Key derivation treats case only where explicitly documented.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Mnemonic<'a>(&'a str);

impl<'a> Mnemonic<'a> {
    /// Creates a mnemonic from a string after checking it.
    ///
    /// Returns an error if the string is empty or contains anything but
    /// printable ASCII characters.
    pub fn new(s: &'a str) -> Result<Self, MnemonicError> {
        Self::check(s.as_bytes())?;
        Ok(Mnemonic(s))
    }

    /// Creates a mnemonic from an octets slice after checking it.
    pub fn from_slice(slice: &'a [u8]) -> Result<Self, MnemonicError> {
        Self::check(slice)?;
        core::str::from_utf8(slice).map(Mnemonic).map_err(|err| {
            let index = err.valid_up_to();
            MnemonicError::IllegalOctet {
                octet: slice[index],
                index,
            }
        })
    }

    /// Creates a mnemonic from one of the built-in reference sets.
    ///
    /// The reference sets are checked by the tests of the
    /// [`sets`][crate::sets] module.
    pub(crate) fn from_static(s: &'static str) -> Mnemonic<'static> {
        debug_assert!(Self::check(s.as_bytes()).is_ok());
        Mnemonic(s)
    }

    fn check(slice: &[u8]) -> Result<(), MnemonicError> {
        if slice.is_empty() {
            return Err(MnemonicError::Empty);
        }
        match slice.iter().position(|ch| !ch.is_ascii_graphic()) {
            Some(index) => Err(MnemonicError::IllegalOctet {
                octet: slice[index],
                index,
            }),
            None => Ok(()),
        }
    }

    /// Returns the mnemonic as a string slice.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Returns the mnemonic as an octets slice.
    pub fn as_slice(&self) -> &'a [u8] {
        self.0.as_bytes()
    }

    /// Returns the first octet of the mnemonic.
    pub fn first(&self) -> u8 {
        self.as_slice()[0]
    }

    /// Returns the last octet of the mnemonic.
    pub fn last(&self) -> u8 {
        self.as_slice()[self.0.len() - 1]
    }

    /// Returns the length of the mnemonic in octets.
    ///
    /// Since a mnemonic is never empty, there is no `is_empty`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

//--- TryFrom

impl<'a> TryFrom<&'a str> for Mnemonic<'a> {
    type Error = MnemonicError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

//--- AsRef

impl AsRef<str> for Mnemonic<'_> {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl AsRef<[u8]> for Mnemonic<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

//--- Display and Debug

impl fmt::Display for Mnemonic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for Mnemonic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Mnemonic").field(&self.0).finish()
    }
}

//--- Serialize

#[cfg(feature = "serde")]
impl serde::Serialize for Mnemonic<'_> {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

//------------ MnemonicError -------------------------------------------------

/// A mnemonic violated the preconditions of key derivation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MnemonicError {
    /// The mnemonic was empty.
    Empty,

    /// The mnemonic contained an octet that is not printable ASCII.
    IllegalOctet {
        /// The offending octet.
        octet: u8,

        /// The position of the octet within the mnemonic.
        index: usize,
    },
}

//--- Display and Error

impl fmt::Display for MnemonicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MnemonicError::Empty => f.write_str("empty mnemonic"),
            MnemonicError::IllegalOctet { octet, index } => write!(
                f,
                "illegal octet 0x{:02x} at position {} in mnemonic",
                octet, index
            ),
        }
    }
}

impl std::error::Error for MnemonicError {}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_printable_ascii() {
        let m = Mnemonic::new("NSAP-PTR").unwrap();
        assert_eq!(m.as_str(), "NSAP-PTR");
        assert_eq!(m.first(), b'N');
        assert_eq!(m.last(), b'R');
        assert_eq!(m.len(), 8);

        let m = Mnemonic::new("a").unwrap();
        assert_eq!(m.first(), m.last());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Mnemonic::new(""), Err(MnemonicError::Empty));
        assert_eq!(Mnemonic::from_slice(b""), Err(MnemonicError::Empty));
    }

    #[test]
    fn rejects_illegal_octets() {
        assert_eq!(
            Mnemonic::new("NS EC"),
            Err(MnemonicError::IllegalOctet {
                octet: b' ',
                index: 2
            })
        );
        assert_eq!(
            Mnemonic::from_slice(b"A\x7f"),
            Err(MnemonicError::IllegalOctet {
                octet: 0x7f,
                index: 1
            })
        );
        assert!(Mnemonic::new("A\u{e9}").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", MnemonicError::Empty), "empty mnemonic");
        assert_eq!(
            format!(
                "{}",
                MnemonicError::IllegalOctet {
                    octet: 9,
                    index: 3
                }
            ),
            "illegal octet 0x09 at position 3 in mnemonic"
        );
        assert_eq!(
            format!("{:?}", Mnemonic::new("IN").unwrap()),
            "Mnemonic(\"IN\")"
        );
    }
}
