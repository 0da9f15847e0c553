//! Perfect-hash keys for DNS identifiers.
//!
//! A zone file parser spends a good deal of its time classifying tokens:
//! is this a class, a record type, a DNSSEC algorithm? Because the sets of
//! mnemonics are small and fixed, a perfect hash can map each mnemonic to
//! its own table slot and classification becomes a single lookup followed
//! by one comparison. This crate derives the keys for such tables and
//! checks that they really are collision-free.
//!
//! # Modules
//!
//! * [keys] derives two-level keys for DNS classes and record types and
//!   reports collisions through the [`Generator`][keys::Generator],
//! * [magic] searches for a magic multiplier that turns a prefix hash into
//!   a perfect hash for a set of names,
//! * [sets] contains the reference sets the derivations are tuned for,
//! * [report] renders the results of a key generation run, and
//! * [mnemonic], [table], and [config] provide the supporting types.
//!
//! # Example
//!
//! ```
//! use zone_keys::keys::{bucket_of, slot_of, generate_reference};
//!
//! assert_eq!(bucket_of("IN"), Ok(8));
//! assert_eq!(slot_of("IN"), Ok(36));
//! assert!(generate_reference().is_perfect());
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serializing reports and magic tables via
//!   [serde](https://serde.rs/).
//! * `cli`: Builds the `zone-keys` command line tool. This enables the
//!   `serde` feature and pulls in `clap`, `serde_json`, and
//!   `tracing-subscriber`. It is enabled by default.
//!
//! The crate reports progress through [tracing](https://docs.rs/tracing)
//! events. Install a subscriber to see them.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod keys;
pub mod magic;
pub mod mnemonic;
pub mod report;
pub mod sets;
pub mod table;
