//! Checks the keys derived for the reference sets.
//!
//! The expected values are the ones the zone file parser's lookup tables
//! were built from. If any of these change, the tables need rebuilding.

use rstest::rstest;
use std::collections::HashSet;
use zone_keys::config::SearchConfig;
use zone_keys::keys::{
    bucket_of, generate, generate_reference, key_of, slot_of, Generator,
    Role, BUCKETS,
};
use zone_keys::magic::{self, Scheme};
use zone_keys::mnemonic::MnemonicError;
use zone_keys::sets;

#[rstest]
#[case("CH", 2, 250)]
#[case("IN", 8, 36)]
#[case("A", 0, 200)]
#[case("AAAA", 0, 203)]
#[case("EUI48", 4, 173)]
#[case("L32", 11, 129)]
#[case("L64", 11, 143)]
#[case("NSAP-PTR", 13, 70)]
#[case("NSEC3PARAM", 13, 37)]
#[case("SOA", 18, 202)]
#[case("X25", 23, 150)]
#[case("ZONEMD", 25, 226)]
fn known_keys(#[case] mnemonic: &str, #[case] bucket: u8, #[case] slot: u8) {
    assert_eq!(bucket_of(mnemonic), Ok(bucket));
    assert_eq!(slot_of(mnemonic), Ok(slot));
}

#[rstest]
#[case("")]
fn empty_mnemonic(#[case] mnemonic: &str) {
    assert_eq!(bucket_of(mnemonic), Err(MnemonicError::Empty));
    assert_eq!(slot_of(mnemonic), Err(MnemonicError::Empty));
}

#[test]
fn reference_sets_are_collision_free() {
    let report = generate_reference();
    assert_eq!(report.len(), 71);
    assert_eq!(report.collision_count(), 0);

    // Double check without the presence table.
    let keys: HashSet<_> =
        report.entries().iter().map(|entry| entry.key).collect();
    assert_eq!(keys.len(), 71);
    assert!(keys.iter().all(|key| usize::from(key.bucket()) < BUCKETS));
}

#[test]
fn classes_and_types_share_the_table() {
    let mut generator = Generator::new();
    generator.extend(Role::Class, sets::CLASSES.iter().copied()).unwrap();
    generator.extend(Role::Type, sets::TYPES.iter().copied()).unwrap();
    // "CS" as a type collides with the class of the same name.
    let entry = generator.push(Role::Type, "CS").unwrap();
    assert!(entry.collision);
    assert_eq!(entry.key, key_of("CS").unwrap());

    let report = generator.finish();
    assert_eq!(report, {
        let mut again = Generator::new();
        again.extend(Role::Class, sets::CLASSES.iter().copied()).unwrap();
        again.extend(Role::Type, sets::TYPES.iter().copied()).unwrap();
        again.push(Role::Type, "CS").unwrap();
        again.finish()
    });
    assert_eq!(report.collision_count(), 1);
}

#[test]
fn generate_is_idempotent() {
    let first = generate(Role::Type, sets::TYPES.iter().copied()).unwrap();
    let second = generate(Role::Type, sets::TYPES.iter().copied()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn keys_do_not_depend_on_order() {
    let forward = generate(Role::Type, sets::TYPES.iter().copied()).unwrap();
    let backward =
        generate(Role::Type, sets::TYPES.iter().rev().copied()).unwrap();
    for entry in forward.entries() {
        let other = backward
            .entries()
            .iter()
            .find(|other| other.mnemonic == entry.mnemonic)
            .unwrap();
        assert_eq!(entry.key, other.key);
    }
}

#[rstest]
#[case(Scheme::ALGORITHMS, sets::SECURITY_ALGORITHMS, 1, 29874)]
#[case(Scheme::CERTIFICATES, sets::CERTIFICATE_TYPES, 1, 98112)]
#[case(Scheme::SERVICES, sets::SERVICES, 138261570, 138261570)]
fn known_magic(
    #[case] scheme: Scheme,
    #[case] names: &'static [(&'static str, u16)],
    #[case] start: u64,
    #[case] magic: u64,
) {
    let mut config = SearchConfig::new();
    config.set_start(start);
    let table = magic::search(scheme, names.iter().copied(), &config).unwrap();
    assert_eq!(table.magic(), magic);

    let slots: HashSet<_> =
        table.entries().iter().map(|entry| entry.slot).collect();
    assert_eq!(slots.len(), names.len());
    for &(name, code) in names {
        assert_eq!(table.lookup(name).map(|entry| entry.code), Some(code));
    }
}

#[cfg(feature = "serde")]
#[test]
fn json_output() {
    let report = generate(Role::Class, ["IN", "IN"]).unwrap();
    assert_eq!(
        serde_json::to_string(&report).unwrap(),
        concat!(
            r#"[{"role":"class","mnemonic":"IN","bucket":8,"hash":36,"#,
            r#""collided":false},"#,
            r#"{"role":"class","mnemonic":"IN","bucket":8,"hash":36,"#,
            r#""collided":true}]"#,
        )
    );

    let table = magic::search(
        Scheme::new(2).unwrap(),
        [("A", 1)],
        &SearchConfig::new(),
    )
    .unwrap();
    assert_eq!(
        serde_json::to_string(&table).unwrap(),
        r#"{"magic":1,"entries":[{"name":"A","code":1,"slot":0}]}"#
    );
}
