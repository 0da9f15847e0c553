//! Reference sets of mnemonics.
//!
//! These are the sets the key derivations of this crate have been tuned
//! for. Changing any of them requires rerunning the respective generator
//! and checking the result for collisions.

//------------ Classes and Types ---------------------------------------------

/// The DNS classes recognized by the zone file parser.
///
/// See the [DNS CLASSes IANA registry].
///
/// [DNS CLASSes IANA registry]: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
pub const CLASSES: &[&str] = &["CH", "CS", "HS", "IN"];

/// The resource record types recognized by the zone file parser.
///
/// See the [Resource Record (RR) TYPEs IANA registry].
///
/// [Resource Record (RR) TYPEs IANA registry]: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
#[rustfmt::skip]
pub const TYPES: &[&str] = &[
    "A", "A6", "AAAA", "AFSDB", "APL",
    "CAA", "CDS", "CDNSKEY", "CERT", "CNAME", "CSYNC",
    "DNAME", "DS", "DNSKEY", "DHCID", "DLV",
    "EUI48", "EUI64",
    "GPOS",
    "HINFO", "HIP", "HTTPS",
    "IPSECKEY", "ISDN",
    "KEY", "KX",
    "L32", "L64", "LOC", "LP",
    "MB", "MD", "MF", "MG", "MINFO", "MR", "MX",
    "NAPTR", "NID", "NS", "NSAP", "NSAP-PTR", "NSEC", "NSEC3",
    "NSEC3PARAM", "NULL", "NXT",
    "OPENPGPKEY", "OPT",
    "PTR", "PX",
    "RP", "RRSIG", "RT",
    "SIG", "SMIMEA", "SOA", "SPF", "SRV", "SSHFP", "SVCB",
    "TXT", "TLSA",
    "URI",
    "WKS",
    "X25",
    "ZONEMD",
];

//------------ Coded Sets ----------------------------------------------------

/// The DNSSEC security algorithms and their numbers.
///
/// See the [DNS Security Algorithm Numbers IANA registry].
///
/// [DNS Security Algorithm Numbers IANA registry]: https://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml
pub const SECURITY_ALGORITHMS: &[(&str, u16)] = &[
    ("RSAMD5", 1),
    ("DH", 2),
    ("DSA", 3),
    ("ECC", 4),
    ("RSASHA1", 5),
    ("DSA-NSEC-SHA1", 6),
    ("RSASHA1-NSEC3-SHA1", 7),
    ("RSASHA256", 8),
    ("RSASHA512", 10),
    ("ECC-GOST", 12),
    ("ECDSAP256SHA256", 13),
    ("ECDSAP384SHA384", 14),
    ("INDIRECT", 252),
    ("PRIVATEDNS", 253),
    ("PRIVATEOID", 254),
];

/// The certificate types of the CERT record and their numbers.
///
/// See the [CERT RR Certificate Types IANA registry].
///
/// [CERT RR Certificate Types IANA registry]: https://www.iana.org/assignments/cert-rr-types/cert-rr-types.xhtml
pub const CERTIFICATE_TYPES: &[(&str, u16)] = &[
    ("PKIX", 1),
    ("SPKI", 2),
    ("PGP", 3),
    ("IPKIX", 4),
    ("ISPKI", 5),
    ("IPGP", 6),
    ("ACPKIX", 7),
    ("IACPKIX", 8),
    ("OID", 254),
    ("URI", 253),
];

/// Well-known services and their port numbers as used by the WKS record.
pub const SERVICES: &[(&str, u16)] = &[
    ("tcpmux", 1),
    ("echo", 7),
    ("ftp-data", 20),
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("lmtp", 24),
    ("smtp", 25),
    ("nicname", 43),
    ("domain", 53),
    ("whoispp", 63),
    ("http", 80),
    ("kerberos", 88),
    ("npp", 92),
    ("pop3", 110),
    ("nntp", 119),
    ("ntp", 123),
    ("imap", 143),
    ("snmp", 161),
    ("snmptrap", 162),
    ("bgmp", 264),
    ("ptp-event", 319),
    ("ptp-general", 320),
    ("nnsp", 433),
    ("https", 443),
    ("submission", 587),
    // The prefix hash only sees the first eight octets. "submission" and
    // "submissions" differ only by length which the services scheme adds.
    ("submissions", 465),
    ("nntps", 563),
    ("ldaps", 636),
    ("domain-s", 853),
    ("ftps-data", 989),
    ("ftps", 990),
    ("imaps", 993),
    ("pop3s", 995),
];

//============ Tests =========================================================
