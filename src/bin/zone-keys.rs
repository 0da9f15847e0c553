//! Prints perfect-hash keys for DNS identifiers.
//!
//! Without a subcommand, derives the keys for DNS classes and record types
//! and prints one line per mnemonic. The `magic` subcommand searches for a
//! magic value for one of the single-level tables.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zone_keys::config::SearchConfig;
use zone_keys::keys::{generate_reference, Generator, Role};
use zone_keys::magic::{self, Scheme, SearchError};
use zone_keys::mnemonic::MnemonicError;
use zone_keys::report::Report;
use zone_keys::sets;

//------------ Arguments -----------------------------------------------------

/// Arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Options for the class and type keys.
    #[command(flatten)]
    keys: KeysArgs,

    /// Optional subcommand.
    #[command(subcommand)]
    command: Option<Command>,
}

/// The subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Search a magic value for a single-level table.
    Magic(MagicArgs),
}

/// Options for the class and type keys.
#[derive(Args, Debug)]
struct KeysArgs {
    /// JSON file with "classes" and "types" to use instead of the
    /// built-in sets.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Exit with an error status if any collision was found.
    #[arg(long)]
    strict: bool,
}

/// Options for the magic value search.
#[derive(Args, Debug)]
struct MagicArgs {
    /// The set to search a magic value for.
    #[arg(value_enum)]
    set: MagicSet,

    /// The first magic value to try. Defaults to the known magic value.
    #[arg(long)]
    start: Option<u64>,

    /// The maximum number of magic values to try.
    #[arg(long)]
    limit: Option<u64>,

    /// Also print the slot-indexed table.
    #[arg(long)]
    table: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

/// The output formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Format {
    /// One line per mnemonic.
    Text,

    /// A JSON document.
    Json,
}

/// The sets for which a magic value can be searched.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum MagicSet {
    /// DNSSEC security algorithms.
    Algorithms,

    /// Certificate types of the CERT record.
    Certificates,

    /// Well-known services of the WKS record.
    Services,
}

impl MagicSet {
    /// Returns the scheme and names of the set.
    fn scheme_and_names(self) -> (Scheme, &'static [(&'static str, u16)]) {
        match self {
            MagicSet::Algorithms => {
                (Scheme::ALGORITHMS, sets::SECURITY_ALGORITHMS)
            }
            MagicSet::Certificates => {
                (Scheme::CERTIFICATES, sets::CERTIFICATE_TYPES)
            }
            MagicSet::Services => (Scheme::SERVICES, sets::SERVICES),
        }
    }

    /// Returns the macro names for used and unused slots of the table.
    fn slot_macros(self) -> (&'static str, &'static str) {
        match self {
            MagicSet::Services => ("SERVICE", "UNKNOWN_SERVICE"),
            _ => ("ENTRY", "UNKNOWN"),
        }
    }

    /// Returns the magic value currently in use for the set.
    fn known_magic(self) -> u64 {
        match self {
            MagicSet::Algorithms => 29874,
            MagicSet::Certificates => 98112,
            MagicSet::Services => 138261570,
        }
    }
}

//------------ Input ---------------------------------------------------------

/// The content of an input file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Input {
    /// The class mnemonics.
    #[serde(default)]
    classes: Vec<String>,

    /// The record type mnemonics.
    #[serde(default)]
    types: Vec<String>,
}

impl Input {
    /// Loads the input from a JSON file.
    fn load(path: &Path) -> Result<Self, Error> {
        let file =
            File::open(path).map_err(|err| Error::Io(path.into(), err))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|err| Error::Json(path.into(), err))
    }

    /// Generates the keys for the classes followed by the types.
    fn generate(&self) -> Result<Report, Error> {
        let mut generator = Generator::new();
        generator
            .extend(Role::Class, self.classes.iter().map(String::as_str))?;
        generator.extend(Role::Type, self.types.iter().map(String::as_str))?;
        Ok(generator.finish())
    }
}

//------------ Error ---------------------------------------------------------

/// Anything that can go wrong.
#[derive(Debug)]
enum Error {
    /// Reading a file failed.
    Io(PathBuf, io::Error),

    /// A file contained invalid JSON.
    Json(PathBuf, serde_json::Error),

    /// A mnemonic cannot be hashed.
    Mnemonic(MnemonicError),

    /// The magic value search failed.
    Search(SearchError),

    /// Writing the output failed.
    Output(io::Error),
}

impl From<MnemonicError> for Error {
    fn from(err: MnemonicError) -> Self {
        Error::Mnemonic(err)
    }
}

impl From<SearchError> for Error {
    fn from(err: SearchError) -> Self {
        Error::Search(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            Error::Json(path, err) => {
                write!(f, "{}: {}", path.display(), err)
            }
            Error::Mnemonic(err) => err.fmt(f),
            Error::Search(err) => err.fmt(f),
            Error::Output(err) => err.fmt(f),
        }
    }
}

//------------ main ----------------------------------------------------------

/// Setup logging of events reported by the library.
///
/// Use the RUST_LOG environment variable to override the defaults. E.g., to
/// see every derived key:
///   RUST_LOG=zone_keys=TRACE
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .without_time()
        .try_init()
        .ok();
}

/// Runs the tool.
fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let res = match cli.command {
        None => run_keys(&cli.keys),
        Some(Command::Magic(ref args)) => run_magic(args),
    };
    match res {
        Ok(code) => code,
        Err(err) => {
            eprintln!("zone-keys: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Prints the class and type keys.
fn run_keys(args: &KeysArgs) -> Result<ExitCode, Error> {
    let input = match args.input {
        Some(ref path) => Some(Input::load(path)?),
        None => None,
    };
    let report = match input {
        Some(ref input) => input.generate()?,
        None => generate_reference(),
    };

    let output = match args.format {
        Format::Text => report.to_string(),
        Format::Json => to_json(&report)?,
    };
    write_output(&mut io::stdout().lock(), &output)?;

    let collisions = report.collision_count();
    info!("{} mnemonics, {} collisions", report.len(), collisions);
    if args.strict && collisions > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Searches and prints a magic value.
fn run_magic(args: &MagicArgs) -> Result<ExitCode, Error> {
    let (scheme, names) = args.set.scheme_and_names();
    let mut config = SearchConfig::new();
    config.set_start(args.start.unwrap_or_else(|| args.set.known_magic()));
    if let Some(limit) = args.limit {
        config.set_limit(limit);
    }

    let table = magic::search(scheme, names.iter().copied(), &config)?;
    let output = match args.format {
        Format::Text if args.table => {
            let (entry, unknown) = args.set.slot_macros();
            format!("{}{}", table, table.display_slots_as(entry, unknown))
        }
        Format::Text => table.to_string(),
        Format::Json => to_json(&table)?,
    };
    write_output(&mut io::stdout().lock(), &output)?;
    Ok(ExitCode::SUCCESS)
}

/// Renders a value as pretty JSON followed by a line feed.
fn to_json<T: serde::Serialize>(value: &T) -> Result<String, Error> {
    let mut res = serde_json::to_string_pretty(value)
        .map_err(|err| Error::Output(err.into()))?;
    res.push('\n');
    Ok(res)
}

/// Writes the output to `target`.
///
/// A reader that went away early, e.g., `head`, is not an error.
fn write_output(target: &mut impl Write, output: &str) -> Result<(), Error> {
    match target
        .write_all(output.as_bytes())
        .and_then(|_| target.flush())
    {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        res => res.map_err(Error::Output),
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    /// A writer whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    /// A writer that fails for real.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::Other.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_pipe_is_not_an_error() {
        assert!(write_output(&mut ClosedPipe, "class: IN\n").is_ok());
    }

    #[test]
    fn write_errors_are_reported() {
        assert!(matches!(
            write_output(&mut FullDisk, "class: IN\n"),
            Err(Error::Output(_))
        ));
    }

    #[test]
    fn output_is_written() {
        let mut buf = Vec::new();
        write_output(&mut buf, "class: IN\n").unwrap();
        assert_eq!(buf, b"class: IN\n");
    }

    #[test]
    fn services_keep_their_macros() {
        assert_eq!(
            MagicSet::Services.slot_macros(),
            ("SERVICE", "UNKNOWN_SERVICE")
        );
        assert_eq!(MagicSet::Algorithms.slot_macros(), ("ENTRY", "UNKNOWN"));
    }
}
