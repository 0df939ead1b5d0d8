//! # ledgerwire-cli
//!
//! Decode ledger protocol messages from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Decode a ledger entry from a file
//! ledgerwire decode --family ledger-entry entry.json
//!
//! # Reject unknown transaction types instead of falling back
//! echo '{"transaction_type": "Payment", ...}' | ledgerwire decode -f transaction --strict
//!
//! # List families and their discriminators
//! ledgerwire families
//! ```
//!
//! Unknown-discriminator policies are read from `--config`, or from
//! `ledgerwire/config.json` under the platform config directory.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ledgerwire_codec::{CodecConfig, Family, UnknownPolicy};
use ledgerwire_protocol::{
    protocol_registry, LedgerEntry, LedgerObjectSelector, Message, PseudoTransaction, Transaction,
};
use ledgerwire_wire::JsonCodec;
use tracing::debug;

mod error;

pub use error::CliError;

/// ledgerwire - decode and re-encode ledger protocol messages
#[derive(Parser, Debug)]
#[command(name = "ledgerwire")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file [default: <config dir>/ledgerwire/config.json]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a JSON wire value, print the typed value and its re-encoding
    Decode(DecodeArgs),
    /// List every family and its registered discriminators
    Families,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[arg(long, short, value_enum)]
    pub family: FamilyArg,

    /// Fail on discriminators this build does not know
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Decode unknown discriminators to their base fields
    #[arg(long)]
    pub lenient: bool,

    /// Input file; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    LedgerEntry,
    Transaction,
    PseudoTransaction,
    Selector,
}

impl FamilyArg {
    /// The registry name of the family.
    pub fn family_name(self) -> &'static str {
        match self {
            FamilyArg::LedgerEntry => LedgerEntry::NAME,
            FamilyArg::Transaction => Transaction::NAME,
            FamilyArg::PseudoTransaction => PseudoTransaction::NAME,
            FamilyArg::Selector => LedgerObjectSelector::NAME,
        }
    }
}

impl DecodeArgs {
    fn policy_override(&self) -> Option<UnknownPolicy> {
        if self.strict {
            Some(UnknownPolicy::Strict)
        } else if self.lenient {
            Some(UnknownPolicy::FallbackToBase)
        } else {
            None
        }
    }
}

/// Where the config file is looked up when `--config` is not given.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ledgerwire").join("config.json"))
}

/// Load the explicit config, else the default one if it exists, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<CodecConfig, CliError> {
    if let Some(path) = explicit {
        return Ok(CodecConfig::load(path)?);
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "loading default config");
            Ok(CodecConfig::load(&path)?)
        }
        _ => Ok(CodecConfig::default()),
    }
}

/// Run a parsed command line against stdin and stdout.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    execute(cli, &mut stdin.lock(), &mut stdout.lock())
}

/// Run a parsed command line with explicit input and output streams.
pub fn execute(cli: &Cli, input: &mut dyn Read, out: &mut dyn Write) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Decode(args) => decode(args, config, input, out),
        Command::Families => families(config, out),
    }
}

fn decode(
    args: &DecodeArgs,
    mut config: CodecConfig,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let family = args.family.family_name();
    if let Some(policy) = args.policy_override() {
        config = config.with_policy(family, policy);
    }

    let bytes = match &args.file {
        Some(path) => fs::read(path).map_err(|source| CliError::ReadInput {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut bytes = Vec::new();
            input.read_to_end(&mut bytes).map_err(CliError::ReadStdin)?;
            bytes
        }
    };

    let codec = JsonCodec;
    let wire = codec.decode_slice(&bytes)?;
    let registry = protocol_registry(config)?;
    let message = Message::decode(&registry, family, &wire)?;
    let encoded = codec.encode_pretty(&message.encode(&registry)?)?;

    writeln!(out, "{:#?}", message).map_err(CliError::Write)?;
    writeln!(out, "{}", encoded).map_err(CliError::Write)?;
    Ok(())
}

fn families(config: CodecConfig, out: &mut dyn Write) -> Result<(), CliError> {
    let registry = protocol_registry(config)?;
    for catalog in registry.describe() {
        let policy = registry.config().policy_for(catalog.name);
        writeln!(out, "{} [unknown: {}]", catalog, policy).map_err(CliError::Write)?;
    }
    Ok(())
}
