//! Typed `integer_key` command requests
//!
//! Usage: integer_key [-e URL] [-f PATH] [-q] [-w] <SUBCOMMAND> [ARGS]

use crate::errors::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Options accepted by every subcommand
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct SharedOptions {
    /// URL of the enclave service to use
    #[arg(short, long, global = true)]
    pub enclave: Option<String>,

    /// File where contract data is stored
    #[arg(short = 'f', long, global = true)]
    pub save_file: Option<PathBuf>,

    /// Suppress printing the result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Wait for the transaction to commit
    #[arg(short, long, global = true)]
    pub wait: bool,
}

#[derive(Debug, Parser)]
#[command(name = "integer_key", no_binary_name = true)]
#[command(about = "Invoke integer-key contract commands", long_about = None)]
struct IntKeyArgs {
    #[command(flatten)]
    options: SharedOptions,

    #[command(subcommand)]
    command: IntKeyCommand,
}

/// A fully parsed `integer_key` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntKeyRequest {
    pub options: SharedOptions,
    pub command: IntKeyCommand,
}

impl IntKeyRequest {
    /// Parse argument words (without the command name itself)
    ///
    /// Help requests surface as a usage error with code 0.
    pub fn parse<I, T>(pargs: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let args = IntKeyArgs::try_parse_from(pargs)?;
        Ok(Self {
            options: args.options,
            command: args.command,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum IntKeyCommand {
    /// Fetch the contract's public signing key
    #[command(name = "get_signing_key")]
    GetSigningKey(SymbolArgs),

    /// Create a key
    #[command(name = "create")]
    Create(CreateArgs),

    /// Increment a key
    #[command(name = "inc")]
    Inc(AdjustArgs),

    /// Decrement a key
    #[command(name = "dec")]
    Dec(AdjustArgs),

    /// Retrieve the value of a key
    #[command(name = "get")]
    Get(KeyArgs),

    /// Transfer ownership of a key
    #[command(name = "transfer")]
    Transfer(TransferArgs),

    /// Escrow a key with an agent
    #[command(name = "escrow")]
    Escrow(EscrowArgs),

    /// Fetch the escrow attestation for a key
    #[command(name = "attestation")]
    Attestation(AttestationArgs),

    /// Disburse an escrowed key
    #[command(name = "disburse")]
    Disburse(SettlementArgs),

    /// Exchange ownership of two escrowed keys
    #[command(name = "exchange")]
    Exchange(SettlementArgs),
}

impl IntKeyCommand {
    /// Every subcommand name, in help order
    pub const NAMES: [&'static str; 10] = [
        "get_signing_key",
        "create",
        "inc",
        "dec",
        "get",
        "transfer",
        "escrow",
        "attestation",
        "disburse",
        "exchange",
    ];

    /// Subcommand named by unparsed argument words, if any
    ///
    /// Skips leading shared options and their values. Used to tag log events
    /// before the words have been validated.
    pub fn requested<T: AsRef<str>>(pargs: &[T]) -> Option<&'static str> {
        let mut words = pargs.iter().map(AsRef::as_ref);
        while let Some(word) = words.next() {
            match word {
                "-e" | "--enclave" | "-f" | "--save-file" => {
                    words.next();
                }
                w if w.starts_with('-') => {}
                w => return Self::NAMES.iter().copied().find(|name| *name == w),
            }
        }
        None
    }

    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            IntKeyCommand::GetSigningKey(_) => "get_signing_key",
            IntKeyCommand::Create(_) => "create",
            IntKeyCommand::Inc(_) => "inc",
            IntKeyCommand::Dec(_) => "dec",
            IntKeyCommand::Get(_) => "get",
            IntKeyCommand::Transfer(_) => "transfer",
            IntKeyCommand::Escrow(_) => "escrow",
            IntKeyCommand::Attestation(_) => "attestation",
            IntKeyCommand::Disburse(_) => "disburse",
            IntKeyCommand::Exchange(_) => "exchange",
        }
    }

    /// Symbol the result should be bound to, for commands that bind
    pub fn symbol(&self) -> Option<&str> {
        match self {
            IntKeyCommand::GetSigningKey(args) => args.symbol.as_deref(),
            IntKeyCommand::Attestation(args) => args.symbol.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct SymbolArgs {
    /// Binding symbol for result
    #[arg(short, long)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct CreateArgs {
    /// Key to create
    #[arg(short, long)]
    pub key: String,

    /// Initial value to give to the key
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AdjustArgs {
    /// Key to adjust
    #[arg(short, long)]
    pub key: String,

    /// Amount to adjust by
    #[arg(short, long, allow_negative_numbers = true)]
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct KeyArgs {
    /// Key to retrieve
    #[arg(short, long)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct TransferArgs {
    /// Key to transfer
    #[arg(short, long)]
    pub key: String,

    /// Identity to transfer ownership to
    #[arg(short, long)]
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct EscrowArgs {
    /// Key to escrow
    #[arg(short, long)]
    pub key: String,

    /// Identity of the escrow agent
    #[arg(short, long)]
    pub agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AttestationArgs {
    /// Escrowed key
    #[arg(short, long)]
    pub key: String,

    /// Binding symbol for result
    #[arg(short, long)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct SettlementArgs {
    /// Attestation from the escrow agent
    #[arg(short, long)]
    pub attestation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IntKeyError;

    #[test]
    fn test_create_value_defaults_to_zero() {
        let req = IntKeyRequest::parse(["create", "-k", "apple"]).unwrap();
        assert_eq!(
            req.command,
            IntKeyCommand::Create(CreateArgs {
                key: "apple".to_string(),
                value: 0
            })
        );
    }

    #[test]
    fn test_negative_value_accepted() {
        let req = IntKeyRequest::parse(["inc", "-k", "apple", "-v", "-3"]).unwrap();
        match req.command {
            IntKeyCommand::Inc(args) => assert_eq!(args.value, -3),
            other => panic!("Wrong command variant: {:?}", other),
        }
    }

    #[test]
    fn test_shared_options_before_and_after_subcommand() {
        let before = IntKeyRequest::parse(["-q", "-e", "http://e:7101", "get", "-k", "a"]).unwrap();
        let after = IntKeyRequest::parse(["get", "-k", "a", "-q", "-e", "http://e:7101"]).unwrap();

        assert_eq!(before, after);
        assert!(before.options.quiet);
        assert!(!before.options.wait);
        assert_eq!(before.options.enclave.as_deref(), Some("http://e:7101"));
    }

    #[test]
    fn test_inc_requires_value() {
        let err = IntKeyRequest::parse(["inc", "-k", "apple"]).unwrap_err();
        assert_eq!(err.usage_code(), Some(2));
    }

    #[test]
    fn test_non_integer_value_rejected() {
        let err = IntKeyRequest::parse(["create", "-k", "a", "-v", "ten"]).unwrap_err();
        assert!(matches!(err, IntKeyError::Usage { code: 2, .. }));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        let err = IntKeyRequest::parse(["frobnicate"]).unwrap_err();
        assert_eq!(err.usage_code(), Some(2));
    }

    #[test]
    fn test_help_is_code_zero() {
        let err = IntKeyRequest::parse(["--help"]).unwrap_err();
        assert_eq!(err.usage_code(), Some(0));
        assert!(err.to_string().contains("get_signing_key"));
    }

    #[test]
    fn test_requested_skips_shared_options() {
        assert_eq!(IntKeyCommand::requested(&["create", "-k", "a"]), Some("create"));
        assert_eq!(
            IntKeyCommand::requested(&["-q", "-e", "get", "-w", "dec", "-k", "a"]),
            Some("dec")
        );
        assert_eq!(IntKeyCommand::requested(&["--save-file=x", "get"]), Some("get"));
        assert_eq!(IntKeyCommand::requested(&["burn", "-k", "a"]), None);
        assert_eq!(IntKeyCommand::requested::<&str>(&[]), None);
    }

    #[test]
    fn test_names_match_help() {
        let help = IntKeyRequest::parse(["--help"]).unwrap_err().to_string();
        for name in IntKeyCommand::NAMES {
            assert!(help.contains(name), "{} missing from help", name);
        }
    }

    #[test]
    fn test_symbol_only_for_binding_commands() {
        let req = IntKeyRequest::parse(["attestation", "-k", "a", "-s", "att"]).unwrap();
        assert_eq!(req.command.symbol(), Some("att"));
        assert_eq!(req.command.name(), "attestation");

        let req = IntKeyRequest::parse(["get", "-k", "a"]).unwrap();
        assert_eq!(req.command.symbol(), None);
    }
}
