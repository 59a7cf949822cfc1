//! Integer-key contract controller
//!
//! Builds Scheme-style messages for the integer-key contract from
//! `integer_key` command lines and hands them to a submission collaborator:
//! - typed argument parsing for the ten subcommands
//! - a closed [`ContractMessage`] union with a single wire serializer
//! - escrow attestation decoding for `disburse` / `exchange`
//! - session bindings for reusing results in later commands
//! - error and logging facilities shared with the CLI

pub mod attestation;
pub mod bindings;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod logging_facility;
pub mod message;
pub mod request;
pub mod session;
pub mod sexpr;
pub mod submit;
pub mod words;

#[doc(hidden)]
pub use intkey_core_types;

// Re-export commonly used types
pub use bindings::{BindingTable, Bindings};
pub use config::ClientConfig;
pub use dispatch::{dispatch, DispatchOutcome};
pub use errors::{ErrorTier, ExError, ExErrorKind, IntKeyError, Result};
pub use message::ContractMessage;
pub use request::{IntKeyCommand, IntKeyRequest, SharedOptions};
pub use session::{Session, SessionState};
pub use sexpr::SExpr;
pub use submit::{ContractSender, Submission, SubmitOptions};
