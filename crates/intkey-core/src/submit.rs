//! Boundary to the contract submission collaborator
//!
//! The dispatcher hands one [`Submission`] per command to a [`ContractSender`].
//! Talking to the enclave, committing and waiting are the sender's business.

use crate::errors::Result;
use crate::message::ContractMessage;
use crate::request::SharedOptions;
use crate::session::SessionState;
use std::path::PathBuf;

/// Flags forwarded verbatim to the sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Do not print the result
    pub quiet: bool,
    /// Block until the transaction is committed
    pub wait: bool,
    /// Commit the transaction; `false` for read-only queries
    pub commit: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            wait: false,
            commit: true,
        }
    }
}

/// One message bound for the contract, with its routing overrides
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub save_file: Option<PathBuf>,
    pub enclave: Option<String>,
    pub message: ContractMessage,
    pub options: SubmitOptions,
}

impl Submission {
    /// Build the submission for `message` under the parsed shared options
    pub fn new(options: &SharedOptions, message: ContractMessage) -> Self {
        let commit = !message.is_read_only();
        Self {
            save_file: options.save_file.clone(),
            enclave: options.enclave.clone(),
            message,
            options: SubmitOptions {
                quiet: options.quiet,
                wait: options.wait,
                commit,
            },
        }
    }

    /// Wire text of the message
    pub fn wire(&self) -> String {
        self.message.to_wire()
    }
}

/// Sends messages to the contract
///
/// Returns the textual result for query-like operations and `None` for
/// operations that produce nothing.
pub trait ContractSender {
    /// # Errors
    ///
    /// Any failure to deliver or execute the message, reported as
    /// `IntKeyError::Submission`.
    fn send_to_contract(
        &mut self,
        state: &SessionState,
        submission: &Submission,
    ) -> Result<Option<String>>;
}

impl<S: ContractSender + ?Sized> ContractSender for &mut S {
    fn send_to_contract(
        &mut self,
        state: &SessionState,
        submission: &Submission,
    ) -> Result<Option<String>> {
        (**self).send_to_contract(state, submission)
    }
}
