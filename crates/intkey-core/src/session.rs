//! Interactive session hosting the `integer_key` command
//!
//! A session owns the client configuration, the binding table and the
//! sender. Command failures are reported on the session's output and never
//! end the session.

use crate::bindings::{BindingTable, Bindings};
use crate::config::ClientConfig;
use crate::dispatch::{dispatch, DispatchOutcome};
use crate::errors::{IntKeyError, Result};
use crate::submit::{ContractSender, Submission};
use crate::words::split_words;
use std::io::Write;
use std::path::Path;

/// Session-wide state passed through to the sender
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    config: ClientConfig,
}

impl SessionState {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Enclave for a submission: its override, else the configured default
    pub fn enclave_for<'a>(&'a self, submission: &'a Submission) -> Option<&'a str> {
        submission
            .enclave
            .as_deref()
            .or(self.config.enclave.url.as_deref())
    }

    /// Contract state file for a submission: its override, else the configured default
    pub fn save_file_for<'a>(&'a self, submission: &'a Submission) -> Option<&'a Path> {
        submission
            .save_file
            .as_deref()
            .or(self.config.contract.save_file.as_deref())
    }
}

pub struct Session<S> {
    state: SessionState,
    bindings: BindingTable,
    sender: S,
}

impl<S: ContractSender> Session<S> {
    pub fn new(state: SessionState, sender: S) -> Self {
        Self {
            state,
            bindings: BindingTable::new(),
            sender,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Expand, split and dispatch one `integer_key` argument line
    ///
    /// # Errors
    ///
    /// Any error from binding expansion, word splitting or dispatch.
    pub fn run_integer_key(&mut self, args: &str) -> Result<DispatchOutcome> {
        let expanded = self.bindings.expand(args)?;
        let words = split_words(&expanded)?;
        dispatch(&self.state, &mut self.sender, &mut self.bindings, words.as_slice())
    }

    /// Run one `integer_key` argument line, reporting failures on `out`
    ///
    /// Help output (usage code 0) is written as-is. Every other failure
    /// becomes a single diagnostic line. Only a failure to write to `out`
    /// is returned as an error.
    pub fn do_integer_key(
        &mut self,
        args: &str,
        out: &mut dyn Write,
    ) -> std::io::Result<Option<DispatchOutcome>> {
        match self.run_integer_key(args) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) => {
                report_failure(args, &err, out)?;
                Ok(None)
            }
        }
    }
}

/// Write the session diagnostic for a failed command
pub fn report_failure(args: &str, err: &IntKeyError, out: &mut dyn Write) -> std::io::Result<()> {
    match err {
        IntKeyError::Usage { code: 0, message } => write!(out, "{}", message),
        IntKeyError::Usage { message, .. } => writeln!(
            out,
            "An error occurred processing {}: {}",
            args,
            usage_summary(message)
        ),
        other => writeln!(out, "An error occurred processing {}: {}", args, other),
    }
}

/// First line of a rendered usage error, without clap's `error: ` prefix
pub fn usage_summary(message: &str) -> &str {
    let line = message.lines().next().unwrap_or_default().trim();
    line.strip_prefix("error:").map(str::trim).unwrap_or(line)
}
