//! Command dispatcher
//!
//! Turns one `integer_key` argument list into exactly one contract
//! submission:
//!
//! 1. parse the words into an [`IntKeyRequest`],
//! 2. build the [`ContractMessage`], decoding the attestation for
//!    `disburse`/`exchange`,
//! 3. hand the [`Submission`] to the sender,
//! 4. bind a non-empty result when the command names a symbol.
//!
//! Failures in steps 1 and 2 return before anything is sent.
//!
//! ## Example
//!
//! ```
//! use intkey_core::{dispatch, BindingTable, ContractSender, SessionState, Submission};
//!
//! struct Echo;
//! impl ContractSender for Echo {
//!     fn send_to_contract(
//!         &mut self,
//!         _state: &SessionState,
//!         submission: &Submission,
//!     ) -> intkey_core::Result<Option<String>> {
//!         Ok(Some(submission.wire()))
//!     }
//! }
//!
//! let state = SessionState::default();
//! let mut bindings = BindingTable::new();
//! let out = dispatch(&state, &mut Echo, &mut bindings, &["create", "-k", "apple", "-v", "3"]).unwrap();
//! assert_eq!(out.message.to_wire(), r#"'(create "apple" 3)"#);
//! ```

use crate::attestation::{EscrowAttestation, ExchangeAttestation};
use crate::bindings::Bindings;
use crate::errors::Result;
use crate::message::ContractMessage;
use crate::request::{IntKeyCommand, IntKeyRequest};
use crate::session::SessionState;
use crate::submit::{ContractSender, Submission};
use crate::{log_op_end, log_op_error, log_op_start};
use intkey_core_types::{RequestContext, RequestId};
use std::time::Instant;

/// Result of a successful dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub request_id: RequestId,
    pub command: &'static str,
    pub message: ContractMessage,
    /// Text returned by the sender, if any
    pub result: Option<String>,
    /// Symbol the result was bound to, if any
    pub bound: Option<String>,
}

/// Dispatch one command under a fresh request id
pub fn dispatch<S, B, T>(
    state: &SessionState,
    sender: &mut S,
    bindings: &mut B,
    pargs: &[T],
) -> Result<DispatchOutcome>
where
    S: ContractSender + ?Sized,
    B: Bindings + ?Sized,
    T: AsRef<str>,
{
    dispatch_with_context(RequestContext::new(), state, sender, bindings, pargs)
}

/// Dispatch one command, logging under the caller's request context
pub fn dispatch_with_context<S, B, T>(
    ctx: RequestContext,
    state: &SessionState,
    sender: &mut S,
    bindings: &mut B,
    pargs: &[T],
) -> Result<DispatchOutcome>
where
    S: ContractSender + ?Sized,
    B: Bindings + ?Sized,
    T: AsRef<str>,
{
    let start = Instant::now();
    let ctx = match IntKeyCommand::requested(pargs) {
        Some(name) => ctx.with_command(name),
        None => ctx,
    };
    let request_id = ctx.request_id.as_str().to_string();
    log_op_start!(
        "dispatch",
        request_id = request_id.as_str(),
        command = ctx.command.as_deref().unwrap_or("-"),
    );

    let result = run(ctx, state, sender, bindings, pargs);
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(outcome) => {
            log_op_end!(
                "dispatch",
                duration_ms = duration_ms,
                request_id = request_id.as_str(),
                command = outcome.command,
                commit = !outcome.message.is_read_only(),
                bound = outcome.bound.is_some(),
            );
        }
        Err(err) => {
            log_op_error!(
                "dispatch",
                err.clone(),
                duration_ms = duration_ms,
                request_id = request_id.as_str(),
            );
        }
    }

    result
}

fn run<S, B, T>(
    ctx: RequestContext,
    state: &SessionState,
    sender: &mut S,
    bindings: &mut B,
    pargs: &[T],
) -> Result<DispatchOutcome>
where
    S: ContractSender + ?Sized,
    B: Bindings + ?Sized,
    T: AsRef<str>,
{
    let request = IntKeyRequest::parse(pargs.iter().map(|a| a.as_ref()))?;

    let message = build_message(&request.command)?;
    let submission = Submission::new(&request.options, message);
    tracing::debug!(
        request_id = ctx.request_id.as_str(),
        command = request.command.name(),
        message = %submission.message,
        "submitting"
    );

    let result = sender.send_to_contract(state, &submission)?;

    let mut bound = None;
    if let (Some(symbol), Some(value)) = (request.command.symbol(), result.as_deref()) {
        if !value.is_empty() {
            bindings.bind(symbol, value.to_string());
            bound = Some(symbol.to_string());
        }
    }

    Ok(DispatchOutcome {
        request_id: ctx.request_id,
        command: request.command.name(),
        message: submission.message,
        result,
        bound,
    })
}

/// Build the contract message for a parsed command
///
/// # Errors
///
/// Attestation decoding errors for `disburse` and `exchange`.
pub fn build_message(command: &IntKeyCommand) -> Result<ContractMessage> {
    let message = match command {
        IntKeyCommand::GetSigningKey(_) => ContractMessage::GetPublicSigningKey,
        IntKeyCommand::Create(args) => ContractMessage::Create {
            key: args.key.clone(),
            value: args.value,
        },
        IntKeyCommand::Inc(args) => ContractMessage::Inc {
            key: args.key.clone(),
            value: args.value,
        },
        IntKeyCommand::Dec(args) => ContractMessage::Dec {
            key: args.key.clone(),
            value: args.value,
        },
        IntKeyCommand::Get(args) => ContractMessage::GetValue {
            key: args.key.clone(),
        },
        IntKeyCommand::Transfer(args) => ContractMessage::TransferOwnership {
            key: args.key.clone(),
            owner: args.owner.clone(),
        },
        IntKeyCommand::Escrow(args) => ContractMessage::Escrow {
            key: args.key.clone(),
            agent: args.agent.clone(),
        },
        IntKeyCommand::Attestation(args) => ContractMessage::EscrowAttestation {
            key: args.key.clone(),
        },
        IntKeyCommand::Disburse(args) => {
            let attestation = EscrowAttestation::parse(&args.attestation)?;
            ContractMessage::Disburse {
                asset_key: attestation.asset_key,
                dependencies: attestation.dependencies,
                signature: attestation.signature,
            }
        }
        IntKeyCommand::Exchange(args) => {
            let attestation = ExchangeAttestation::parse(&args.attestation)?;
            ContractMessage::ExchangeOwnership {
                offered_key: attestation.offered_key,
                max_bid_key: attestation.max_bid_key,
                dependencies: attestation.dependencies,
                signature: attestation.signature,
            }
        }
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{KeyArgs, SettlementArgs};

    #[test]
    fn test_build_get_message() {
        let msg = build_message(&IntKeyCommand::Get(KeyArgs {
            key: "apple".to_string(),
        }))
        .unwrap();
        assert_eq!(msg.to_wire(), r#"'(get-value "apple")"#);
    }

    #[test]
    fn test_build_disburse_rejects_garbage() {
        let cmd = IntKeyCommand::Disburse(SettlementArgs {
            attestation: "(((".to_string(),
        });
        assert!(build_message(&cmd).is_err());
    }
}
