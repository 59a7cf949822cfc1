//! Dry-run submission collaborator
//!
//! Resolves where a submission would go, logs it and prints the wire text.
//! Nothing is sent, so no result is ever returned.

use intkey_core::{ContractSender, SessionState, Submission};
use std::io::Write;

pub struct DryRunSender<W> {
    out: W,
}

impl<W: Write> DryRunSender<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ContractSender for DryRunSender<W> {
    fn send_to_contract(
        &mut self,
        state: &SessionState,
        submission: &Submission,
    ) -> intkey_core::Result<Option<String>> {
        let save_file = state
            .save_file_for(submission)
            .map(|p| p.display().to_string());

        tracing::info!(
            method = submission.message.method(),
            enclave = state.enclave_for(submission).unwrap_or("-"),
            save_file = save_file.as_deref().unwrap_or("-"),
            commit = submission.options.commit,
            wait = submission.options.wait,
            "dry run submission"
        );

        if !submission.options.quiet {
            writeln!(self.out, "{}", submission.wire())?;
            self.out.flush()?;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intkey_core::{ContractMessage, SharedOptions};

    fn create_submission(quiet: bool) -> Submission {
        let options = SharedOptions {
            quiet,
            ..SharedOptions::default()
        };
        Submission::new(
            &options,
            ContractMessage::Create {
                key: "apple".to_string(),
                value: 3,
            },
        )
    }

    #[test]
    fn test_prints_wire_text() {
        let mut sender = DryRunSender::new(Vec::new());
        let result = sender
            .send_to_contract(&SessionState::default(), &create_submission(false))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(
            String::from_utf8(sender.out).unwrap(),
            "'(create \"apple\" 3)\n"
        );
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let mut sender = DryRunSender::new(Vec::new());
        sender
            .send_to_contract(&SessionState::default(), &create_submission(true))
            .unwrap();

        assert!(sender.out.is_empty());
    }
}
