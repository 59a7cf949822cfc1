use intkey_core::{ContractSender, IntKeyError, SessionState, Submission};
use std::collections::VecDeque;

/// Attestation for key `apple` with one dependency and a string signature
#[allow(dead_code)]
pub const APPLE_ATTESTATION: &str =
    r#"((("key" "apple") ("value" 10) ("owner" "alice")) (("dep-1" "h1")) "c2lnbmF0dXJl")"#;

/// Sender that records every submission and replays scripted results
#[derive(Default)]
pub struct RecordingSender {
    pub submissions: Vec<Submission>,
    responses: VecDeque<Option<String>>,
    failure: Option<String>,
}

#[allow(dead_code)]
impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `result` to the next submission
    pub fn respond_with(mut self, result: Option<&str>) -> Self {
        self.responses.push_back(result.map(str::to_string));
        self
    }

    /// Fail every submission with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn wires(&self) -> Vec<String> {
        self.submissions.iter().map(Submission::wire).collect()
    }
}

impl ContractSender for RecordingSender {
    fn send_to_contract(
        &mut self,
        _state: &SessionState,
        submission: &Submission,
    ) -> intkey_core::Result<Option<String>> {
        self.submissions.push(submission.clone());
        if let Some(reason) = &self.failure {
            return Err(IntKeyError::Submission {
                reason: reason.clone(),
            });
        }
        Ok(self.responses.pop_front().flatten())
    }
}
