use thiserror::Error;

/// Result type alias using IntKeyError
pub type Result<T> = std::result::Result<T, IntKeyError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Argument parsing
    Usage,

    // Attestation / expression decoding
    AttestationDecode,

    // Session input (binding expansion, word splitting)
    InvalidInput,

    // Submission collaborator
    ExternalService,

    // Environment
    Config,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Usage => "ERR_USAGE",
            ExErrorKind::AttestationDecode => "ERR_ATTESTATION_DECODE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used in log events plus the operation and
/// binding symbol needed to locate the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    symbol: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            symbol: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add binding symbol context
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(symbol) = &self.symbol {
            write!(f, " (symbol: {})", symbol)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error tier seen by the hosting session
///
/// The session decides how to report a failure from its tier alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// Raised by argument parsing; carries an exit-style status code
    Usage,
    /// The attestation argument could not be decoded
    AttestationDecode,
    /// The submission collaborator failed
    Submission,
    /// Session plumbing: binding expansion, word splitting, config, io
    Session,
}

/// Error taxonomy for integer-key controller operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntKeyError {
    /// Argument parsing stopped. `code` is 0 for help/version output.
    #[error("{message}")]
    Usage { code: i32, message: String },

    /// Expression text could not be parsed
    #[error("Malformed expression at byte {position}: {reason}")]
    MalformedExpression { position: usize, reason: String },

    /// Attestation has fewer positional fields than required
    #[error("Attestation is missing field {index}")]
    AttestationFieldMissing { index: usize },

    /// Attestation field is not a key/value mapping
    #[error("Attestation field {index} is not a mapping")]
    AttestationNotMapping { index: usize },

    /// Attestation mapping has no usable "key" entry
    #[error("Attestation field {index} has no \"key\" entry")]
    AttestationKeyMissing { index: usize },

    /// `$name` refers to a symbol with no binding
    #[error("Unbound symbol: {symbol}")]
    UnboundSymbol { symbol: String },

    /// `$` not followed by a valid placeholder
    #[error("Invalid placeholder at byte {position}")]
    InvalidPlaceholder { position: usize },

    /// Command line ends inside a quoted word
    #[error("No closing quotation")]
    UnbalancedQuote,

    /// Submission collaborator reported a failure
    #[error("Submission failed: {reason}")]
    Submission { reason: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// I/O failure while reading configuration or writing output
    #[error("I/O error: {reason}")]
    Io { reason: String },
}

impl IntKeyError {
    /// Tier used by the session error policy
    pub fn tier(&self) -> ErrorTier {
        match self {
            IntKeyError::Usage { .. } => ErrorTier::Usage,
            IntKeyError::MalformedExpression { .. }
            | IntKeyError::AttestationFieldMissing { .. }
            | IntKeyError::AttestationNotMapping { .. }
            | IntKeyError::AttestationKeyMissing { .. } => ErrorTier::AttestationDecode,
            IntKeyError::Submission { .. } => ErrorTier::Submission,
            IntKeyError::UnboundSymbol { .. }
            | IntKeyError::InvalidPlaceholder { .. }
            | IntKeyError::UnbalancedQuote
            | IntKeyError::Config { .. }
            | IntKeyError::Io { .. } => ErrorTier::Session,
        }
    }

    /// Exit-style status code for usage errors, `None` for every other error
    pub fn usage_code(&self) -> Option<i32> {
        match self {
            IntKeyError::Usage { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<IntKeyError> for ExError {
    fn from(err: IntKeyError) -> Self {
        let message = err.to_string();
        match err {
            IntKeyError::Usage { .. } => ExError::new(ExErrorKind::Usage)
                .with_op("parse_args")
                .with_message(message),

            IntKeyError::MalformedExpression { .. } => ExError::new(ExErrorKind::AttestationDecode)
                .with_op("parse_expression")
                .with_message(message),

            IntKeyError::AttestationFieldMissing { .. }
            | IntKeyError::AttestationNotMapping { .. }
            | IntKeyError::AttestationKeyMissing { .. } => {
                ExError::new(ExErrorKind::AttestationDecode)
                    .with_op("decode_attestation")
                    .with_message(message)
            }

            IntKeyError::UnboundSymbol { ref symbol } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("expand_bindings")
                .with_symbol(symbol.clone())
                .with_message(message),

            IntKeyError::InvalidPlaceholder { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("expand_bindings")
                .with_message(message),

            IntKeyError::UnbalancedQuote => ExError::new(ExErrorKind::InvalidInput)
                .with_op("split_words")
                .with_message(message),

            IntKeyError::Submission { .. } => ExError::new(ExErrorKind::ExternalService)
                .with_op("send_to_contract")
                .with_message(message),

            IntKeyError::Config { .. } => ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(message),

            IntKeyError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<std::io::Error> for IntKeyError {
    fn from(err: std::io::Error) -> Self {
        IntKeyError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<clap::Error> for IntKeyError {
    fn from(err: clap::Error) -> Self {
        IntKeyError::Usage {
            code: err.exit_code(),
            message: err.render().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::Usage,
            ExErrorKind::AttestationDecode,
            ExErrorKind::InvalidInput,
            ExErrorKind::ExternalService,
            ExErrorKind::Config,
            ExErrorKind::Io,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_usage_code_only_for_usage() {
        let usage = IntKeyError::Usage {
            code: 2,
            message: "bad".to_string(),
        };
        assert_eq!(usage.usage_code(), Some(2));
        assert_eq!(IntKeyError::UnbalancedQuote.usage_code(), None);
    }

    #[test]
    fn test_ex_error_display_includes_code_and_symbol() {
        let err: ExError = IntKeyError::UnboundSymbol {
            symbol: "agent".to_string(),
        }
        .into();

        let text = err.to_string();
        assert!(text.starts_with("[ERR_INVALID_INPUT]"));
        assert!(text.contains("(symbol: agent)"));
    }
}
