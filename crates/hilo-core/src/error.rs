/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while validating raw input at the core boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A die face is outside the 1-6 range.
    #[error("invalid die face at position {position}: {value} (expected 1-6)")]
    InvalidFace {
        /// Zero-based index of the offending die.
        position: usize,
        /// The value that was supplied.
        value: u32,
    },

    /// A session identifier that can never come from a real round.
    #[error("invalid session id: {0}")]
    InvalidSession(u64),

    /// A character that is not a known label code.
    #[error("invalid label code: '{0}'")]
    InvalidLabel(char),

    /// A variant name that is not recognized.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}
