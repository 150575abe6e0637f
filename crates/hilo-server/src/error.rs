/// Alias for `Result<T, ServerError>`.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors raised by the service shell. None of these reach the core.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Fetching or decoding an upstream notification failed.
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a status other than `"OK"`.
    #[error("upstream reported status {0:?}")]
    UpstreamStatus(String),

    /// The listener could not be bound.
    #[error("cannot bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The HTTP server stopped with an I/O error.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
