use thiserror::Error;

/// Errors produced by the NEIS lookup pipeline.
///
/// The kinds are deliberately kept apart: `Config` can only surface at
/// service construction, `Status`/`Transport` cover the HTTP exchange,
/// `InvalidParam`/`Validation` cover the two data boundaries, and `Api` is a
/// remote application failure that arrived over a perfectly healthy HTTP
/// exchange. Callers must be able to tell them apart; they are only flattened
/// into text at the tool-adapter boundary.
#[derive(Error, Debug)]
pub enum NeisError {
    /// Required environment variable missing or blank at construction time.
    #[error("{name} is not set")]
    Config { name: &'static str },

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Network failure, timeout, or a body that is not JSON at all.
    #[error("failed to fetch data: {0}")]
    Transport(#[from] reqwest::Error),

    /// A caller-supplied parameter failed its format check, before any I/O.
    #[error("invalid parameter {field}: expected {expected}")]
    InvalidParam {
        field: &'static str,
        expected: &'static str,
    },

    /// The response parsed as JSON but does not match the declared schema.
    #[error("response validation failed: {0}")]
    Validation(#[from] serde_json::Error),

    /// The endpoint reported a non-success result code. Code and message are
    /// carried verbatim.
    #[error("[{code}] {message}")]
    Api { code: String, message: String },
}

/// Convenience alias for results using `NeisError`.
pub type Result<T> = std::result::Result<T, NeisError>;
