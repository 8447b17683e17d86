//! Error types and the per-file error handler.
//!
//! Every fallible operation in the toolkit reports through exactly one
//! channel: it returns [`Error`] and, on the way out, notifies the owning
//! file's [`ErrorHandler`] once. There is no local recovery, no retrying
//! and no batching — an error surfaces synchronously at the operation that
//! produced it.

use thiserror::Error as ThisError;

/// Result alias used across the toolkit.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
///
/// Stable across message wording changes; embedders that translate errors
/// into their own hierarchy should match on this rather than on `Display`
/// output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// A null-equivalent, stale or foreign handle was passed in.
    BadArgument,
    /// An index was outside the addressed sequence.
    OutOfRange,
    /// The entity cannot answer this request (e.g. a typed accessor was
    /// called against a different tag).
    UnsupportedOperation,
    /// The operation was attempted against structurally invalid state.
    InconsistentState,
    /// An ISA-specific operation was applied to a graph of the other ISA.
    WrongIsa,
    /// A resource was used after it was released.
    AlreadyReleased,
    /// The on-disk container was malformed.
    BadFormat,
    /// An underlying filesystem operation failed.
    Io,
}

/// An error surfaced by a toolkit operation.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("bad argument: {0}")]
    BadArgument(String),

    #[error("index {index} out of range, {len} element(s) available")]
    OutOfRange { index: usize, len: usize },

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("inconsistent state: {0}")]
    InconsistentState(String),

    #[error("ISA mismatch: {0}")]
    WrongIsa(String),

    #[error("resource already released")]
    AlreadyReleased,

    #[error("bad container format: {0}")]
    BadFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a bad-argument error from any displayable context.
    pub fn bad_argument(context: impl Into<String>) -> Self {
        Error::BadArgument(context.into())
    }

    /// The coarse classification of this error.
    pub fn status(&self) -> Status {
        match self {
            Error::BadArgument(_) => Status::BadArgument,
            Error::OutOfRange { .. } => Status::OutOfRange,
            Error::Unsupported(_) => Status::UnsupportedOperation,
            Error::InconsistentState(_) => Status::InconsistentState,
            Error::WrongIsa(_) => Status::WrongIsa,
            Error::AlreadyReleased => Status::AlreadyReleased,
            Error::BadFormat(_) => Status::BadFormat,
            Error::Io(_) => Status::Io,
        }
    }
}

/// Per-file reaction to surfaced errors.
///
/// A handler is notified once for every error an operation returns. The
/// default ([`LogHandler`]) emits a `tracing` event; embedders may install
/// a handler that counts, collects or translates instead. Handlers must
/// not assume they run on any particular thread, hence `Send + Sync`.
pub trait ErrorHandler: Send + Sync {
    /// Called exactly once per surfaced error, before it is returned.
    fn on_error(&self, error: &Error);
}

/// Default handler: log the error and carry on propagating it.
#[derive(Debug, Default)]
pub struct LogHandler;

impl ErrorHandler for LogHandler {
    fn on_error(&self, error: &Error) {
        tracing::error!(status = ?error.status(), %error, "operation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(
            Error::bad_argument("stale block handle").status(),
            Status::BadArgument
        );
        assert_eq!(
            Error::OutOfRange { index: 99, len: 2 }.status(),
            Status::OutOfRange
        );
        assert_eq!(Error::AlreadyReleased.status(), Status::AlreadyReleased);
        assert_eq!(
            Error::WrongIsa("dynamic creator on static graph".into()).status(),
            Status::WrongIsa
        );
    }

    #[test]
    fn out_of_range_message_names_both_sides() {
        let err = Error::OutOfRange { index: 99, len: 2 };
        let text = err.to_string();
        assert!(text.contains("99"));
        assert!(text.contains('2'));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::from(io);
        assert_eq!(err.status(), Status::Io);
    }
}
