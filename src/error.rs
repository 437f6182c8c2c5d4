use crate::dialog::DialogId;

/// Errors raised by the dialog layer.
///
/// Mirrors the hand-rolled error style of the surrounding stack: a catch-all
/// string variant for "shouldn't happen" paths plus variants that carry
/// enough context (usually a [`DialogId`]) to log or report against a
/// specific dialog.
#[derive(Debug)]
pub enum Error {
    /// Catch-all for errors that don't need their own variant.
    Error(String),
    /// A dialog-scoped error, e.g. malformed establishing request/response.
    DialogError(String, DialogId),
    /// `status_update` was asked to perform a transition that violates an
    /// invariant (e.g. mutating a dialog already in `{stop, _}`).
    InvalidTransition(String, DialogId),
    /// A required header (e.g. Contact) was missing where the dialog layer
    /// cannot proceed without it.
    MissingContact(String, DialogId),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Error(msg) => write!(f, "{}", msg),
            Error::DialogError(msg, id) => write!(f, "dialog error: {} ({})", msg, id),
            Error::InvalidTransition(msg, id) => {
                write!(f, "invalid dialog transition: {} ({})", msg, id)
            }
            Error::MissingContact(msg, id) => write!(f, "missing contact: {} ({})", msg, id),
        }
    }
}

impl std::error::Error for Error {}

impl From<rsip::Error> for Error {
    fn from(e: rsip::Error) -> Self {
        Error::Error(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
