//! Unified error type.

use std::fmt;

/// A boxed, thread-safe error from a foreign body type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by wrapware's fallible operations.
///
/// Application-level outcomes (405, 500, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// plumbing failures: reading a request body or parsing a method name.
#[derive(Debug)]
pub enum Error {
    /// The request body could not be read to the end.
    Body(BoxError),
    /// A method string that is not one of the known [`Method`](crate::Method)s.
    UnknownMethod(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(e) => write!(f, "body: {e}"),
            Self::UnknownMethod(m) => write!(f, "unknown method `{m}`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Body(e) => Some(e.as_ref()),
            Self::UnknownMethod(_) => None,
        }
    }
}
