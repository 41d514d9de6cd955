//! Panic recovery.
//!
//! A panic inside a handler would otherwise tear down the connection task and
//! the client would see a reset instead of a response. [`recover`] puts an
//! unwind boundary around everything below it and answers with a plain
//! `500 Internal Server Error` instead.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::error;

use crate::handler::{AnyHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// A panic caught at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panic {
    message: String,
}

impl Panic {
    /// Extracts a readable message from a panic payload.
    ///
    /// `panic!("literal")` carries a `&'static str`, `panic!("{x}")` a
    /// `String`; anything else (e.g. `std::panic::panic_any(42)`) has no
    /// printable form.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(s) => (*s).to_owned(),
                None => "unknown panic payload".to_owned(),
            },
        };
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Panic {}

/// Converts a panic anywhere in `next` into a logged `panic: <details>` line
/// at ERROR and a `500 Internal Server Error` response.
///
/// Both a panic while calling `next` and one while polling its future are
/// caught. Without a panic the response passes through unchanged.
pub fn recover(next: impl Handler) -> impl Handler {
    let next = AnyHandler::new(next);

    move |req: Request| {
        let next = next.clone();
        async move {
            // `next.call` runs inside the guarded future so a panic raised
            // before the handler's own future exists is caught too.
            let guarded = AssertUnwindSafe(async move { next.call(req).await });

            match guarded.catch_unwind().await {
                Ok(response) => response,
                Err(payload) => {
                    let panic = Panic::from_payload(payload);
                    error!("panic: {panic}");
                    internal_server_error()
                }
            }
        }
    }
}

fn internal_server_error() -> Response {
    let status = Status::InternalServerError;
    Response::error(status, status.reason())
}
