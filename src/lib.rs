//! # wrapware
//!
//! Small, composable HTTP middleware. A middleware is a function from one
//! handler to another; you stack them by calling one inside the other.
//!
//! ## What ships
//!
//! - [`middleware::logging`]: `RQST: [GET] "/users/42" 1.2ms`, one line per request
//! - [`middleware::recover`]: a panicking handler becomes a `500`, not a dropped connection
//! - [`middleware::post_only`], [`middleware::get_only`], [`middleware::allow_only`]:
//!   method gates that answer everything else with `405 Method Not Allowed`
//!
//! What wrapware intentionally leaves to the host:
//!
//! - **Accepting connections**: hyper / hyper-util, via [`service::into_service`]
//! - **Routing**: put a gate chain behind each route of your router
//! - **Timeouts and cancellation**: the server drops the request future
//!
//! Logging goes through [`tracing`]. wrapware only emits events; install a
//! subscriber in your binary to see them.
//!
//! ## Quick start
//!
//! ```rust
//! use wrapware::middleware::{logging, post_only, recover};
//! use wrapware::{AnyHandler, Request, Response, Status};
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(Status::BadRequest);
//!     }
//!     Response::builder()
//!         .status(Status::Created)
//!         .header("location", "/users/99")
//!         .json(br#"{"id":"99"}"#.to_vec())
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = AnyHandler::new(logging(recover(post_only(create_user))));
//!
//! let res = app.call(Request::new("GET", "/users")).await;
//! assert_eq!(res.status_code(), 405);
//! # }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod status;

pub mod middleware;
pub mod service;

#[cfg(test)]
mod test_support;

pub use error::{BoxError, Error};
pub use handler::{AnyHandler, BoxFuture, Handler};
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use status::Status;
