//! Middleware layer.
//!
//! A middleware is a plain function from one [`Handler`] to another. It runs
//! code before and after calling `next`, or skips `next` entirely:
//!
//! - [`logging`]: one access-log line per request
//! - [`recover`]: turns a handler panic into `500 Internal Server Error`
//! - [`allow_only`], [`post_only`], [`get_only`]: method gates answering `405`
//!
//! Layers compose by nesting. The outermost call runs first on the way in and
//! last on the way out:
//!
//! ```rust
//! use wrapware::middleware::{logging, post_only, recover};
//! use wrapware::{AnyHandler, Request, Response, Status};
//!
//! async fn create_user(_req: Request) -> Response {
//!     Response::builder().status(Status::Created).text("created")
//! }
//!
//! let app = AnyHandler::new(logging(recover(post_only(create_user))));
//! ```
//!
//! [`Chain`] builds the same thing from a list.

use crate::handler::{AnyHandler, Handler};

mod logging;
mod method_filter;
mod recover;

pub use logging::logging;
pub use method_filter::{allow_only, get_only, legacy, post_only};
pub use recover::{Panic, recover};

type Layer = Box<dyn FnOnce(AnyHandler) -> AnyHandler>;

/// An ordered list of middleware waiting for its final handler.
///
/// The first layer added is the outermost:
///
/// ```rust
/// use wrapware::middleware::{self, Chain};
/// use wrapware::{Method, Request};
///
/// let app = Chain::new()
///     .layer(middleware::logging)
///     .layer(middleware::recover)
///     .layer(|next| middleware::allow_only(Method::Put, next))
///     .handler(|_req: Request| async { "stored" });
/// ```
///
/// is `logging(recover(allow_only(Method::Put, handler)))`.
#[derive(Default)]
pub struct Chain {
    layers: Vec<Layer>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `middleware` inside every layer added so far.
    pub fn layer<M, H>(mut self, middleware: M) -> Self
    where
        M: FnOnce(AnyHandler) -> H + 'static,
        H: Handler,
    {
        self.layers.push(Box::new(move |next: AnyHandler| AnyHandler::new(middleware(next))));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Wraps `handler` in every layer, innermost last-added.
    pub fn handler(self, handler: impl Handler) -> AnyHandler {
        self.layers
            .into_iter()
            .rev()
            .fold(AnyHandler::new(handler), |next, layer| layer(next))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::request::Request;
    use crate::response::Response;
    use crate::test_support::LogCapture;

    type Trail = Arc<Mutex<Vec<String>>>;

    /// A layer that records when it is entered and left.
    fn tracer(trail: Trail, name: &'static str) -> impl FnOnce(AnyHandler) -> AnyHandler {
        move |next: AnyHandler| {
            AnyHandler::new(move |req: Request| {
                let next = next.clone();
                let trail = Arc::clone(&trail);
                async move {
                    trail.lock().unwrap().push(format!("{name} in"));
                    let res = next.call(req).await;
                    trail.lock().unwrap().push(format!("{name} out"));
                    res
                }
            })
        }
    }

    #[tokio::test]
    async fn first_layer_is_outermost() {
        let trail = Trail::default();
        let inner_trail = Arc::clone(&trail);

        let app = Chain::new()
            .layer(tracer(Arc::clone(&trail), "outer"))
            .layer(tracer(Arc::clone(&trail), "inner"))
            .handler(move |_req: Request| {
                let trail = Arc::clone(&inner_trail);
                async move {
                    trail.lock().unwrap().push("handler".to_owned());
                    "done"
                }
            });

        app.call(Request::new("GET", "/")).await;

        assert_eq!(
            *trail.lock().unwrap(),
            ["outer in", "inner in", "handler", "inner out", "outer out"],
        );
    }

    #[tokio::test]
    async fn empty_chain_is_the_handler() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        let app = chain.handler(|_req: Request| async { "bare" });
        assert_eq!(app.call(Request::new("GET", "/")).await.body(), b"bare");
    }

    #[tokio::test]
    async fn short_circuit_unwinds_through_outer_layers() {
        let logs = LogCapture::new();
        let _guard = logs.install();

        let chain = Chain::new()
            .layer(logging)
            .layer(recover)
            .layer(post_only);
        assert_eq!(chain.len(), 3);

        let app = chain.handler(|_req: Request| async { Response::text("never") });
        let res = app.call(Request::new("GET", "/submit")).await;

        assert_eq!(res.status_code(), 405);
        assert_eq!(logs.lines_containing(r#"RQST: [GET] "/submit""#).len(), 1);
    }
}
