//! hyper integration.
//!
//! wrapware does not accept connections. The host server does, and hands
//! each request to a [`HandlerService`]:
//!
//! ```rust,no_run
//! # async fn host(stream: tokio::net::TcpStream) {
//! # use hyper_util::rt::{TokioExecutor, TokioIo};
//! # use hyper_util::server::conn::auto::Builder;
//! use wrapware::middleware::{logging, recover};
//! use wrapware::service::into_service;
//!
//! let svc = into_service(logging(recover(|_req: wrapware::Request| async { "hi" })));
//! let _ = Builder::new(TokioExecutor::new())
//!     .serve_connection(TokioIo::new(stream), svc)
//!     .await;
//! # }
//! ```

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::service::Service;
use tracing::warn;

use crate::error::BoxError;
use crate::handler::{AnyHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// A [`Handler`] exposed as a hyper [`Service`].
///
/// Cheap to clone: every clone shares the same handler.
#[derive(Clone, Debug)]
pub struct HandlerService {
    handler: AnyHandler,
}

/// Wraps `handler` for use with `hyper::server::conn` or `hyper_util`.
pub fn into_service(handler: impl Handler) -> HandlerService {
    HandlerService { handler: AnyHandler::new(handler) }
}

impl<B> Service<http::Request<B>> for HandlerService
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = http::Response<Full<Bytes>>;
    // Every failure is answered with a status code; hyper never sees an error.
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let handler = self.handler.clone();

        Box::pin(async move {
            let response = match Request::from_http(req).await {
                Ok(req) => handler.call(req).await,
                Err(e) => {
                    warn!("rejecting request: {e}");
                    Response::status(Status::BadRequest)
                }
            };
            Ok(response.into_http())
        })
    }
}
