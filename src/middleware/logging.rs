//! Per-request access log.

use tokio::time::Instant;
use tracing::info;

use crate::handler::{AnyHandler, Handler};
use crate::request::Request;

/// Logs one `RQST: [<method>] "<url>" <elapsed>` line per request at INFO.
///
/// The response passes through untouched. A panic in `next` unwinds through
/// this layer without a log line; put [`recover`](super::recover) inside it
/// to get one for faulted requests as well.
pub fn logging(next: impl Handler) -> impl Handler {
    let next = AnyHandler::new(next);

    move |req: Request| {
        let next = next.clone();
        async move {
            let method = req.method().to_owned();
            let url = req.url().to_owned();

            let started = Instant::now();
            let response = next.call(req).await;
            info!("RQST: [{method}] {url:?} {:?}", started.elapsed());

            response
        }
    }
}
