//! Method gates.
//!
//! [`allow_only`] lets one method through and answers everything else with
//! `405 Method Not Allowed`. [`post_only`] and [`get_only`] are the two
//! gates most services need.
//!
//! Rejections are logged as `Request from <url> is not a <method>. Not
//! continuing.` at INFO. The level lives on the event, not in the text, so
//! a `fmt` subscriber prints
//! ` INFO wrapware::middleware::method_filter: Request from …`.

use tracing::info;

use crate::handler::{AnyHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Passes requests whose method is `method` to `next`; rejects the rest.
///
/// A rejected request is logged at INFO and answered with `405`, an
/// `allow: <method>` header, and the body
/// `STATUS = Method [<rejected>] not allowed.`. `next` is not called.
pub fn allow_only(method: Method, next: impl Handler) -> impl Handler {
    let next = AnyHandler::new(next);

    move |req: Request| {
        let next = next.clone();
        async move {
            if method.matches(req.method()) {
                return next.call(req).await;
            }

            info!("Request from {} is not a {method}. Not continuing.", req.url());
            method_not_allowed(method, req.method())
        }
    }
}

/// [`allow_only`] for `POST`.
pub fn post_only(next: impl Handler) -> impl Handler {
    allow_only(Method::Post, next)
}

/// [`allow_only`] for `GET`.
pub fn get_only(next: impl Handler) -> impl Handler {
    allow_only(Method::Get, next)
}

fn method_not_allowed(allowed: Method, rejected: &str) -> Response {
    Response::error(
        Status::MethodNotAllowed,
        format!("STATUS = Method [{rejected}] not allowed."),
    )
    .with_header("allow", allowed.as_str())
}

/// The first-generation gates.
///
/// On a mismatch they log and stop the chain without producing a response,
/// so the client gets an empty `200 OK`. Kept for callers that still depend
/// on that; new code wants [`post_only`](super::post_only) /
/// [`get_only`](super::get_only).
pub mod legacy {
    use tracing::{debug, info};

    use crate::handler::{AnyHandler, Handler};
    use crate::method::Method;
    use crate::request::Request;
    use crate::response::Response;

    #[deprecated(note = "mismatched requests get an empty 200; use `middleware::post_only`")]
    pub fn pass_post(next: impl Handler) -> impl Handler {
        pass_method(Method::Post, next)
    }

    #[deprecated(note = "mismatched requests get an empty 200; use `middleware::get_only`")]
    pub fn pass_get(next: impl Handler) -> impl Handler {
        pass_method(Method::Get, next)
    }

    fn pass_method(method: Method, next: impl Handler) -> impl Handler {
        debug!("in the pass-{method} middleware function");
        let next = AnyHandler::new(next);

        move |req: Request| {
            let next = next.clone();
            async move {
                if method.matches(req.method()) {
                    return next.call(req).await;
                }

                info!("Request from {} is not a {method}. Not continuing.", req.url());
                Response::default()
            }
        }
    }
}
