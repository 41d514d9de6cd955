//! End-to-end behaviour of composed chains, through the public API and the
//! hyper service adapter.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::Service;
use wrapware::middleware::{self, Chain};
use wrapware::service::into_service;
use wrapware::{AnyHandler, Method, Request, Response, Status};

#[derive(Clone, Default)]
struct Logs(Arc<Mutex<Vec<u8>>>);

impl Logs {
    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn matching(&self, needle: &str) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter(|l| l.contains(needle))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for Logs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn counted(calls: &Arc<AtomicUsize>) -> impl Fn(Request) -> std::future::Ready<Response> + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |_req| {
        calls.fetch_add(1, Ordering::SeqCst);
        std::future::ready(Response::text("ok"))
    }
}

#[tokio::test]
async fn post_through_logged_post_gate_is_served_and_logged_once() {
    let logs = Logs::default();
    let _guard = logs.install();
    let calls = Arc::new(AtomicUsize::new(0));

    let app = AnyHandler::new(middleware::logging(middleware::post_only(counted(&calls))));
    let res = app.call(Request::new("POST", "/orders")).await;

    assert_eq!(res.status_code(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(logs.matching("RQST:").len(), 1);
    assert_eq!(logs.matching(r#"RQST: [POST] "/orders""#).len(), 1);
}

#[tokio::test]
async fn get_through_post_gate_is_405_and_never_reaches_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));

    let app = AnyHandler::new(middleware::post_only(counted(&calls)));
    let res = app.call(Request::new("GET", "/orders")).await;

    assert_eq!(res.status_code(), u16::from(Status::MethodNotAllowed));
    assert!(String::from_utf8_lossy(res.body()).contains("Method [GET] not allowed"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn boom_is_recovered_logged_and_answered_with_500() {
    let logs = Logs::default();
    let _guard = logs.install();

    let app = Chain::new()
        .layer(middleware::logging)
        .layer(middleware::recover)
        .handler(|_req: Request| async {
            if true {
                panic!("boom");
            }
            Status::Ok
        });
    let res = app.call(Request::new("GET", "/explode")).await;

    assert_eq!(res.status_code(), 500);
    assert_eq!(logs.matching("panic: boom").len(), 1);
    // recover sits inside logging, so the faulted request is still logged.
    assert_eq!(logs.matching(r#"RQST: [GET] "/explode""#).len(), 1);
}

#[tokio::test]
async fn custom_gate_inside_a_chain() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Chain::new()
        .layer(middleware::recover)
        .layer(|next| middleware::allow_only(Method::Delete, next))
        .handler(counted(&calls));

    assert_eq!(app.call(Request::new("DELETE", "/items/1")).await.status_code(), 200);
    let rejected = app.call(Request::new("GET", "/items/1")).await;
    assert_eq!(rejected.status_code(), 405);
    assert_eq!(rejected.header("allow"), Some("DELETE"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_requests_share_one_chain() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = AnyHandler::new(middleware::recover(middleware::get_only(counted(&calls))));

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let app = app.clone();
        let method = if i % 2 == 0 { "GET" } else { "POST" };
        tasks.spawn(async move { app.call(Request::new(method, format!("/n/{i}"))).await.status_code() });
    }

    let mut statuses = Vec::new();
    while let Some(status) = tasks.join_next().await {
        statuses.push(status.unwrap());
    }

    assert_eq!(statuses.iter().filter(|&&s| s == 200).count(), 8);
    assert_eq!(statuses.iter().filter(|&&s| s == 405).count(), 8);
    assert_eq!(calls.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn hyper_service_serves_a_gated_chain() {
    let svc = into_service(middleware::post_only(|req: Request| async move {
        Response::text(format!("got {}", String::from_utf8_lossy(req.body())))
    }));

    let ok = svc
        .call(
            http::Request::builder()
                .method("POST")
                .uri("/echo")
                .body(Full::new(Bytes::from_static(b"ping")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ok.status(), http::StatusCode::OK);
    assert_eq!(&ok.into_body().collect().await.unwrap().to_bytes()[..], b"got ping");

    let rejected = svc
        .call(
            http::Request::builder()
                .method("PUT")
                .uri("/echo")
                .body(Full::new(Bytes::new()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(rejected.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(rejected.headers()["allow"], "POST");
    assert_eq!(
        &rejected.into_body().collect().await.unwrap().to_bytes()[..],
        b"STATUS = Method [PUT] not allowed.",
    );
}
