//! Minimal wrapware demo: a logged, panic-safe chain hosted on hyper.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example hello
//!
//! Try:
//!   curl -X POST http://localhost:3000/users -d '{"name":"alice"}'   # 201
//!   curl http://localhost:3000/users                                 # 405
//!   curl -X POST http://localhost:3000/panic                         # 500
//!
//! Bind somewhere else with `WRAPWARE_ADDR=0.0.0.0:8080`. Ctrl-C or SIGTERM
//! stops accepting and drains open connections.

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use wrapware::middleware::{self, Chain};
use wrapware::service::into_service;
use wrapware::{Request, Response, Status};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("WRAPWARE_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_owned());
    let listener = TcpListener::bind(&addr).await?;

    let app = Chain::new()
        .layer(middleware::logging)
        .layer(middleware::recover)
        .layer(middleware::post_only)
        .handler(create_user);
    let svc = into_service(app);

    info!(%addr, "wrapware demo listening");

    let mut tasks = tokio::task::JoinSet::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutting down");
                break;
            }

            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let svc = svc.clone();
                tasks.spawn(async move {
                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(stream), svc)
                        .await
                    {
                        error!(%peer, "connection error: {e}");
                    }
                });
            }

            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}

// POST /users → 201; POST /panic → 500 via `recover`.
async fn create_user(req: Request) -> Response {
    if req.path() == "/panic" {
        panic!("requested a panic");
    }
    if req.body().is_empty() {
        return Response::status(Status::BadRequest);
    }

    Response::builder()
        .status(Status::Created)
        .header("location", "/users/99")
        .json(br#"{"id":"99","name":"new_user"}"#.to_vec())
}
