//! Helpers standing in for the counting endpoint and the log output.

use axum::{http::StatusCode, routing::get, Router};
use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tracing_subscriber::fmt::MakeWriter;
use url::Url;

async fn spawn(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind");
    let addr = listener.local_addr().expect("must have an address");
    tokio::spawn(async move { axum::serve(listener, router).await });

    Url::parse(&format!("http://{addr}/")).expect("must be a valid url")
}

/// Serve a fixed response on `/`.
pub async fn serve(status: StatusCode, body: &str) -> Url {
    serve_bytes(status, body.as_bytes().to_vec()).await
}

/// Serve a fixed response on `/`, which doesn't need to be valid UTF-8.
pub async fn serve_bytes(status: StatusCode, body: Vec<u8>) -> Url {
    spawn(Router::new().route(
        "/",
        get(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    ))
    .await
}

/// Serve an increasing count, like the real endpoint does. The counter holds the number of
/// requests served.
pub async fn serve_incrementing() -> (Url, Arc<AtomicUsize>) {
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = requests.clone();
    let url = spawn(Router::new().route(
        "/",
        get(move || {
            let views = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { format!(r#"{{"views": {views}}}"#) }
        }),
    ))
    .await;

    (url, requests)
}

/// Serve a count, but only after a delay.
pub async fn serve_slow(delay: Duration) -> Url {
    spawn(Router::new().route(
        "/",
        get(move || async move {
            tokio::time::sleep(delay).await;
            r#"{"views": 1}"#
        }),
    ))
    .await
}

/// An endpoint nobody listens on.
pub async fn unused_endpoint() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind");
    let addr = listener.local_addr().expect("must have an address");
    drop(listener);

    Url::parse(&format!("http://{addr}/")).expect("must be a valid url")
}

/// Collects log output of the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Number of error events logged so far.
    pub fn errors(&self) -> usize {
        let buf = self.0.lock().expect("must lock");
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.contains("ERROR"))
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("must lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
