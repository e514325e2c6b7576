//! In-process backend for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use fks_client::{ApiClient, ClientConfig, ServiceUrls};
use parking_lot::Mutex;
use tokio::net::TcpListener;

/// Address nothing listens on.
pub const DEAD_URL: &str = "http://127.0.0.1:1";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Serve `router` on an ephemeral port, recording every request.
pub async fn serve(router: Router) -> (String, RequestLog) {
    let log: RequestLog = Arc::default();
    let recorder = log.clone();
    let router = router.layer(middleware::from_fn(move |req: Request, next: Next| {
        let recorder = recorder.clone();
        async move {
            recorder.lock().push(RecordedRequest {
                method: req.method().to_string(),
                path: req.uri().path().to_string(),
                query: req.uri().query().map(str::to_string),
                authorization: req
                    .headers()
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
            });
            next.run(req).await
        }
    }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), log)
}

/// Client with every service pointed at `base`.
pub fn client_for(base: &str) -> Arc<ApiClient> {
    let config = ClientConfig {
        urls: ServiceUrls {
            api: base.to_string(),
            auth: base.to_string(),
            data: base.to_string(),
            portfolio: base.to_string(),
        },
        ..ClientConfig::default()
    };
    Arc::new(ApiClient::new(&config).unwrap())
}

pub fn last_request(log: &RequestLog) -> RecordedRequest {
    log.lock().last().cloned().expect("no request recorded")
}

pub fn requests_to(log: &RequestLog, path: &str) -> Vec<RecordedRequest> {
    log.lock().iter().filter(|r| r.path == path).cloned().collect()
}

/// Poll `done` every 10ms for up to 5s.
pub async fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if done() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    done()
}
