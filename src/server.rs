//! HTTP server.
//!
//! Routes:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | POST | `{ingest_path}` | snapshot ingestion (plain-text result) |
//! | GET | `/` | HTML status page |
//! | GET | `/status.json` | the classified [`Board`] as JSON |
//! | GET | `/health`, `/healthz` | `OK` |
//!
//! Any other method on the ingest path is answered with 405; any other path
//! with 404.

use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::data::Board;
use crate::error::{IngestError, StoreError};
use crate::ingest::{IngestOutcome, Ingestor};
use crate::store::SnapshotStore;
use crate::web;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// Everything a request handler needs.
#[derive(Debug)]
pub struct AppState {
    store: Arc<SnapshotStore>,
    ingestor: Ingestor,
    settings: Settings,
    offset: FixedOffset,
}

impl AppState {
    /// Build the state from settings. Fails without an ingest token.
    pub fn new(settings: Settings) -> Result<Self> {
        let secret = settings.require_token()?.to_string();
        let offset = settings.page.offset()?;
        let store = Arc::new(SnapshotStore::new(settings.snapshot_path.clone()));
        let ingestor = Ingestor::new(Arc::clone(&store), secret);
        Ok(Self {
            store,
            ingestor,
            settings,
            offset,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    async fn board(&self) -> Board {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || Board::from_snapshot(&store.load()))
            .await
            .unwrap_or_default()
    }
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let listener = TcpListener::bind(state.settings.listen_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", state.settings.listen_addr))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("shutdown requested");
    };

    serve_with_shutdown(listener, Arc::new(state), shutdown).await
}

/// Accept connections on `listener` until `shutdown` completes.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        ingest_path = %state.settings.ingest_path,
        snapshot = %state.settings.snapshot_path.display(),
        "status server listening"
    );

    tokio::pin!(shutdown);
    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                    continue;
                }
            },
            _ = &mut shutdown => break,
        };
        let io = TokioIo::new(stream);
        let state = Arc::clone(&state);

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let state = Arc::clone(&state);
                async move { handle_request(req, &state).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!(peer = %peer, error = %e, "connection error");
            }
        });
    }

    info!("status server stopped");
    Ok(())
}

/// Route one request.
pub async fn handle_request<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if req.uri().path() == state.settings.ingest_path {
        return Ok(handle_ingest(req, state).await);
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = match (&method, path.as_str()) {
        (&Method::GET, "/") => {
            let board = state.board().await;
            let html = web::render_page(&board, &state.settings.page, state.offset);
            response(StatusCode::OK, TEXT_HTML, html)
        }
        (&Method::GET, "/status.json") => {
            let board = state.board().await;
            match serde_json::to_vec(&board) {
                Ok(json) => response(StatusCode::OK, APPLICATION_JSON, json),
                Err(e) => {
                    warn!(error = %e, "failed to serialize board");
                    response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        TEXT_PLAIN,
                        "Internal Server Error",
                    )
                }
            }
        }
        (&Method::GET, "/health" | "/healthz") => response(StatusCode::OK, TEXT_PLAIN, "OK"),
        _ => response(StatusCode::NOT_FOUND, TEXT_PLAIN, "Not Found"),
    };
    Ok(response)
}

async fn handle_ingest<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let token = query_token(req.uri());

    if let Err(e) = state.ingestor.authorize(&method, token.as_deref()) {
        warn!(method = %method, status = e.status_code().as_u16(), "snapshot rejected");
        return outcome_response(e.into());
    }

    let limited = Limited::new(req.into_body(), state.settings.max_body_bytes);
    let body = match limited.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit = state.settings.max_body_bytes, "snapshot body too large");
            return outcome_response(IngestError::BodyTooLarge.into());
        }
        Err(e) => {
            warn!(error = %e, "failed to read snapshot body");
            return outcome_response(IngestError::BodyRead(e).into());
        }
    };

    // The atomic replace fsyncs; keep it off the async workers.
    let ingestor = state.ingestor.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        ingestor.handle(&method, token.as_deref(), &body)
    })
    .await
    .unwrap_or_else(|e| {
        let err = StoreError::Write(io::Error::other(e.to_string()));
        IngestError::Persist(err).into()
    });

    outcome_response(outcome)
}

/// The `token` query parameter, URL-decoded.
///
/// When the parameter is repeated the last value wins, as with PHP's `$_GET`.
fn query_token(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "token")
        .last()
        .map(|(_, value)| value.into_owned())
}

fn outcome_response(outcome: IngestOutcome) -> Response<Full<Bytes>> {
    let mut resp = response(outcome.status, TEXT_PLAIN, outcome.message);
    if outcome.status == StatusCode::METHOD_NOT_ALLOWED {
        resp.headers_mut().insert(ALLOW, HeaderValue::from_static("POST"));
    }
    resp
}

fn response(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(body.into()));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use statusboard_reporter::{ReportError, Reporter};
    use statusboard_types::Snapshot;
    use tempfile::TempDir;
    use tokio::sync::oneshot;

    use crate::config::PageSettings;
    use crate::data::OverallStatus;

    const SECRET: &str = "s3cret";

    fn settings(dir: &TempDir) -> Settings {
        Settings {
            listen_addr: "127.0.0.1:0".to_string(),
            ingest_path: "/api/status".to_string(),
            max_body_bytes: 1024,
            token: Some(SECRET.to_string()),
            snapshot_path: dir.path().join("status.json"),
            page: PageSettings::default(),
        }
    }

    fn state(dir: &TempDir) -> AppState {
        AppState::new(settings(dir)).unwrap()
    }

    fn request(method: Method, uri: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    async fn send(state: &AppState, req: Request<Full<Bytes>>) -> (StatusCode, String) {
        let resp = handle_request(req, state).await.unwrap();
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_state_requires_token() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        settings.token = None;
        assert!(AppState::new(settings).is_err());
    }

    #[test]
    fn test_query_token() {
        let uri: Uri = "/api/status?site=main&token=a%20b%2Bc".parse().unwrap();
        assert_eq!(query_token(&uri).as_deref(), Some("a b+c"));

        let uri: Uri = "/api/status?token=".parse().unwrap();
        assert_eq!(query_token(&uri).as_deref(), Some(""));

        let uri: Uri = "/api/status".parse().unwrap();
        assert_eq!(query_token(&uri), None);
    }

    #[test]
    fn test_repeated_token_keeps_last_value() {
        let uri: Uri = "/api/status?token=first&token=s3cret".parse().unwrap();
        assert_eq!(query_token(&uri).as_deref(), Some("s3cret"));
    }

    /// A body whose connection drops before any data arrives.
    struct BrokenBody;

    impl Body for BrokenBody {
        type Data = Bytes;
        type Error = io::Error;

        fn poll_frame(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<Option<Result<hyper::body::Frame<Bytes>, io::Error>>> {
            std::task::Poll::Ready(Some(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset",
            ))))
        }
    }

    #[tokio::test]
    async fn test_body_read_failure_is_reported_and_store_untouched() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/status?token=s3cret")
            .body(BrokenBody)
            .unwrap();
        let resp = handle_request(req, &state).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Error: Could not read the request body.");
        assert!(!state.settings().snapshot_path.exists());
    }

    #[tokio::test]
    async fn test_ingest_then_read_back() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let body = r#"{"bots":[{"name":"Bot1","status":"Online"}],"websites":[{"name":"Site1","status":"Partial Outage","url":"https://x.test"}]}"#;
        let (status, message) = send(
            &state,
            request(Method::POST, "/api/status?token=s3cret", body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message, crate::ingest::SUCCESS_MESSAGE);

        let (status, json) = send(&state, request(Method::GET, "/status.json", "")).await;
        assert_eq!(status, StatusCode::OK);
        let board: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(board["overall"], "partial_disruption");
        assert_eq!(board["groups"][0]["entries"][0]["severity"], "operational");
        assert_eq!(board["groups"][1]["entries"][0]["severity"], "degraded");

        let (status, html) = send(&state, request(Method::GET, "/", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Partial Service Disruption"));
        assert!(html.contains("Site1"));
    }

    #[tokio::test]
    async fn test_ingest_status_codes() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let cases = [
            (Method::POST, "/api/status", "{}", StatusCode::UNAUTHORIZED),
            (Method::POST, "/api/status?token=", "{}", StatusCode::UNAUTHORIZED),
            (Method::POST, "/api/status?token=nope", "{}", StatusCode::FORBIDDEN),
            (Method::POST, "/api/status?token=s3cret", "", StatusCode::BAD_REQUEST),
            (Method::POST, "/api/status?token=s3cret", "{bad", StatusCode::BAD_REQUEST),
        ];
        for (method, uri, body, expected) in cases {
            let (status, _) = send(&state, request(method, uri, body)).await;
            assert_eq!(status, expected, "{uri} {body:?}");
        }
        assert!(!state.store().path().exists());
    }

    #[tokio::test]
    async fn test_non_post_on_ingest_path_is_405() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let resp = handle_request(request(Method::GET, "/api/status?token=s3cret", ""), &state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "POST");
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        settings.max_body_bytes = 16;
        let state = AppState::new(settings).unwrap();

        let (status, message) = send(
            &state,
            request(
                Method::POST,
                "/api/status?token=s3cret",
                r#"{"bots": [{"name": "a", "status": "Online"}]}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(message, "Error: Request body too large.");
        assert!(!state.store().path().exists());
    }

    #[tokio::test]
    async fn test_oversized_body_without_token_is_401() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        settings.max_body_bytes = 4;
        let state = AppState::new(settings).unwrap();

        let (status, _) = send(&state, request(Method::POST, "/api/status", "{\"a\": 1}")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_other_routes() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        assert_eq!(
            send(&state, request(Method::GET, "/health", "")).await,
            (StatusCode::OK, "OK".to_string())
        );
        assert_eq!(send(&state, request(Method::GET, "/healthz", "")).await.0, StatusCode::OK);
        assert_eq!(
            send(&state, request(Method::GET, "/nope", "")).await,
            (StatusCode::NOT_FOUND, "Not Found".to_string())
        );
        assert_eq!(send(&state, request(Method::POST, "/", "")).await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_json_reflects_store() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        state
            .store()
            .replace(br#"{"bots":[{"name":"Bot1","status":"Major Outage"}]}"#)
            .unwrap();

        let (status, body) =
            tokio_test::block_on(send(&state, request(Method::GET, "/status.json", "")));
        assert_eq!(status, StatusCode::OK);
        let board: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(board["headline"], "Major Service Outage");
    }

    #[tokio::test]
    async fn test_page_without_snapshot_awaits_data() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let resp = handle_request(request(Method::GET, "/", ""), &state).await.unwrap();
        assert_eq!(resp.headers()[CONTENT_TYPE], TEXT_HTML);
        let html = resp.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(html.to_vec()).unwrap();
        assert!(html.contains("Awaiting Status Data"));
        assert!(html.contains(web::AWAITING_MESSAGE));
    }

    #[tokio::test]
    async fn test_reporter_against_live_server() {
        crate::telemetry::try_init();
        let dir = TempDir::new().unwrap();
        let state = Arc::new(state(&dir));
        let snapshot_path: PathBuf = state.settings().snapshot_path.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve_with_shutdown(listener, state, async {
            let _ = stop_rx.await;
        }));

        let endpoint = format!("http://{addr}/api/status");
        let snapshot = Snapshot::builder()
            .last_updated_utc("2024-01-01T00:00:00Z")
            .bot("Bot1", "Major Outage")
            .build();

        let reporter = Reporter::builder()
            .endpoint(&endpoint)
            .token(SECRET)
            .build()
            .unwrap();
        reporter.push(&snapshot).await.unwrap();

        let stored = crate::source::load_snapshot(&snapshot_path);
        assert_eq!(stored, snapshot);
        assert_eq!(
            Board::from_snapshot(&stored).overall,
            OverallStatus::MajorOutage
        );

        let intruder = Reporter::builder()
            .endpoint(&endpoint)
            .token("wrong")
            .build()
            .unwrap();
        match intruder.push(&snapshot).await {
            Err(ReportError::Rejected { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "Error: Invalid secret token.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
