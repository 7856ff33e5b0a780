use crate::config::Settings;
use crate::router::create_router;
use crate::schemas::AppState;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Canned reply of the stub account API
#[derive(Clone, Debug)]
pub struct Upstream {
    pub status: StatusCode,
    pub body: Value,
}

impl Upstream {
    pub fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self { status, body: Value::Null }
    }
}

struct UpstreamState {
    accounts: Upstream,
    statement: Upstream,
    requests: Mutex<Vec<(String, Option<String>)>>,
}

/// Running stub of the account API
pub struct UpstreamApi {
    pub base_url: String,
    state: Arc<UpstreamState>,
}

impl UpstreamApi {
    /// `(path, authorization header)` of every request received so far
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|(path, _)| path).collect()
    }
}

async fn upstream_reply(
    State(state): State<Arc<UpstreamState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .unwrap()
        .push((uri.path().to_string(), authorization));

    let reply = if uri.path() == "/account" {
        &state.accounts
    } else {
        &state.statement
    };
    (reply.status, Json(reply.body.clone())).into_response()
}

/// Serve a stub account API on a random local port
pub async fn spawn_upstream(accounts: Upstream, statement: Upstream) -> UpstreamApi {
    let state = Arc::new(UpstreamState {
        accounts,
        statement,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/account", get(upstream_reply))
        .route("/account/:account_id/statement", get(upstream_reply))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream stub");
    let address = listener.local_addr().expect("Upstream stub has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Upstream stub failed");
    });

    UpstreamApi {
        base_url: format!("http://{}", address),
        state,
    }
}

/// Initialize tracing for tests with output to STDERR.
///
/// Installs a global subscriber once per test binary; later calls are no-ops.
/// The log level is determined by the RUST_LOG environment variable,
/// defaulting to WARN if not set.
pub fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let _ = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Create axum app for testing, pointed at the given account API
pub fn setup_test_app(api_base_url: &str) -> Router {
    init_test_tracing();

    let settings = Settings {
        api_base_url: api_base_url.to_string(),
        ..Settings::default()
    };
    create_router(AppState::new(settings))
}
