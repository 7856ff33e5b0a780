//! Stub account API served by a real axum router on a random local port.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Canned answer for one endpoint
#[derive(Clone, Debug)]
pub struct StubReply {
    status: StatusCode,
    body: Value,
}

impl StubReply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: Value::Null,
        }
    }
}

/// A request observed by the stub
#[derive(Clone, Debug)]
pub struct Hit {
    pub path: String,
    pub authorization: Option<String>,
}

struct StubState {
    accounts: StubReply,
    statement: StubReply,
    hits: Mutex<Vec<Hit>>,
}

pub struct StubApi {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubApi {
    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }
}

fn record(state: &StubState, uri: &Uri, headers: &HeaderMap) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.hits.lock().unwrap().push(Hit {
        path: uri.path().to_string(),
        authorization,
    });
}

fn reply(reply: &StubReply) -> Response {
    (reply.status, Json(reply.body.clone())).into_response()
}

async fn accounts(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    record(&state, &uri, &headers);
    reply(&state.accounts)
}

async fn statement(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    record(&state, &uri, &headers);
    reply(&state.statement)
}

/// Starts the stub and returns once it is accepting connections.
pub async fn spawn_stub(accounts_reply: StubReply, statement_reply: StubReply) -> StubApi {
    let state = Arc::new(StubState {
        accounts: accounts_reply,
        statement: statement_reply,
        hits: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/account", get(accounts))
        .route("/account/:account_id/statement", get(statement))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let address = listener.local_addr().expect("Stub listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    StubApi {
        base_url: format!("http://{}", address),
        state,
    }
}
