use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
};
use chrono::Utc;
use client::{load_dashboard, ApiClient, DashboardOptions};
use common::DashboardView;
use tracing::{error, info, instrument};

use crate::schemas::{ApiResponse, AppState, DashboardApiResponse, ErrorResponse};

type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Extracts the token of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Get the dashboard of the caller's first account
///
/// The caller's bearer token is forwarded to the account API.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(
        ("Authorization" = String, Header, description = "Bearer token forwarded to the account API"),
    ),
    responses(
        (status = 200, description = "Dashboard computed successfully", body = DashboardApiResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 502, description = "Account API request failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<DashboardView>>, ErrorReply> {
    let Some(token) = bearer_token(&headers) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("UNAUTHORIZED", "Missing bearer token")),
        ));
    };

    let client = ApiClient::with_http_client(
        state.http.clone(),
        state.settings.api_base_url.clone(),
        token,
    );
    let options = DashboardOptions {
        now: Utc::now(),
        window_days: state.settings.window_days,
    };

    match load_dashboard(&client, &options).await {
        Ok(view) => {
            info!("Dashboard served with {} transactions", view.transactions.len());
            Ok(Json(ApiResponse {
                data: view,
                message: "Dashboard loaded successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to load dashboard: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(e.code(), e.to_string())),
            ))
        }
    }
}
