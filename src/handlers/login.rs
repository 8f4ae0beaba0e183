use axum::{Json, extract::State, extract::rejection::JsonRejection, http::HeaderMap};
use std::time::Instant;
use crate::error::ApiError;
use crate::state::AppState;
use crate::models::{LoginRequest, LoginResponse};
use crate::metrics::{LOGIN_ATTEMPTS, LOGIN_FAILURES, LOGIN_LATENCY, LOGIN_THROTTLED, TRACKED_CLIENTS};
use crate::rate_limit::Verdict;

const FALLBACK_CLIENT: &str = "127.0.0.1";

// Client key from the proxy header; first hop wins
pub fn client_id(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(FALLBACK_CLIENT)
        .to_string()
}

pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    LOGIN_ATTEMPTS.inc();
    let start_time = Instant::now();

    // argon2 verification is CPU-bound, keep it off the async workers
    let result = tokio::task::spawn_blocking(move || authenticate(&state, &headers, payload))
        .await
        .unwrap_or_else(|e| Err(ApiError::Internal(format!("login task failed: {e}"))));

    LOGIN_LATENCY.observe(start_time.elapsed().as_secs_f64());
    result
}

fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let client = client_id(headers);
    let verdict = state.login_limiter.check(&client);
    TRACKED_CLIENTS.set(state.login_limiter.tracked_clients() as f64);

    // throttled..? stop before touching credentials
    if let Verdict::Rejected { retry_after_ms } = verdict {
        LOGIN_THROTTLED.inc();
        tracing::warn!(client = %client, "Login throttled");
        return Err(ApiError::TooManyRequests {
            retry_after_secs: retry_after_ms.div_ceil(1000).max(1),
        });
    }

    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected login body: {}", e);
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Please provide email and password".to_string(),
        ));
    }

    if !state.admin.verify(&payload.email, &payload.password) {
        LOGIN_FAILURES.inc();
        tracing::info!(client = %client, "Login failed: invalid credentials");
        return Err(ApiError::Unauthorized);
    }

    tracing::info!(client = %client, "Admin logged in");

    Ok(Json(LoginResponse { success: true }))
}
