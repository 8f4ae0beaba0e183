mod health;
mod metrics;
mod login;

use axum::{Router, routing::{get, post}};
use tower_http::trace::TraceLayer;
use crate::state::AppState;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use login::{client_id, login_handler};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/login", post(login_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
