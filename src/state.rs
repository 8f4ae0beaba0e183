use std::sync::Arc;
use crate::auth::AdminCredentials;
use crate::rate_limit::RateLimiter;

// app's shared state
#[derive(Clone)]
pub struct AppState {
    pub login_limiter: Arc<RateLimiter>, // guards POST /api/login
    pub admin: AdminCredentials,
}
