use std::sync::Arc;
use tokio::time::{Duration, interval};
use crate::metrics::TRACKED_CLIENTS;
use crate::rate_limit::RateLimiter;

// Periodically drop rate records for clients that went quiet
pub async fn sweeper(limiter: Arc<RateLimiter>, sweep_interval: Duration) {
    let mut interval = interval(sweep_interval);

    tracing::info!("Rate limit sweeper started (interval: {:?})", sweep_interval);

    loop {
        interval.tick().await;
        sweep_once(&limiter);
    }
}

pub fn sweep_once(limiter: &RateLimiter) -> usize {
    let removed = limiter.sweep();
    let remaining = limiter.tracked_clients();
    TRACKED_CLIENTS.set(remaining as f64);

    if removed > 0 {
        tracing::debug!(removed, remaining, "Swept stale rate limit records");
    }
    removed
}
