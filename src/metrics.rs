use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref LOGIN_ATTEMPTS: Counter =
        register_counter!("devfolio_login_attempts_total", "Total number of login attempts").unwrap();
    pub static ref LOGIN_THROTTLED: Counter =
        register_counter!("devfolio_login_throttled_total", "Login attempts rejected by the rate limiter").unwrap();
    pub static ref LOGIN_FAILURES: Counter =
        register_counter!("devfolio_login_failures_total", "Login attempts with invalid credentials").unwrap();
    pub static ref LOGIN_LATENCY: Histogram = register_histogram!(
        "devfolio_login_latency_seconds",
        "Login handler latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("devfolio_rate_limit_clients", "Current number of tracked rate limit records").unwrap();
}
