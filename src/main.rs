mod auth;
mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod state;
mod worker;

use anyhow::Context;
use clap::Parser; // for cli
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::AdminCredentials;
use crate::config::Args;
use crate::rate_limit::RateLimiter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments
    let args = Args::parse();

    if let Some(password) = &args.hash_password {
        println!("{}", auth::hash_password(password)?);
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devfolio_gate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let limit_config = args
        .rate_limit_config()
        .context("invalid rate limit configuration")?;
    let login_limiter = Arc::new(RateLimiter::new(limit_config));

    let admin = AdminCredentials::new(&args.admin_email, &args.admin_password_hash);
    if !admin.is_configured() {
        tracing::warn!("No admin credentials configured; every login will be refused");
    }

    let state = AppState {
        login_limiter: login_limiter.clone(),
        admin,
    };

    // spawn the background sweeper
    let sweep_interval = Duration::from_secs(args.sweep_interval);
    tokio::spawn(worker::sweeper(login_limiter, sweep_interval));

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("devfolio-gate listening on http://{}", addr);
    tracing::info!(
        "Login rate limit: {} requests per {} ms",
        limit_config.tokens(),
        limit_config.interval_ms()
    );
    axum::serve(listener, app).await?;

    Ok(())
}
