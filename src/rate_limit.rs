//! Fixed-window request limiter keyed by client identifier.
//!
//! Each client gets a counter and the absolute time its current window ends.
//! The first request after that time opens a fresh window anchored at `now`.
//! Because windows are fixed, a client can land up to `2 * tokens` requests
//! across a boundary.

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rate limit tokens must be positive")]
    ZeroTokens,
    #[error("rate limit interval must be positive")]
    ZeroInterval,
}

/// Quota settings, validated once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    tokens: u32,
    interval_ms: u64,
}

impl RateLimitConfig {
    pub fn new(tokens: u32, interval_ms: u64) -> Result<Self, ConfigError> {
        if tokens == 0 {
            return Err(ConfigError::ZeroTokens);
        }
        if interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self { tokens, interval_ms })
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

// Per-client counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRecord {
    pub count: u32,
    pub window_expiry: u64, // absolute ms since epoch
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed { remaining: u32 },
    Rejected { retry_after_ms: u64 },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed { .. })
    }
}

/// Source of wall-clock milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        // Pre-epoch clocks clamp to zero
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Storage for the record table.
///
/// `hit` must apply the window reset and increment atomically for a key.
/// An implementation backed by a shared store would need an atomic
/// increment with per-key expiry to give the same guarantee.
pub trait RateStore: Send + Sync {
    fn hit(&self, client_id: &str, now: u64, config: &RateLimitConfig) -> RateRecord;

    /// Drop records whose window ended before `stale_before`.
    fn evict_expired(&self, stale_before: u64) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    records: DashMap<String, RateRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateStore for InMemoryStore {
    fn hit(&self, client_id: &str, now: u64, config: &RateLimitConfig) -> RateRecord {
        let fresh = RateRecord {
            count: 0,
            window_expiry: now.saturating_add(config.interval_ms),
        };

        // entry() holds the shard lock until the guard drops
        let mut entry = self.records.entry(client_id.to_string()).or_insert(fresh);

        // window elapsed..? open a new one at now
        if entry.window_expiry < now {
            *entry = fresh;
        }

        // past the quota the verdict can't change, so stop counting
        if entry.count <= config.tokens {
            entry.count = entry.count.saturating_add(1);
        }

        *entry
    }

    fn evict_expired(&self, stale_before: u64) -> usize {
        let before = self.records.len();
        self.records
            .retain(|_, record| record.window_expiry >= stale_before);
        before.saturating_sub(self.records.len())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

pub struct RateLimiter {
    config: RateLimitConfig,
    store: Arc<dyn RateStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_parts(config, Arc::new(InMemoryStore::new()), Arc::new(SystemClock))
    }

    pub fn with_parts(
        config: RateLimitConfig,
        store: Arc<dyn RateStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    /// Count one request from `client_id` and decide whether it may proceed.
    pub fn check(&self, client_id: &str) -> Verdict {
        let now = self.clock.now_ms();
        let record = self.store.hit(client_id, now, &self.config);

        if record.count > self.config.tokens {
            tracing::debug!(client_id, count = record.count, "rate limit exceeded");
            Verdict::Rejected {
                retry_after_ms: record.window_expiry.saturating_sub(now),
            }
        } else {
            Verdict::Allowed {
                remaining: self.config.tokens - record.count,
            }
        }
    }

    /// Remove records that have been idle for more than a full interval.
    /// Records in an open window are never touched.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let stale_before = now.saturating_sub(self.config.interval_ms);
        self.store.evict_expired(stale_before)
    }

    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }
}
