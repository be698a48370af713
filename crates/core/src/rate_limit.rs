//! Fixed-window rate limiting.
//!
//! The window math is pure and shared; storage sits behind
//! [`RateLimitStore`] so the in-memory variant (RSVP pipeline) and the
//! persisted variant (wishes pipeline, backed by Postgres) are
//! interchangeable. A window starts at a key's first recorded attempt and
//! resets wholesale once it has elapsed; attempts rejected inside a live
//! window never move its reset time.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// One counter per guest address per project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateLimitKey {
    pub project_id: DbId,
    pub client_addr: String,
}

/// A key's counter state inside its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    pub count: u32,
    pub window_start: Timestamp,
}

/// Capacity and window length for one pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub max_submissions: u32,
    pub window: Duration,
}

/// Outcome of checking a counter against a policy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_time: Timestamp,
}

impl RateLimitPolicy {
    pub fn new(max_submissions: u32, window: Duration) -> Self {
        Self {
            max_submissions,
            window,
        }
    }

    /// Judge a recorded attempt count against this policy.
    pub fn decide(&self, current: WindowCount) -> RateLimitDecision {
        RateLimitDecision {
            allowed: current.count <= self.max_submissions,
            remaining: self.max_submissions.saturating_sub(current.count),
            reset_time: current.window_start + self.window,
        }
    }

    /// Decision for a key with no live window: full quota available.
    pub fn fresh(&self, now: Timestamp) -> RateLimitDecision {
        RateLimitDecision {
            allowed: true,
            remaining: self.max_submissions,
            reset_time: now + self.window,
        }
    }
}

/// Storage for fixed-window counters.
///
/// `now` is supplied by the caller so window arithmetic stays
/// deterministic under test.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record an attempt and return the key's updated state. Starts a
    /// fresh window (count 1) when none is live; otherwise increments the
    /// count and preserves the window start.
    async fn increment(
        &self,
        key: &RateLimitKey,
        window: Duration,
        now: Timestamp,
    ) -> Result<WindowCount, CoreError>;

    /// Read a key's state without consuming an attempt. `None` means no
    /// live window (never seen, or the last one expired).
    async fn peek(
        &self,
        key: &RateLimitKey,
        window: Duration,
        now: Timestamp,
    ) -> Result<Option<WindowCount>, CoreError>;
}

/// Process-local counter map for the RSVP pipeline.
///
/// State lives for the lifetime of the process and is not shared across
/// instances; multi-instance deployments need the persisted store instead.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<RateLimitKey, WindowCount>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn increment(
        &self,
        key: &RateLimitKey,
        window: Duration,
        now: Timestamp,
    ) -> Result<WindowCount, CoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Internal("rate-limit store lock poisoned".to_string()))?;
        let next = match entries.get(key) {
            Some(current) if now - current.window_start < window => WindowCount {
                count: current.count + 1,
                window_start: current.window_start,
            },
            _ => WindowCount {
                count: 1,
                window_start: now,
            },
        };
        entries.insert(key.clone(), next);
        Ok(next)
    }

    async fn peek(
        &self,
        key: &RateLimitKey,
        window: Duration,
        now: Timestamp,
    ) -> Result<Option<WindowCount>, CoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Internal("rate-limit store lock poisoned".to_string()))?;
        Ok(entries
            .get(key)
            .copied()
            .filter(|current| now - current.window_start < window))
    }
}
