//! Retry with exponential backoff for transient gateway failures.
//!
//! Only idempotent fetches go through the retry path; the SDK never
//! replays a mutating request on its own, since a timed-out charge may
//! still have been booked by the gateway.

use std::{future::Future, time::Duration};

use serde::Deserialize;

use crate::error::MgwError;

/// Configuration for exponential backoff retries.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds (default: 100).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Cap on the delay between retries, in milliseconds (default: 5000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Multiplier applied per attempt (default: 2.0).
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_delay_ms() -> u64 {
    100
}

const fn default_max_delay_ms() -> u64 {
    5_000
}

const fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with custom maximum attempts and defaults otherwise.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts, ..Self::default() }
    }

    /// A policy that disables retrying entirely.
    #[must_use]
    pub fn disabled() -> Self {
        Self::with_max_attempts(1)
    }

    /// Delay before retry number `attempt` (zero-based), capped at
    /// `max_delay_ms`.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "millisecond delays are far below the precision cliff"
        )]
        let delay_ms = (self.initial_delay_ms as f64
            * self.backoff_multiplier.powi(attempt.min(i32::MAX as u32) as i32))
            as u64;
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }
}

/// Runs `operation` until it succeeds, retrying retryable errors with
/// exponential backoff.
///
/// The error type is generic; callers pass an `is_retryable` predicate so
/// the policy can be reused with error enums other than [`MgwError`] in
/// tests.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-retryable error immediately.
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    is_retryable: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 0..policy.max_attempts.max(1) {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "fetch succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => {
                let retryable = is_retryable(&error);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    retryable,
                    error = %error,
                    "gateway fetch failed"
                );
                if !retryable {
                    return Err(error);
                }
                last_error = Some(error);
                if attempt + 1 < policy.max_attempts {
                    tokio::time::sleep(policy.delay_for_attempt(attempt)).await;
                }
            }
        }
    }

    Err(last_error.expect("at least one attempt was made"))
}

/// Returns true for transient transport failures worth retrying.
///
/// Gateway rejections, key/config validation failures, and decode errors
/// are deterministic and never retried.
#[must_use]
pub fn is_retryable(error: &MgwError) -> bool {
    match error {
        MgwError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        MgwError::Api { .. }
        | MgwError::Json(_)
        | MgwError::InvalidKey(_)
        | MgwError::InvalidBaseUrl(_)
        | MgwError::Config(_)
        | MgwError::MissingResourceId(_)
        | MgwError::UnexpectedResponse(_) => false,
    }
}
