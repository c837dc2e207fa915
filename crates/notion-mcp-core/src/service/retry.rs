//! Bounded retry state machine for Notion API requests
//!
//! Every attempt, whether it ended in a 429 or a transport failure, is drawn
//! from the same budget of `max_attempts`.
//!
//! ```text
//!              ┌──────────────┐  2xx              ┌───────────┐
//!   start ───▶ │  Attempting  │ ────────────────▶ │ Succeeded │
//!              └──────────────┘                   └───────────┘
//!                │   │     │  4xx/5xx, decode    ┌───────────┐
//!            429 │   │     └───────────────────▶ │ Exhausted │
//!                ▼   ▼ transport error            └───────────┘
//!   BackoffForRateLimit / BackoffForTransientError     ▲
//!                │   │   budget left: attempt + 1      │ budget spent
//!                └───┴──────────▶ Attempting ──────────┘
//! ```

use std::time::Duration;

use crate::error::ApiError;

/// Retry limits and backoff durations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Wait after a connection failure or timeout
    pub transient_backoff: Duration,
    /// Wait after a 429 without a usable `Retry-After` header
    pub default_rate_limit_backoff: Duration,
    /// Upper bound on a server-requested `Retry-After`
    pub max_rate_limit_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            transient_backoff: Duration::from_secs(1),
            default_rate_limit_backoff: Duration::from_secs(1),
            max_rate_limit_backoff: Duration::from_secs(60),
        }
    }
}

/// What a single attempt produced
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    /// HTTP 429 with the raw `Retry-After` header, if any
    RateLimited { retry_after: Option<String> },
    /// Connection failure, timeout, or body read failure
    Transient(String),
    /// Anything that must not be retried
    Fatal(ApiError),
}

/// States of one logical request
#[derive(Debug)]
pub enum RetryState<T> {
    Attempting { attempt: u32 },
    BackoffForRateLimit { attempt: u32, wait: Duration },
    BackoffForTransientError { attempt: u32, wait: Duration, error: String },
    Succeeded(T),
    Exhausted(ApiError),
}

impl<T> RetryState<T> {
    /// Initial state
    pub fn start() -> Self {
        RetryState::Attempting { attempt: 1 }
    }

    /// True once no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, RetryState::Succeeded(_) | RetryState::Exhausted(_))
    }
}

impl RetryPolicy {
    /// Transition out of `Attempting { attempt }` given its outcome
    pub fn on_outcome<T>(&self, attempt: u32, outcome: AttemptOutcome<T>) -> RetryState<T> {
        let budget_left = attempt < self.max_attempts;

        match outcome {
            AttemptOutcome::Success(value) => RetryState::Succeeded(value),
            AttemptOutcome::Fatal(err) => RetryState::Exhausted(err),
            AttemptOutcome::RateLimited { retry_after } => {
                if budget_left {
                    RetryState::BackoffForRateLimit {
                        attempt,
                        wait: self.rate_limit_wait(retry_after.as_deref()),
                    }
                } else {
                    RetryState::Exhausted(ApiError::RateLimited { attempts: attempt })
                }
            }
            AttemptOutcome::Transient(error) => {
                if budget_left {
                    RetryState::BackoffForTransientError {
                        attempt,
                        wait: self.transient_backoff,
                        error,
                    }
                } else {
                    RetryState::Exhausted(ApiError::Transport {
                        attempts: attempt,
                        message: error,
                    })
                }
            }
        }
    }

    /// Transition out of a backoff state once the wait has elapsed
    pub fn after_backoff<T>(&self, state: RetryState<T>) -> RetryState<T> {
        match state {
            RetryState::BackoffForRateLimit { attempt, .. }
            | RetryState::BackoffForTransientError { attempt, .. } => RetryState::Attempting {
                attempt: attempt + 1,
            },
            other => other,
        }
    }

    /// Wait requested by a 429 response
    ///
    /// `Retry-After` is read as whole seconds; absent or unparsable values
    /// fall back to the default, and large values are capped.
    pub fn rate_limit_wait(&self, retry_after: Option<&str>) -> Duration {
        retry_after
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(self.default_rate_limit_backoff)
            .min(self.max_rate_limit_backoff)
    }
}
