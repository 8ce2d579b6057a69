//! Bounded retry for fallible clipboard operations

use std::fmt::Display;

use tokio::time;
use tracing::warn;

use crate::config::RetryPolicy;

/// Every attempt failed; holds the error from the final attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("gave up after {attempts} attempts: {last}")]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub last: E,
}

/// Run `op` until it succeeds or `policy.attempts` attempts have failed.
///
/// Sleeps `policy.delay` before every attempt except the first. A policy
/// with zero attempts still runs `op` once.
pub async fn with_retry<T, E, F>(policy: RetryPolicy, mut op: F) -> Result<T, Exhausted<E>>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => {
                return Err(Exhausted { attempts, last: e });
            }
            Err(e) => {
                warn!(attempt, attempts, error = %e, "attempt failed, retrying");
            }
        }

        time::sleep(policy.delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(10),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_succeeds_without_delay() {
        let start = Instant::now();
        let mut calls = 0;
        let result: Result<u32, Exhausted<String>> = with_retry(policy(), || {
            calls += 1;
            Ok(7)
        })
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_on_last_attempt() {
        let start = Instant::now();
        let mut calls = 0;
        let result = with_retry(policy(), || {
            calls += 1;
            if calls < 3 {
                Err("busy")
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls, 3);
        assert_eq!(start.elapsed(), Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_returns_last_error() {
        let mut calls = 0;
        let result: Result<(), _> = with_retry(policy(), || {
            calls += 1;
            Err(format!("failure {calls}"))
        })
        .await;

        assert_eq!(
            result,
            Err(Exhausted {
                attempts: 3,
                last: "failure 3".to_string()
            })
        );
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_runs_once() {
        let mut calls = 0;
        let result: Result<(), _> = with_retry(
            RetryPolicy {
                attempts: 0,
                delay: Duration::from_millis(10),
            },
            || {
                calls += 1;
                Err("nope")
            },
        )
        .await;

        assert_eq!(result.unwrap_err().attempts, 1);
        assert_eq!(calls, 1);
    }
}
