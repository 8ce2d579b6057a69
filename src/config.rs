//! Configuration loading and management
//!
//! Every value has a built-in default and can be overridden through an
//! environment variable. There is no configuration file.

use std::time::Duration;

use anyhow::Result;

const TICK_MS_VAR: &str = "CLIPSLOTS_TICK_MS";
const COOLDOWN_MS_VAR: &str = "CLIPSLOTS_COOLDOWN_MS";
const RETRY_ATTEMPTS_VAR: &str = "CLIPSLOTS_RETRY_ATTEMPTS";
const RETRY_DELAY_MS_VAR: &str = "CLIPSLOTS_RETRY_DELAY_MS";
const PREVIEW_CHARS_VAR: &str = "CLIPSLOTS_PREVIEW_CHARS";

/// Bounded retry policy for clipboard I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    /// Pause before every attempt after the first
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(10),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Period of the key sampling timer
    pub tick_interval: Duration,

    /// Minimum time between two accepted actions, across all chords
    pub cooldown: Duration,

    /// Retry policy for clipboard reads and writes
    pub retry: RetryPolicy,

    /// Characters shown before a stored value is truncated
    pub preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(30),
            cooldown: Duration::from_millis(300),
            retry: RetryPolicy::default(),
            preview_chars: 50,
        }
    }
}

/// Invalid configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be at least {min}, got {value}")]
    TooSmall {
        var: &'static str,
        min: u64,
        value: u64,
    },
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Ok(Self::from_lookup(|var| std::env::var(var).ok())?)
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |var: &'static str, default: u64, min: u64| -> Result<u64, ConfigError> {
            let Some(raw) = lookup(var) else {
                return Ok(default);
            };
            let value = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::NotANumber { var, value: raw })?;
            if value < min {
                return Err(ConfigError::TooSmall { var, min, value });
            }
            Ok(value)
        };

        let tick_ms = read(TICK_MS_VAR, defaults.tick_interval.as_millis() as u64, 1)?;
        let cooldown_ms = read(COOLDOWN_MS_VAR, defaults.cooldown.as_millis() as u64, 0)?;
        let attempts = read(RETRY_ATTEMPTS_VAR, defaults.retry.attempts as u64, 1)?;
        let delay_ms = read(
            RETRY_DELAY_MS_VAR,
            defaults.retry.delay.as_millis() as u64,
            0,
        )?;
        let preview_chars = read(PREVIEW_CHARS_VAR, defaults.preview_chars as u64, 1)?;

        Ok(Self {
            tick_interval: Duration::from_millis(tick_ms),
            cooldown: Duration::from_millis(cooldown_ms),
            retry: RetryPolicy {
                attempts: attempts.min(u32::MAX as u64) as u32,
                delay: Duration::from_millis(delay_ms),
            },
            preview_chars: preview_chars as usize,
        })
    }
}
