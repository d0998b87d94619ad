//! Configuration loading and management

use std::str::FromStr;

use anyhow::{ensure, Context, Result};

/// Host configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Width of the touch surface; the button is sized from it
    pub surface_width: f64,

    /// Capacity of the touch batch queue feeding the state machine
    pub queue_capacity: usize,

    /// Capacity of the surface event broadcast channel
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface_width: 750.0,
            queue_capacity: 32,
            event_capacity: 64,
        }
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            surface_width: parse_var(&lookup, "TOUCH_RECORDER_WIDTH", defaults.surface_width)?,
            queue_capacity: parse_var(&lookup, "TOUCH_RECORDER_QUEUE", defaults.queue_capacity)?,
            event_capacity: parse_var(&lookup, "TOUCH_RECORDER_EVENTS", defaults.event_capacity)?,
        };

        ensure!(
            config.surface_width.is_finite() && config.surface_width > 0.0,
            "surface width must be positive, got {}",
            config.surface_width
        );
        ensure!(config.queue_capacity > 0, "queue capacity must be non-zero");
        ensure!(config.event_capacity > 0, "event capacity must be non-zero");

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
