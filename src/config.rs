//! Layered simulation configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation-wide configuration, loadable from TOML or built directly
/// with [`SimConfig::default`].
///
/// Every field has a default matching the values used by the reference
/// scenarios this crate's integration tests exercise. Validation runs
/// once, in [`SimConfig::validate`], rather than being re-checked at
/// every call site that reads a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Price grid quantum. Every resting limit price is an integer
    /// multiple of this.
    pub tick_size: i64,
    /// Minimum order quantity after quantization.
    pub lot_size: u64,
    /// Mean of the `Exp(1/mean_latency)` delay applied between an
    /// agent's decision and its order's arrival on the book.
    pub mean_latency: f64,
    /// Spacing, in simulation time, between recurring snapshot events.
    pub snapshot_interval: f64,
    /// Number of price levels recorded per side on each snapshot.
    pub snapshot_depth: usize,
    /// Per-side probability that a maintenance tick discards one
    /// uniformly-chosen resting order. Zero disables the hook entirely.
    pub cancel_prob: f64,
    /// Starting value of the fair-value random walk.
    pub fair_value_initial: f64,
    /// Volatility of the fair-value random walk.
    pub fair_value_sigma: f64,
    /// Spacing, in simulation time, between fair-value updates.
    pub fair_value_dt: f64,
    /// Simulation time at which a `MarketCloseEvent` is scheduled.
    pub horizon: f64,
    /// Master seed. Agent-decision, latency, and fair-value RNG streams
    /// are each derived from this with a distinct stream id.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_size: 1,
            lot_size: 1,
            mean_latency: 1.0,
            snapshot_interval: 1.0,
            snapshot_depth: 5,
            cancel_prob: 0.0,
            fair_value_initial: 100.0,
            fair_value_sigma: 1.0,
            fair_value_dt: 1.0,
            horizon: 100.0,
            seed: 0,
        }
    }
}

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `tick_size` or `lot_size` was not strictly positive.
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    /// `cancel_prob` fell outside `[0, 1]`.
    #[error("cancel_prob must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    /// The TOML text could not be parsed into a `SimConfig`.
    #[error("malformed configuration: {0}")]
    Malformed(#[from] toml::de::Error),
}

impl SimConfig {
    /// Parses a [`SimConfig`] from TOML text, then validates it.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field is within its documented domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_size <= 0 {
            return Err(ConfigError::NotPositive {
                field: "tick_size",
                value: self.tick_size as f64,
            });
        }
        if self.lot_size == 0 {
            return Err(ConfigError::NotPositive {
                field: "lot_size",
                value: 0.0,
            });
        }
        if self.mean_latency <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "mean_latency",
                value: self.mean_latency,
            });
        }
        if self.snapshot_interval <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "snapshot_interval",
                value: self.snapshot_interval,
            });
        }
        if !(0.0..=1.0).contains(&self.cancel_prob) {
            return Err(ConfigError::InvalidProbability(self.cancel_prob));
        }
        Ok(())
    }
}
