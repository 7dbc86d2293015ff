//! Tuning knobs for the simulated balance feed.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Cadence and probabilities for a [`BalanceFeed`](crate::balance::BalanceFeed).
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How often a balance update is considered.
    pub update_interval: Duration,
    /// How often connection liveness is re-evaluated.
    pub connection_interval: Duration,
    /// Chance that an update tick actually changes the balance.
    pub update_probability: f64,
    /// Chance that a liveness tick reports the feed as connected.
    pub connected_probability: f64,
    /// Width of the uniform delta range, centred on zero.
    pub delta_span: f64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl FeedConfig {
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_CONNECTION_INTERVAL: Duration = Duration::from_secs(10);
    pub const DEFAULT_UPDATE_PROBABILITY: f64 = 0.3;
    pub const DEFAULT_CONNECTED_PROBABILITY: f64 = 0.9;
    pub const DEFAULT_DELTA_SPAN: f64 = 10.0;

    /// Creates a FeedConfig from environment variables, falling back to the
    /// in-code defaults for anything unset or unparsable.
    ///
    /// # Environment Variables
    /// - `BALANCE_UPDATE_INTERVAL_MS`: update cadence in milliseconds.
    /// - `CONNECTION_CHECK_INTERVAL_MS`: liveness cadence in milliseconds.
    /// - `BALANCE_UPDATE_PROBABILITY`: 0.0 to 1.0.
    /// - `CONNECTION_UP_PROBABILITY`: 0.0 to 1.0.
    /// - `BALANCE_SIM_SEED`: u64 seed for reproducible sessions.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let millis = |key: &str| {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
        };
        let probability = |key: &str| {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|p| (0.0..=1.0).contains(p))
        };

        Self {
            update_interval: millis("BALANCE_UPDATE_INTERVAL_MS")
                .unwrap_or(defaults.update_interval),
            connection_interval: millis("CONNECTION_CHECK_INTERVAL_MS")
                .unwrap_or(defaults.connection_interval),
            update_probability: probability("BALANCE_UPDATE_PROBABILITY")
                .unwrap_or(defaults.update_probability),
            connected_probability: probability("CONNECTION_UP_PROBABILITY")
                .unwrap_or(defaults.connected_probability),
            delta_span: defaults.delta_span,
            seed: env::var("BALANCE_SIM_SEED")
                .ok()
                .and_then(|s| s.trim().parse().ok()),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            update_interval: Self::DEFAULT_UPDATE_INTERVAL,
            connection_interval: Self::DEFAULT_CONNECTION_INTERVAL,
            update_probability: Self::DEFAULT_UPDATE_PROBABILITY,
            connected_probability: Self::DEFAULT_CONNECTED_PROBABILITY,
            delta_span: Self::DEFAULT_DELTA_SPAN,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so env mutation cannot race with a sibling test.
    #[test]
    fn from_env_overrides_and_falls_back() {
        env::set_var("BALANCE_UPDATE_INTERVAL_MS", "250");
        env::set_var("CONNECTION_CHECK_INTERVAL_MS", "not-a-number");
        env::set_var("BALANCE_UPDATE_PROBABILITY", "1.5");
        env::set_var("CONNECTION_UP_PROBABILITY", "0.5");
        env::set_var("BALANCE_SIM_SEED", "42");

        let config = FeedConfig::from_env();
        assert_eq!(config.update_interval, Duration::from_millis(250));
        assert_eq!(
            config.connection_interval,
            FeedConfig::DEFAULT_CONNECTION_INTERVAL
        );
        assert_eq!(
            config.update_probability,
            FeedConfig::DEFAULT_UPDATE_PROBABILITY
        );
        assert_eq!(config.connected_probability, 0.5);
        assert_eq!(config.seed, Some(42));

        for key in [
            "BALANCE_UPDATE_INTERVAL_MS",
            "CONNECTION_CHECK_INTERVAL_MS",
            "BALANCE_UPDATE_PROBABILITY",
            "CONNECTION_UP_PROBABILITY",
            "BALANCE_SIM_SEED",
        ] {
            env::remove_var(key);
        }
        assert_eq!(FeedConfig::from_env(), FeedConfig::default());
    }
}
