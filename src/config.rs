//! Filter configuration.
//!
//! A [`WrappedKalmanConfig`] holds the construction parameters of a
//! [`WrappedKalman`](crate::estimators::wrapped::WrappedKalman) filter. It may be built in code or
//! deserialised, optional fields take their defaults.

use serde::{Deserialize, Serialize};

/// Retention of the prediction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRetention {
    /// Every state is kept
    Unbounded,
    /// At most this many states are kept, the oldest are dropped first
    Bounded(usize),
}

impl Default for HistoryRetention {
    fn default() -> Self {
        HistoryRetention::Unbounded
    }
}

/// Construction parameters of a wrapped Kalman filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedKalmanConfig {
    /// Initial angle (radians), wrapped on construction
    pub x0: f64,
    /// Time step
    pub dt: f64,
    /// Initial running covariance, also the constant process noise
    pub covariance: [[f64; 2]; 2],
    /// Measurement noise variance
    pub measurement_variance: f64,
    /// Wrap replicas {-l..l} considered for each measurement, at most [`MAX_HALF_WIDTH`](crate::angle::MAX_HALF_WIDTH)
    #[serde(default = "default_replica_half_width")]
    pub replica_half_width: u32,
    /// Initial angular rate
    #[serde(default)]
    pub initial_rate: f64,
    #[serde(default)]
    pub history: HistoryRetention,
}

fn default_replica_half_width() -> u32 {
    1
}

impl WrappedKalmanConfig {
    pub fn new(x0: f64, dt: f64, covariance: [[f64; 2]; 2], measurement_variance: f64) -> Self {
        WrappedKalmanConfig {
            x0,
            dt,
            covariance,
            measurement_variance,
            replica_half_width: default_replica_half_width(),
            initial_rate: 0.0,
            history: HistoryRetention::default(),
        }
    }

    pub fn with_replica_half_width(mut self, l: u32) -> Self {
        self.replica_half_width = l;
        self
    }

    pub fn with_initial_rate(mut self, v0: f64) -> Self {
        self.initial_rate = v0;
        self
    }

    pub fn with_history(mut self, history: HistoryRetention) -> Self {
        self.history = history;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_json() {
        let json = r#"{
            "x0": 0.0,
            "dt": 1.0,
            "covariance": [[0.01, 0.0], [0.0, 0.001]],
            "measurement_variance": 0.5
        }"#;
        let config: WrappedKalmanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, WrappedKalmanConfig::new(0.0, 1.0, [[0.01, 0.0], [0.0, 0.001]], 0.5));
        assert_eq!(config.replica_half_width, 1);
        assert_eq!(config.initial_rate, 0.0);
        assert_eq!(config.history, HistoryRetention::Unbounded);
    }

    #[test]
    fn bounded_history_from_json() {
        let json = r#"{
            "x0": 1.0,
            "dt": 0.1,
            "covariance": [[0.01, 0.0], [0.0, 0.001]],
            "measurement_variance": 0.5,
            "replica_half_width": 2,
            "initial_rate": 0.3,
            "history": {"bounded": 64}
        }"#;
        let config: WrappedKalmanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.replica_half_width, 2);
        assert_eq!(config.initial_rate, 0.3);
        assert_eq!(config.history, HistoryRetention::Bounded(64));
    }
}
