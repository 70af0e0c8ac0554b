//! Bearing state estimators.

pub mod covariance;
pub mod wrapped;
