//! Filter errors.
//!
//! Construction validates its inputs and fails fast. A step either completes or returns an error
//! leaving the filter unchanged.

use nalgebra as na;
use na::RealField;

/// Result type alias
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors of the wrapped Kalman filter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Time step not strictly positive and finite
    #[error("Invalid time step: {0} (must be > 0)")]
    InvalidTimeStep(f64),

    /// Measurement noise variance not strictly positive and finite
    #[error("Invalid measurement variance: {0} (must be > 0)")]
    InvalidMeasurementVariance(f64),

    /// Initial angle or rate not finite
    #[error("Invalid initial state: {0}")]
    InvalidInitialState(&'static str),

    /// Covariance not finite, not symmetric or not PSD
    #[error("Invalid covariance: {0}")]
    InvalidCovariance(&'static str),

    /// Covariance supplied with a shape other than 2x2
    #[error("Covariance shape error: expected 2x2, got {rows}x{cols}")]
    CovarianceShape {
        /// Rows supplied
        rows: usize,
        /// Columns supplied
        cols: usize,
    },

    /// Replica half-width above the accepted maximum
    #[error("Invalid replica half-width: {0}")]
    InvalidReplicas(u32),

    /// History retention bound of zero
    #[error("Invalid history retention: bound must be at least 1")]
    InvalidRetention,

    /// Measurement is NaN or infinite
    #[error("Non finite measurement: {0}")]
    NonFiniteMeasurement(f64),

    /// Innovation variance not positive before inversion
    #[error("Numerical instability: innovation variance {innovation_variance} not positive")]
    NumericalInstability {
        /// The offending B.X.B' + var term
        innovation_variance: f64,
    },

    /// Replica likelihoods could not be normalised
    #[error("Numerical instability: replica likelihoods cannot be normalised")]
    DegenerateReplicas,
}

/// Scalar value for error reporting.
pub(crate) fn report<N: RealField>(x: N) -> f64 {
    na::try_convert::<N, f64>(x).unwrap_or(f64::NAN)
}
