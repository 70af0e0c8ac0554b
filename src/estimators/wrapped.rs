#![allow(non_snake_case)]

//! Wrapped Kalman filter for bearing tracking.
//!
//! Estimates the angle and angular rate of an object moving on the unit circle from noisy angle
//! measurements that wrap modulo 2pi. The state follows constant angular rate kinematics.
//!
//! Each step predicts, resolves the innovation of the measurement over the wrap replicas and
//! corrects. A measurement close to the prediction only across the +-pi boundary is therefore
//! interpreted as close, not as 2pi away.
//!
//! The running state covariance and the process noise are both initialised from the supplied
//! covariance. The process noise is held constant and is the matrix propagated through the
//! transition, c_est = A.Q.A' + X. The running covariance X is added to it and is replaced by the
//! posterior (I - K.B).c_est after each correction.

use log::{debug, trace, warn};
use na::{DMatrix, Matrix2, RealField, Vector1, Vector2, U1, U2};
use nalgebra as na;

use crate::angle::{resolve_innovation, wrap, ReplicaInnovation, Replicas};
use crate::config::{HistoryRetention, WrappedKalmanConfig};
use crate::error::{report, FilterError, Result};
use crate::history::PredictionHistory;
use crate::linalg::check_covariance;
use crate::models::{
    Estimator, KalmanEstimator, KalmanState, LinearObserveModel, LinearPredictModel, LinearPredictor,
    WrappedObserver,
};
use crate::noise::{CorrelatedNoise, UncorrelatedNoise};

/// Wrapped Kalman filter.
///
/// Not synchronised, a filter must be stepped from one thread at a time.
pub struct WrappedKalman<N: RealField = f64> {
    estimate: KalmanState<N>,
    pred: LinearPredictModel<N>,
    obs: LinearObserveModel<N>,
    process_noise: CorrelatedNoise<N, U2>,
    measurement_noise: CorrelatedNoise<N, U1>,
    replicas: Replicas,
    predictions: PredictionHistory<N>,
    last_innovation: Option<ReplicaInnovation<N>>,
}

impl<N: RealField> WrappedKalman<N> {
    /// Construct with the default replicas {-1, 0, 1} and an initial rate of zero.
    pub fn new(x0: N, dt: N, covariance: Matrix2<N>, measurement_variance: N) -> Result<Self> {
        Self::with_options(
            x0,
            dt,
            covariance,
            measurement_variance,
            Replicas::default().half_width(),
            N::zero(),
        )
    }

    /// Construct with replicas {-l..l} and initial rate v0.
    pub fn with_options(
        x0: N,
        dt: N,
        covariance: Matrix2<N>,
        measurement_variance: N,
        l: u32,
        v0: N,
    ) -> Result<Self> {
        Self::build(
            x0,
            dt,
            covariance,
            measurement_variance,
            Replicas::new(l)?,
            v0,
            HistoryRetention::Unbounded,
        )
    }

    /// Construct with a covariance of dynamic shape, which must be 2x2.
    pub fn from_dynamic(x0: N, dt: N, covariance: &DMatrix<N>, measurement_variance: N) -> Result<Self> {
        let (rows, cols) = covariance.shape();
        if rows != 2 || cols != 2 {
            return Err(FilterError::CovarianceShape { rows, cols });
        }
        let X = Matrix2::new(
            covariance[(0, 0)],
            covariance[(0, 1)],
            covariance[(1, 0)],
            covariance[(1, 1)],
        );
        Self::new(x0, dt, X, measurement_variance)
    }

    /// Construct from a configuration.
    pub fn from_config(config: &WrappedKalmanConfig) -> Result<Self> {
        let c = &config.covariance;
        let X = Matrix2::new(
            na::convert(c[0][0]),
            na::convert(c[0][1]),
            na::convert(c[1][0]),
            na::convert(c[1][1]),
        );
        Self::build(
            na::convert(config.x0),
            na::convert(config.dt),
            X,
            na::convert(config.measurement_variance),
            Replicas::new(config.replica_half_width)?,
            na::convert(config.initial_rate),
            config.history,
        )
    }

    fn build(
        x0: N,
        dt: N,
        covariance: Matrix2<N>,
        measurement_variance: N,
        replicas: Replicas,
        v0: N,
        retention: HistoryRetention,
    ) -> Result<Self> {
        if !(dt > N::zero()) || !dt.is_finite() {
            return Err(FilterError::InvalidTimeStep(report(dt)));
        }
        if !(measurement_variance > N::zero()) || !measurement_variance.is_finite() {
            return Err(FilterError::InvalidMeasurementVariance(report(measurement_variance)));
        }
        if !x0.is_finite() {
            return Err(FilterError::InvalidInitialState("angle not finite"));
        }
        if !v0.is_finite() {
            return Err(FilterError::InvalidInitialState("rate not finite"));
        }
        check_covariance(&covariance)?;

        let estimate = KalmanState::new(wrap(x0), v0, covariance.clone());
        let mut predictions = PredictionHistory::new(retention)?;
        predictions.push(estimate.x.clone());

        debug!(
            "wrapped kalman: x0={} v0={} dt={} var={} replicas=+-{}",
            estimate.angle(),
            v0,
            dt,
            measurement_variance,
            replicas.half_width()
        );

        Ok(WrappedKalman {
            estimate,
            pred: LinearPredictModel::constant_rate(dt),
            obs: LinearObserveModel::angle(),
            process_noise: CorrelatedNoise { Q: covariance },
            measurement_noise: CorrelatedNoise::from_uncorrelated(&UncorrelatedNoise {
                q: Vector1::new(measurement_variance),
            }),
            replicas,
            predictions,
            last_innovation: None,
        })
    }

    /// The predicted state and covariance for the next step, the filter is not modified.
    pub fn predict(&self) -> Result<KalmanState<N>> {
        let mut predicted = self.estimate.clone();
        let x_pred = &self.pred.Fx * &self.estimate.x;
        predicted.predict(&self.pred, x_pred, &self.process_noise)?;
        Ok(predicted)
    }

    /// Predict, resolve the wrapped innovation of measurement `y` and correct.
    ///
    /// The measurement need not be wrapped. On error the filter is unchanged.
    pub fn step(&mut self, y: N) -> Result<()> {
        if !y.is_finite() {
            return Err(FilterError::NonFiniteMeasurement(report(y)));
        }

        let mut est = self.predict()?;
        let resolved = resolve_innovation(y, est.angle(), self.measurement_noise.variance(), &self.replicas)
            .map_err(|e| {
                warn!("wrapped kalman: measurement {} rejected: {}", y, e);
                e
            })?;
        if let Err(e) = est.observe_innovation(&self.obs, &self.measurement_noise, resolved.innovation) {
            warn!("wrapped kalman: observation rejected: {}", e);
            return Err(e);
        }

        trace!(
            "wrapped kalman: y={} innovation={} offset={} angle={} rate={}",
            y,
            resolved.innovation,
            resolved.most_likely_offset(),
            est.angle(),
            est.rate()
        );

        self.predictions.push(est.x.clone());
        self.estimate = est;
        self.last_innovation = Some(resolved);

        Ok(())
    }

    /// Step through a sequence of measurements.
    pub fn step_all<I: IntoIterator<Item = N>>(&mut self, ys: I) -> Result<()> {
        for y in ys {
            self.step(y)?;
        }
        Ok(())
    }

    /// Reinitialise the state and running covariance, restarting the history.
    ///
    /// The process noise propagated at each prediction is kept.
    pub fn reset(&mut self, x0: N, v0: N, covariance: Matrix2<N>) -> Result<N> {
        if !x0.is_finite() || !v0.is_finite() {
            return Err(FilterError::InvalidInitialState("not finite"));
        }
        self.init(&KalmanState::new(x0, v0, covariance))
    }

    /// Current (angle, rate).
    pub fn current_state(&self) -> (N, N) {
        (self.estimate.angle(), self.estimate.rate())
    }

    /// The running covariance, the posterior of the last correction.
    pub fn current_covariance(&self) -> &Matrix2<N> {
        &self.estimate.X
    }

    pub fn prediction_history(&self) -> &PredictionHistory<N> {
        &self.predictions
    }

    /// Take the prediction history, leaving it empty.
    pub fn drain_history(&mut self) -> Vec<Vector2<N>> {
        self.predictions.drain()
    }

    /// The resolved innovation of the last step.
    pub fn last_innovation(&self) -> Option<&ReplicaInnovation<N>> {
        self.last_innovation.as_ref()
    }

    /// The constant covariance propagated through the transition at each prediction.
    pub fn process_noise(&self) -> &Matrix2<N> {
        &self.process_noise.Q
    }

    pub fn measurement_variance(&self) -> N {
        self.measurement_noise.variance()
    }

    pub fn replicas(&self) -> &Replicas {
        &self.replicas
    }

    /// The state transition matrix.
    pub fn transition(&self) -> &Matrix2<N> {
        &self.pred.Fx
    }
}

impl<N: RealField> Estimator<N> for WrappedKalman<N> {
    fn state(&self) -> Result<Vector2<N>> {
        self.estimate.state()
    }
}

impl<N: RealField> KalmanEstimator<N> for WrappedKalman<N> {
    fn init(&mut self, state: &KalmanState<N>) -> Result<N> {
        let rcond = self.estimate.init(state)?;
        self.predictions.clear();
        self.predictions.push(self.estimate.x.clone());
        self.last_innovation = None;
        debug!("wrapped kalman: init angle={} rate={}", self.estimate.angle(), self.estimate.rate());

        Ok(rcond)
    }

    fn kalman_state(&self) -> Result<(N, KalmanState<N>)> {
        self.estimate.kalman_state()
    }
}
