#![allow(non_snake_case)]

//! Bearing estimation models.
//!
//! The state of a bearing is its angle and angular rate. State representations are modeled as
//! structs, estimation operations are defined as traits.

use na::{Matrix1x2, Matrix2, RealField, Vector2, U1, U2};
use nalgebra as na;

use crate::error::Result;
use crate::noise::CorrelatedNoise;

/// Kalman State.
///
/// Linear representation as a state vector and the state covariance (symmetric positive semi-definite) matrix.
/// The state vector is (angle, angular rate).
#[derive(PartialEq, Clone, Debug)]
pub struct KalmanState<N: RealField> {
    /// State vector
    pub x: Vector2<N>,
    /// State covariance matrix (symmetric positive semi-definite)
    pub X: Matrix2<N>,
}

impl<N: RealField> KalmanState<N> {
    pub fn new(angle: N, rate: N, X: Matrix2<N>) -> KalmanState<N> {
        KalmanState {
            x: Vector2::new(angle, rate),
            X,
        }
    }

    pub fn angle(&self) -> N {
        self.x[0]
    }

    pub fn rate(&self) -> N {
        self.x[1]
    }
}

/// A state estimator.
pub trait Estimator<N: RealField> {
    /// The estimator's estimate of the system's state.
    fn state(&self) -> Result<Vector2<N>>;
}

/// A Kalman filter (estimator).
///
/// The linear Kalman state representation x,X is used to represent the system.
pub trait KalmanEstimator<N: RealField>: Estimator<N> {
    /// Initialise the estimator with a KalmanState.
    ///
    /// Return: the reciprocal condition number of the state covariance
    fn init(&mut self, state: &KalmanState<N>) -> Result<N>;

    /// The estimator's estimate of the system's KalmanState.
    fn kalman_state(&self) -> Result<(N, KalmanState<N>)>;
}

/// A linear predictor.
///
/// Uses a Linear model. The covariance `propagated` is transformed by the model and the running
/// covariance is added to it.
pub trait LinearPredictor<N: RealField> {
    /// State prediction with a linear prediction model.
    fn predict(
        &mut self,
        pred: &LinearPredictModel<N>,
        x_pred: Vector2<N>,
        propagated: &CorrelatedNoise<N, U2>,
    ) -> Result<()>;
}

/// A wrapped observer.
///
/// Uses a linear observation model of the angle with additive observation noise. The innovation
/// is on the circle, it must already be resolved against the wrap ambiguity.
pub trait WrappedObserver<N: RealField> {
    fn observe_innovation(
        &mut self,
        obs: &LinearObserveModel<N>,
        noise: &CorrelatedNoise<N, U1>,
        s: N,
    ) -> Result<()>;
}

/// Linear prediction model.
///
/// Prediction is represented by a state transition matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct LinearPredictModel<N: RealField> {
    /// State tramsition matrix
    pub Fx: Matrix2<N>,
}

impl<N: RealField> LinearPredictModel<N> {
    /// Constant angular rate kinematics over time step dt.
    pub fn constant_rate(dt: N) -> LinearPredictModel<N> {
        LinearPredictModel {
            Fx: Matrix2::new(N::one(), dt, N::zero(), N::one()),
        }
    }
}

/// Linear observation model.
///
/// Observation is represented by an observation matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct LinearObserveModel<N: RealField> {
    /// Observation matrix
    pub Hx: Matrix1x2<N>,
}

impl<N: RealField> LinearObserveModel<N> {
    /// Observe the angle.
    pub fn angle() -> LinearObserveModel<N> {
        LinearObserveModel {
            Hx: Matrix1x2::new(N::one(), N::zero()),
        }
    }
}
