#![allow(non_snake_case)]

//! Covariance state estimation.
//!
//! A discrete Bayesian estimator that uses a Kalman state representation [`KalmanState`] of the system for estimation.
//! The Kalman state is simply the x,X pair, the angle and angular rate and their covariance.
//!
//! Prediction propagates a constant covariance through the transition and accumulates the running
//! covariance X onto it. The correction then replaces X by the posterior covariance.
//!
//! The angle of the state is kept wrapped to (-pi, pi] after every operation.
//!
//! [`KalmanState`]: ../../models/struct.KalmanState.html

use na::{Matrix2, RealField, Vector2, U1, U2};
use nalgebra as na;

use crate::angle::wrap;
use crate::error::{report, FilterError, Result};
use crate::linalg::check_covariance;
use crate::models::{
    Estimator, KalmanEstimator, KalmanState, LinearObserveModel, LinearPredictModel, LinearPredictor,
    WrappedObserver,
};
use crate::noise::CorrelatedNoise;

impl<N: RealField> Estimator<N> for KalmanState<N> {
    fn state(&self) -> Result<Vector2<N>> {
        Ok(self.x.clone())
    }
}

impl<N: RealField> KalmanEstimator<N> for KalmanState<N> {
    fn init(&mut self, state: &KalmanState<N>) -> Result<N> {
        let rcond = check_covariance(&state.X)?;
        self.x = state.x.clone();
        self.x[0] = wrap(self.x[0]);
        self.X = state.X.clone();

        Ok(rcond)
    }

    fn kalman_state(&self) -> Result<(N, KalmanState<N>)> {
        Ok((N::one(), self.clone()))
    }
}

impl<N: RealField> LinearPredictor<N> for KalmanState<N> {
    fn predict(
        &mut self,
        pred: &LinearPredictModel<N>,
        x_pred: Vector2<N>,
        propagated: &CorrelatedNoise<N, U2>,
    ) -> Result<()> {
        self.x = x_pred;
        self.x[0] = wrap(self.x[0]);
        // X = Fx.Q.Fx' + X
        self.X = &pred.Fx * &propagated.Q * pred.Fx.transpose() + &self.X;

        Ok(())
    }
}

impl<N: RealField> WrappedObserver<N> for KalmanState<N> {
    fn observe_innovation(
        &mut self,
        obs: &LinearObserveModel<N>,
        noise: &CorrelatedNoise<N, U1>,
        s: N,
    ) -> Result<()> {
        let XHt = &self.X * obs.Hx.transpose();
        // S = Hx.X.Hx' + R, scalar for an angle observation
        let S = (&obs.Hx * &XHt)[(0, 0)] + noise.variance();
        if !(S > N::zero()) || !S.is_finite() {
            return Err(FilterError::NumericalInstability {
                innovation_variance: report(S),
            });
        }

        // Kalman gain, X*Hx'*S^-1
        let W = &XHt / S;

        // State update
        self.x += &W * s;
        self.x[0] = wrap(self.x[0]);
        // X = (I - W.Hx).X
        self.X = (Matrix2::identity() - &W * &obs.Hx) * &self.X;

        Ok(())
    }
}
