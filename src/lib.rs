//!
//! Wrapped Estimate, Kalman filtering of bearings on the unit circle.
//! Copyright (c) 2020 Michael Stevens
//!
//! A bearing is an angle; measurements of it wrap modulo 2pi. A linear Kalman filter applied directly to
//! such measurements fails whenever the bearing crosses the +-pi boundary: a measurement near +pi and a
//! prediction near -pi appear maximally different although they are physically adjacent.
//!
//! The wrapped Kalman filter estimates the angle and angular rate of a bearing. For each measurement it
//! considers the replicas y + 2.pi.l of the measurement, weights their innovations by their likelihood
//! under the prediction, and corrects the state with the weighted innovation.
//!
//! State representations are defined by structs. Estimation operations are defined by traits which the
//! estimators implement for their state representation.
//!
//! # Licensing
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction,
//! including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software,
//! and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NON INFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY,
//! WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

pub mod angle;
pub mod config;
pub mod error;
pub mod estimators;
pub mod history;
pub mod linalg;
pub mod models;
pub mod noise;

pub use angle::wrap;
pub use config::{HistoryRetention, WrappedKalmanConfig};
pub use error::{FilterError, Result};
pub use estimators::wrapped::WrappedKalman;
