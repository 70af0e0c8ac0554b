//! Tracking a bearing moving around the unit circle.
//!
//! A wrapped Kalman filter with constant noises follows a noisy bearing that repeatedly crosses
//! the +-pi boundary. Run with `RUST_LOG=trace` to see each step.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use wrapped_estimate::{wrap, WrappedKalman, WrappedKalmanConfig};

const STEPS: usize = 200;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = WrappedKalmanConfig::new(0.0, 1.0, [[0.01, 0.0], [0.0, 0.001]], 0.5);
    let mut estimate: WrappedKalman<f64> = WrappedKalman::from_config(&config)?;
    println!("Initial x{:.3} X{:.4}", estimate.current_state().0, estimate.current_covariance());

    let mut rng = StdRng::seed_from_u64(1);
    let noise = Normal::new(0.0, 0.5)?;

    let mut actual = Vec::with_capacity(STEPS);
    let mut measured = Vec::with_capacity(STEPS);
    for t in 0..STEPS {
        let theta = 2.0 * PI * (1.2 * PI * t as f64 / 200.0).cos();
        let y = wrap(theta + noise.sample(&mut rng));
        estimate.step(y)?;
        actual.push(wrap(theta));
        measured.push(y);
    }

    let filtered: Vec<f64> = estimate.prediction_history().angles().skip(1).collect();
    println!("{:>4} {:>8} {:>8} {:>8}", "t", "true", "measure", "kalman");
    for t in (0..STEPS).step_by(10) {
        println!("{:>4} {:>8.3} {:>8.3} {:>8.3}", t, actual[t], measured[t], filtered[t]);
    }

    let rms = |xs: &[f64]| -> f64 {
        let sq: f64 = xs.iter().zip(actual.iter()).map(|(x, a)| wrap(x - a).powi(2)).sum();
        (sq / STEPS as f64).sqrt()
    };
    println!("RMS wrapped error: measure {:.3} kalman {:.3}", rms(&measured), rms(&filtered));
    println!("Final X{:.4}", estimate.current_covariance());
    Ok(())
}
