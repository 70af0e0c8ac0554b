//! Wrap invariants of angles and filtered states.
//!
//! Properties are checked over seeded random angles and measurement sequences.

use std::f64::consts::PI;

use na::Matrix2;
use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use wrapped_estimate::{wrap, WrappedKalman};

const SEED: u64 = 0x5eed;

fn in_range(angle: f64) -> bool {
    angle > -PI && angle <= PI
}

#[test]
fn test_wrap_range_and_idempotence() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..10_000 {
        let x: f64 = rng.gen_range(-1000.0..1000.0);
        let w = wrap(x);
        assert!(in_range(w), "wrap({}) = {}", x, w);
        assert_eq!(wrap(w), w, "wrap not idempotent at {}", x);
    }
}

#[test]
fn test_wrap_periodic() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0..10_000 {
        // Keep clear of the boundary where rounding may choose either side
        let x: f64 = rng.gen_range(-PI + 1e-6..PI - 1e-6);
        let k: i32 = rng.gen_range(-50..50);
        let shifted = x + 2.0 * PI * f64::from(k);
        approx::assert_abs_diff_eq!(wrap(shifted), wrap(x), epsilon = 1e-9);
    }
}

#[test]
fn test_filtered_angles_stay_wrapped() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for l in 0..3 {
        let mut wk = WrappedKalman::with_options(
            rng.gen_range(-10.0..10.0),
            0.5,
            Matrix2::new(0.01, 0.0, 0.0, 0.001),
            0.3,
            l,
            rng.gen_range(-1.0..1.0),
        )
        .unwrap();
        for _ in 0..500 {
            // Measurements need not be wrapped
            let y: f64 = rng.gen_range(-20.0..20.0);
            wk.step(y).unwrap();
            assert!(in_range(wk.current_state().0));
        }
        assert_eq!(wk.prediction_history().len(), 501);
        assert!(wk.prediction_history().angles().all(in_range));
    }
}

/// Noisy bearing moving around the unit circle.
struct AzimuthSim {
    t: usize,
    noise: Normal<f64>,
}

impl AzimuthSim {
    fn new(sigma: f64) -> AzimuthSim {
        AzimuthSim {
            t: 0,
            noise: Normal::new(0.0, sigma).unwrap(),
        }
    }

    /// The (true, measured) bearing of the next time step.
    fn step<R: Rng>(&mut self, rng: &mut R) -> (f64, f64) {
        let theta = 2.0 * PI * (1.2 * PI * self.t as f64 / 200.0).cos();
        self.t += 1;
        (wrap(theta), wrap(theta + self.noise.sample(rng)))
    }
}

#[test]
fn test_azimuth_tracking_reduces_error() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sim = AzimuthSim::new(0.5);
        let mut wk = WrappedKalman::new(0.0, 1.0, Matrix2::new(0.01, 0.0, 0.0, 0.001), 0.5).unwrap();

        let mut filtered_sq = 0.0;
        let mut measured_sq = 0.0;
        for _ in 0..200 {
            let (truth, y) = sim.step(&mut rng);
            wk.step(y).unwrap();
            filtered_sq += wrap(wk.current_state().0 - truth).powi(2);
            measured_sq += wrap(y - truth).powi(2);
        }
        let filtered_rms = (filtered_sq / 200.0).sqrt();
        let measured_rms = (measured_sq / 200.0).sqrt();
        assert!(
            filtered_rms < 0.75 * measured_rms,
            "seed {}: filtered {} measured {}",
            seed,
            filtered_rms,
            measured_rms
        );
    }
}
