//! Circular angle operations.
//!
//! Angles are wrapped into the interval (-pi, pi]. A measurement on the circle is ambiguous: the
//! true source of a measurement y may be any of y + 2.pi.l for integer l. The ambiguity is resolved
//! over a finite set of replicas l in {-L..L}, weighting the innovation of each replica by its
//! likelihood under the predicted angle.
//!
//! Reference: "A Wrapped Kalman Filter for Azimuthal Speaker Tracking",
//! J. Traa and P. Smaragdis, IEEE Signal Processing Letters 20(12), 2013.

use nalgebra as na;
use na::RealField;

use crate::error::{FilterError, Result};

/// Wrap an angle into (-pi, pi].
///
/// Equivalent to `((x + pi) mod 2pi) - pi` with the lower boundary mapped onto pi.
pub fn wrap<N: RealField>(x: N) -> N {
    let pi = N::pi();
    let two_pi = N::two_pi();
    let mut w = x - two_pi * ((x + pi) / two_pi).floor();
    // Rounding may leave w just outside the interval
    if w <= -pi {
        w += two_pi;
    } else if w > pi {
        w -= two_pi;
    }
    w
}

/// Normal probability density of a residual with the given variance.
pub fn normal_pdf<N: RealField>(residual: N, variance: N) -> N {
    let two: N = na::convert(2.0);
    (-(residual * residual) / (two * variance)).exp() / (N::two_pi() * variance).sqrt()
}

/// Largest replica half-width L accepted.
pub const MAX_HALF_WIDTH: u32 = 1024;

/// The set of wrap replicas {-L..L}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replicas {
    half_width: u32,
}

impl Replicas {
    pub fn new(half_width: u32) -> Result<Replicas> {
        if half_width > MAX_HALF_WIDTH {
            return Err(FilterError::InvalidReplicas(half_width));
        }
        Ok(Replicas { half_width })
    }

    pub fn half_width(&self) -> u32 {
        self.half_width
    }

    /// Number of replicas, 2L+1.
    pub fn len(&self) -> usize {
        2 * self.half_width as usize + 1
    }

    /// Never empty, the unwrapped measurement l=0 is always included.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Replica offsets in increasing order.
    pub fn offsets(&self) -> impl Iterator<Item = i64> {
        let l = i64::from(self.half_width);
        -l..=l
    }
}

impl Default for Replicas {
    fn default() -> Self {
        Replicas { half_width: 1 }
    }
}

/// Innovation resolved over the wrap replicas.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicaInnovation<N: RealField> {
    /// Probability weighted innovation
    pub innovation: N,
    /// Replica offsets l
    pub offsets: Vec<i64>,
    /// Innovation of each replica, y + 2.pi.l - predicted
    pub innovations: Vec<N>,
    /// Normalised probability of each replica
    pub probabilities: Vec<N>,
}

impl<N: RealField> ReplicaInnovation<N> {
    /// The replica offset with the highest probability.
    pub fn most_likely_offset(&self) -> i64 {
        self.probabilities
            .iter()
            .zip(self.offsets.iter())
            .fold(None, |best: Option<(N, i64)>, (&p, &l)| match best {
                Some((bp, _)) if !(p > bp) => best,
                _ => Some((p, l)),
            })
            .map_or(0, |(_, l)| l)
    }
}

/// Resolve the innovation of measurement `y` against the predicted angle.
///
/// The likelihood of each replica y + 2.pi.l is the normal density of its innovation. Likelihoods
/// are normalised over the replicas and the innovation is their probability weighted sum.
/// When every density underflows the weights are formed relative to the most likely replica.
pub fn resolve_innovation<N: RealField>(
    y: N,
    predicted: N,
    variance: N,
    replicas: &Replicas,
) -> Result<ReplicaInnovation<N>> {
    let two_pi = N::two_pi();
    let offsets: Vec<i64> = replicas.offsets().collect();
    let innovations: Vec<N> = offsets
        .iter()
        .map(|&l| y + two_pi * na::convert::<f64, N>(l as f64) - predicted)
        .collect();

    let mut probabilities: Vec<N> = innovations.iter().map(|&g| normal_pdf(g, variance)).collect();
    let mut total = probabilities.iter().fold(N::zero(), |acc, &p| acc + p);

    if !(total > N::zero()) || !total.is_finite() {
        // exp(-(g^2 - g_min^2) / 2var), the common factor cancels in normalisation
        let two: N = na::convert(2.0);
        let g2_min = innovations
            .iter()
            .map(|&g| g * g)
            .fold(innovations[0] * innovations[0], |acc, g2| if g2 < acc { g2 } else { acc });
        probabilities = innovations
            .iter()
            .map(|&g| (-(g * g - g2_min) / (two * variance)).exp())
            .collect();
        total = probabilities.iter().fold(N::zero(), |acc, &p| acc + p);
        if !(total > N::zero()) || !total.is_finite() {
            return Err(FilterError::DegenerateReplicas);
        }
    }

    for p in probabilities.iter_mut() {
        *p /= total;
    }
    let innovation = innovations
        .iter()
        .zip(probabilities.iter())
        .fold(N::zero(), |acc, (&g, &p)| acc + g * p);

    Ok(ReplicaInnovation {
        innovation,
        offsets,
        innovations,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn wrap_range() {
        for &x in &[0.0, 1.0, -1.0, PI, -PI, 3.0 * PI, -3.0 * PI, 7.5, -7.5, 1e6, -1e6] {
            let w = wrap(x);
            assert!(w > -PI && w <= PI, "wrap({}) = {}", x, w);
        }
    }

    #[test]
    fn wrap_boundary_maps_to_pi() {
        assert_eq!(wrap(PI), PI);
        assert_eq!(wrap(-PI), PI);
    }

    #[test]
    fn wrap_inside_is_identity() {
        for &x in &[0.0, 0.5, -0.5, 3.1, -3.1] {
            assert_eq!(wrap(x), x);
        }
    }

    #[test]
    fn pdf_peak() {
        approx::assert_relative_eq!(normal_pdf(0.0, 1.0), 1.0 / (2.0 * PI).sqrt(), max_relative = 1e-12);
        approx::assert_relative_eq!(normal_pdf(1.0, 1.0), (-0.5f64).exp() / (2.0 * PI).sqrt(), max_relative = 1e-12);
        assert!(normal_pdf(0.1, 0.5) > normal_pdf(0.2, 0.5));
    }

    #[test]
    fn replicas_offsets() {
        assert_eq!(Replicas::default().offsets().collect::<Vec<_>>(), vec![-1, 0, 1]);
        assert_eq!(Replicas::new(0).unwrap().offsets().collect::<Vec<_>>(), vec![0]);
        assert_eq!(Replicas::new(2).unwrap().len(), 5);
        assert_eq!(Replicas::new(MAX_HALF_WIDTH).unwrap().len(), 2 * MAX_HALF_WIDTH as usize + 1);
        assert_eq!(Replicas::new(MAX_HALF_WIDTH + 1), Err(FilterError::InvalidReplicas(MAX_HALF_WIDTH + 1)));
    }

    #[test]
    fn most_likely_offset_picks_first_maximum() {
        let r = ReplicaInnovation {
            innovation: 0.0,
            offsets: vec![-1, 0, 1],
            innovations: vec![-1.0, 0.0, 1.0],
            probabilities: vec![0.2, 0.4, 0.4],
        };
        assert_eq!(r.most_likely_offset(), 0);
        let r = ReplicaInnovation {
            probabilities: vec![0.5, 0.25, 0.25],
            ..r
        };
        assert_eq!(r.most_likely_offset(), -1);
    }

    #[test]
    fn innovation_near_prediction() {
        let r = resolve_innovation(0.05, 0.0, 0.5, &Replicas::default()).unwrap();
        approx::assert_abs_diff_eq!(r.innovation, 0.05, epsilon = 1e-12);
        assert_eq!(r.most_likely_offset(), 0);
        let sum: f64 = r.probabilities.iter().sum();
        approx::assert_relative_eq!(sum, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn innovation_across_boundary() {
        // 3.1 is physically adjacent to a prediction of -3.1
        let r = resolve_innovation(3.1, -3.1, 0.01, &Replicas::default()).unwrap();
        assert_eq!(r.most_likely_offset(), -1);
        approx::assert_abs_diff_eq!(r.innovation, 3.1 - 2.0 * PI + 3.1, epsilon = 1e-9);
    }

    #[test]
    fn innovation_ambiguous_blend() {
        // Equidistant from two replicas the innovations cancel
        let r = resolve_innovation(PI, 0.0, 0.5, &Replicas::default()).unwrap();
        approx::assert_abs_diff_eq!(r.innovation, 0.0, epsilon = 1e-9);
        approx::assert_relative_eq!(r.probabilities[0], r.probabilities[1], max_relative = 1e-9);
    }

    #[test]
    fn innovation_underflow_uses_relative_weights() {
        // Every replica density underflows, the nearest replica dominates
        let r = resolve_innovation(100.0, 0.0, 1e-3, &Replicas::default()).unwrap();
        assert_eq!(r.most_likely_offset(), -1);
        approx::assert_relative_eq!(r.innovation, 100.0 - 2.0 * PI, max_relative = 1e-12);
    }
}
