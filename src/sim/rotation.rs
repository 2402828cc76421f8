//! Torque-driven rotation about the origin
//!
//! Forward-Euler integration of `alpha = M / Izz` with a hard angular
//! velocity cap. Every shape rotates about the coordinate origin, so the
//! relevant inertia is the polar moment about the origin, not the centroid.
//! Good enough for a pedagogical animation given the bounded time step.

use serde::{Deserialize, Serialize};

use crate::consts::{INERTIA_EPSILON, MAX_ANGULAR_SPEED};

/// Rotation state of one shape
///
/// `angle` wraps freely; nothing downstream needs it normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spin {
    /// Accumulated rotation (radians)
    pub angle: f64,
    /// Angular velocity (rad/s), clamped to the safety cap
    pub omega: f64,
}

impl Spin {
    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.omega = 0.0;
    }

    /// True while the velocity clamp is pinning omega
    pub fn at_limit(&self) -> bool {
        self.omega.abs() >= MAX_ANGULAR_SPEED - 1e-6
    }
}

/// Angular acceleration from an applied moment, or `None` when the shape
/// has no usable inertia (degenerate or missing polygon)
pub fn angular_acceleration(moment: f64, iz_origin: f64) -> Option<f64> {
    if iz_origin <= INERTIA_EPSILON {
        return None;
    }
    Some(moment / iz_origin)
}

/// Advance one tick: integrate omega, clamp, then integrate the angle
///
/// `dt` must already be clamped by the frame clock; all shapes in a tick
/// share the same sample so their rotations stay comparable.
pub fn step(spin: &mut Spin, alpha: f64, dt: f64) {
    spin.omega = (spin.omega + alpha * dt).clamp(-MAX_ANGULAR_SPEED, MAX_ANGULAR_SPEED);
    spin.angle += spin.omega * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_moment_is_inert() {
        let mut spin = Spin::default();
        let alpha = angular_acceleration(0.0, 2.5).unwrap();
        for _ in 0..1000 {
            step(&mut spin, alpha, 0.016);
        }
        assert_eq!(spin.omega, 0.0);
        assert_eq!(spin.angle, 0.0);
    }

    #[test]
    fn test_not_ready_below_epsilon() {
        assert!(angular_acceleration(3.0, 0.0).is_none());
        assert!(angular_acceleration(3.0, 1e-10).is_none());
        assert!(angular_acceleration(3.0, 1e-8).is_some());
    }

    #[test]
    fn test_constant_moment_accelerates() {
        let mut spin = Spin::default();
        let alpha = angular_acceleration(2.0, 4.0).unwrap();
        assert!((alpha - 0.5).abs() < 1e-12);

        step(&mut spin, alpha, 0.05);
        assert!((spin.omega - 0.025).abs() < 1e-12);
        assert!((spin.angle - 0.025 * 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_omega_clamps_at_cap() {
        let mut spin = Spin::default();
        for _ in 0..100_000 {
            step(&mut spin, 50.0, 0.05);
            assert!(spin.omega.abs() <= MAX_ANGULAR_SPEED);
        }
        assert!(spin.at_limit());
        assert!((spin.omega - MAX_ANGULAR_SPEED).abs() < 1e-9);

        // Same in the negative direction
        spin.reset();
        for _ in 0..100_000 {
            step(&mut spin, -50.0, 0.05);
        }
        assert!((spin.omega + MAX_ANGULAR_SPEED).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_omega_monotone_under_constant_positive_moment(
            alpha in 0.01..100.0f64,
            dt in 0.001..0.05f64,
        ) {
            let mut spin = Spin::default();
            let mut prev = spin.omega;
            for _ in 0..500 {
                step(&mut spin, alpha, dt);
                prop_assert!(spin.omega >= prev);
                prop_assert!(spin.omega <= MAX_ANGULAR_SPEED);
                prev = spin.omega;
            }
        }
    }
}
