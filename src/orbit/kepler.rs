//! Closed-form Kepler orbit math.
//!
//! Position along an orbit is a pure function of the universal time: mean
//! anomaly advances linearly, Kepler's equation is solved by Newton's
//! method for the eccentric anomaly, and the perifocal position is rotated
//! into the parent's reference frame. No state is integrated, so there is
//! no time-step drift and rewinding the clock is exact.
//! All angular values in radians, distances in meters, time in seconds.

use std::f64::consts::TAU;

use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;

use crate::types::{DEG_TO_RAD, G};

/// Newton iteration stops once the step falls below this (radians).
const NEWTON_TOLERANCE: f64 = 1e-12;

/// Iteration cap guaranteeing termination for any input.
const NEWTON_MAX_ITERATIONS: u32 = 50;

/// Immutable orbital shape of a body. Built once at scene construction and
/// never mutated: the orbit of a body does not change in this simulation.
#[derive(Component, Clone, Debug)]
pub struct KeplerElements {
    /// Semi-major axis in meters
    pub semi_major_axis: f64,
    /// Eccentricity (dimensionless, 0 ≤ e < 1; validated at load)
    pub eccentricity: f64,
    /// Inclination against the reference plane in radians
    pub inclination: f64,
    /// Longitude of the ascending node in radians
    pub longitude_of_ascending_node: f64,
    /// Argument of periapsis in radians
    pub argument_of_periapsis: f64,
    /// Orbital period in seconds, derived once via Kepler's third law
    pub orbital_period: f64,
}

impl KeplerElements {
    /// Build elements from source-data angles in degrees, deriving the
    /// orbital period from the semi-major axis and the parent's mass.
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        longitude_of_ascending_node_deg: f64,
        argument_of_periapsis_deg: f64,
        parent_mass: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination: inclination_deg * DEG_TO_RAD,
            longitude_of_ascending_node: longitude_of_ascending_node_deg * DEG_TO_RAD,
            argument_of_periapsis: argument_of_periapsis_deg * DEG_TO_RAD,
            orbital_period: orbital_period_seconds(semi_major_axis, parent_mass),
        }
    }

    /// Mean motion in radians per second.
    pub fn mean_motion(&self) -> f64 {
        TAU / self.orbital_period
    }

    /// Rotation from the perifocal (orbital-plane) frame into the parent's
    /// reference frame: argument of periapsis, then inclination, then
    /// ascending node.
    pub fn perifocal_to_parent(&self) -> DQuat {
        DQuat::from_rotation_z(self.longitude_of_ascending_node)
            * DQuat::from_rotation_x(self.inclination)
            * DQuat::from_rotation_z(self.argument_of_periapsis)
    }

    /// Parent-relative Cartesian position for a solved eccentric anomaly.
    pub fn position_from_eccentric_anomaly(&self, eccentric_anomaly: f64) -> DVec3 {
        let true_anomaly = eccentric_to_true_anomaly(eccentric_anomaly, self.eccentricity);
        let radius = orbital_radius(self.semi_major_axis, self.eccentricity, eccentric_anomaly);

        let perifocal = DVec3::new(
            radius * true_anomaly.cos(),
            radius * true_anomaly.sin(),
            0.0,
        );

        self.perifocal_to_parent() * perifocal
    }

    /// Parent-relative Cartesian position for a mean anomaly. Convenience
    /// wrapper; callers that care about solver convergence solve first.
    pub fn position_at_mean_anomaly(&self, mean_anomaly: f64) -> DVec3 {
        let solution = solve_eccentric_anomaly(mean_anomaly, self.eccentricity);
        self.position_from_eccentric_anomaly(solution.eccentric_anomaly)
    }
}

/// Orbital period from Kepler's third law: `T = 2π·sqrt(a³ / (G·M))`.
///
/// Callers must not pass a non-positive parent mass; scene validation
/// rejects such bodies before this is ever reached.
pub fn orbital_period_seconds(semi_major_axis: f64, parent_mass: f64) -> f64 {
    TAU * (semi_major_axis.powi(3) / (G * parent_mass)).sqrt()
}

/// Mean anomaly at a given universal time, wrapped into `[0, 2π)`.
///
/// Pure function of its three inputs: idempotent and replayable for any
/// time value, forward or backward.
pub fn mean_anomaly_at_time(mean_anomaly_at_epoch: f64, period: f64, universal_time: f64) -> f64 {
    (mean_anomaly_at_epoch + TAU * (universal_time / period)).rem_euclid(TAU)
}

/// Result of solving Kepler's equation.
#[derive(Clone, Copy, Debug)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians (best available estimate)
    pub eccentric_anomaly: f64,
    /// Whether the Newton iteration reached tolerance before the cap
    pub converged: bool,
    /// Iterations actually spent
    pub iterations: u32,
}

/// Solve Kepler's equation `M = E - e·sin(E)` for the eccentric anomaly
/// using Newton's method.
///
/// Converges in a handful of iterations for any `0 ≤ e < 1` encountered in
/// practice. If the cap is hit the best estimate is returned with
/// `converged: false` rather than failing: a slightly stale anomaly is
/// preferable to a missing body, and only corrupted input gets here.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    // Normalize mean anomaly to [0, 2π)
    let m = mean_anomaly.rem_euclid(TAU);

    // Initial guess: E = M for low eccentricity, π for high e
    let mut eccentric_anomaly = if eccentricity < 0.8 {
        m
    } else {
        std::f64::consts::PI
    };

    let mut iterations = 0;
    let mut converged = false;

    while iterations < NEWTON_MAX_ITERATIONS {
        iterations += 1;

        // f(E) = E - e*sin(E) - M ; f'(E) = 1 - e*cos(E)
        let f = eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - m;
        let f_prime = 1.0 - eccentricity * eccentric_anomaly.cos();

        let delta = f / f_prime;
        eccentric_anomaly -= delta;

        if delta.abs() < NEWTON_TOLERANCE {
            converged = true;
            break;
        }
    }

    KeplerSolution {
        eccentric_anomaly,
        converged,
        iterations,
    }
}

/// True anomaly from eccentric anomaly.
///
/// Uses atan2 for full quadrant coverage:
/// `ν = 2·atan2(sqrt(1+e)·sin(E/2), sqrt(1-e)·cos(E/2))`
pub fn eccentric_to_true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half_e = eccentric_anomaly / 2.0;
    let y = (1.0 + eccentricity).sqrt() * half_e.sin();
    let x = (1.0 - eccentricity).sqrt() * half_e.cos();
    2.0 * y.atan2(x)
}

/// Distance from the focus for a given eccentric anomaly.
pub fn orbital_radius(semi_major_axis: f64, eccentricity: f64, eccentric_anomaly: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}
