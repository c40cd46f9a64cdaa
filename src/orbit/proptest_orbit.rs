//! Property-based tests for Kepler orbit math.
//!
//! These verify solver convergence, periodicity, and Kepler's third law
//! across wide input ranges rather than at hand-picked points.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::kepler::{
    self, KeplerElements, mean_anomaly_at_time, orbital_period_seconds, solve_eccentric_anomaly,
};
use crate::types::{AU_TO_METERS, G};

const SOLAR_MASS: f64 = 1.989e30;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The solver always converges for 0 ≤ e < 0.95 and satisfies
    /// M = E - e*sin(E).
    #[test]
    fn prop_solver_convergence(
        mean_anomaly_normalized in 0.0f64..1.0,
        eccentricity in 0.0f64..0.95,
    ) {
        let mean_anomaly = mean_anomaly_normalized * TAU;

        let solution = solve_eccentric_anomaly(mean_anomaly, eccentricity);
        prop_assert!(solution.converged, "No convergence: M={}, e={}", mean_anomaly, eccentricity);

        let m_check = solution.eccentric_anomaly - eccentricity * solution.eccentric_anomaly.sin();
        let error = (m_check - mean_anomaly.rem_euclid(TAU)).abs();
        prop_assert!(
            error < 1e-8,
            "Kepler equation violated: M={}, e={}, E={}, error={}",
            mean_anomaly, eccentricity, solution.eccentric_anomaly, error
        );
    }

    /// Derived period matches Kepler's third law.
    #[test]
    fn prop_period_matches_third_law(semi_major_axis_au in 0.3f64..50.0) {
        let a = semi_major_axis_au * AU_TO_METERS;
        let period = orbital_period_seconds(a, SOLAR_MASS);
        let expected = TAU * (a * a * a / (G * SOLAR_MASS)).sqrt();

        let error = ((period - expected) / expected).abs();
        prop_assert!(error < 1e-12);
    }

    /// Mean anomaly is periodic in the orbital period and always lands in
    /// [0, 2π).
    #[test]
    fn prop_mean_anomaly_periodic(
        epoch_anomaly in 0.0f64..TAU,
        period in 1.0e3f64..1.0e9,
        time in -1.0e10f64..1.0e10,
    ) {
        let m = mean_anomaly_at_time(epoch_anomaly, period, time);
        let m_next = mean_anomaly_at_time(epoch_anomaly, period, time + period);

        prop_assert!((0.0..TAU).contains(&m));
        // Wrap-around can put two mathematically equal phases on opposite
        // sides of the 0/2π seam.
        let diff = (m - m_next).abs();
        let diff = diff.min(TAU - diff);
        prop_assert!(diff < 1e-6, "Phase drifted over one period: {} vs {}", m, m_next);
    }

    /// Position returns to its starting point after one full period.
    #[test]
    fn prop_position_periodic(
        eccentricity in 0.0f64..0.6,
        start_time in 0.0f64..1.0e9,
    ) {
        let elements = KeplerElements::from_degrees(
            AU_TO_METERS,
            eccentricity,
            12.0,
            30.0,
            45.0,
            SOLAR_MASS,
        );

        let m1 = mean_anomaly_at_time(0.5, elements.orbital_period, start_time);
        let m2 = mean_anomaly_at_time(0.5, elements.orbital_period, start_time + elements.orbital_period);

        let p1 = elements.position_at_mean_anomaly(m1);
        let p2 = elements.position_at_mean_anomaly(m2);

        prop_assert!(
            p1.distance(p2) < 1000.0,
            "Position not periodic: {} m apart after one period",
            p1.distance(p2)
        );
    }

    /// Orbital radius stays within the periapsis/apoapsis bounds everywhere
    /// along the orbit.
    #[test]
    fn prop_radius_bounded(
        eccentricity in 0.0f64..0.95,
        mean_anomaly in 0.0f64..TAU,
    ) {
        let a = AU_TO_METERS;
        let solution = solve_eccentric_anomaly(mean_anomaly, eccentricity);
        let r = kepler::orbital_radius(a, eccentricity, solution.eccentric_anomaly);

        let periapsis = a * (1.0 - eccentricity);
        let apoapsis = a * (1.0 + eccentricity);
        prop_assert!(
            r >= periapsis * 0.999999 && r <= apoapsis * 1.000001,
            "Radius {} outside [{}, {}] for e={}, M={}",
            r, periapsis, apoapsis, eccentricity, mean_anomaly
        );
    }

    /// Position continuity: no jumps between adjacent time samples.
    #[test]
    fn prop_position_continuity(
        start_time in 0.0f64..1.0e9,
        eccentricity in 0.0f64..0.5,
    ) {
        let elements = KeplerElements::from_degrees(
            AU_TO_METERS,
            eccentricity,
            0.0,
            0.0,
            45.0,
            SOLAR_MASS,
        );

        let dt = 3600.0;
        let sample = |t: f64| {
            let m = mean_anomaly_at_time(0.0, elements.orbital_period, t);
            elements.position_at_mean_anomaly(m)
        };

        let p1 = sample(start_time);
        let p2 = sample(start_time + dt);
        let p3 = sample(start_time + 2.0 * dt);

        let v12 = p1.distance(p2) / dt;
        let v23 = p2.distance(p3) / dt;

        let v_change = (v23 - v12).abs() / (v12 + 1.0);
        prop_assert!(
            v_change < 0.1,
            "Velocity discontinuity: v12={}, v23={}",
            v12, v23
        );
    }
}
