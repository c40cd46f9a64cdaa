//! Built-in demo star system.
//!
//! A small fictional system exercising every body kind the simulation
//! supports: a fixed star, two planets on inclined elliptical orbits, a
//! moon orbiting a planet, and surface points of interest.

use bevy::math::DVec3;

use super::{BodyDescriptor, OrbitDescriptor};
use crate::types::AU_TO_METERS;

/// Mass of the central star (kg), solar-like.
const ALTAEA_MASS: f64 = 1.989e30;

/// The demo system body set.
pub fn demo_system() -> Vec<BodyDescriptor> {
    vec![
        BodyDescriptor::fixed("altaea", "Altaea", ALTAEA_MASS, 6.96e8, DVec3::ZERO),
        BodyDescriptor::orbiting(
            "veridia",
            "Veridia",
            "altaea",
            5.97e24,
            6.371e6,
            OrbitDescriptor {
                semi_major_axis: 1.0 * AU_TO_METERS,
                eccentricity: 0.0167,
                inclination_deg: 0.0,
                longitude_of_ascending_node_deg: 0.0,
                argument_of_periapsis_deg: 102.9,
                mean_anomaly_at_epoch_deg: 357.5,
            },
        )
        .with_point_of_interest("veridia-landing-site", 12.5, -30.0)
        .with_point_of_interest("veridia-relay-station", 0.0, 145.0),
        BodyDescriptor::orbiting(
            "cindra",
            "Cindra",
            "altaea",
            3.3e23,
            2.44e6,
            OrbitDescriptor {
                semi_major_axis: 0.39 * AU_TO_METERS,
                eccentricity: 0.2056,
                inclination_deg: 7.0,
                longitude_of_ascending_node_deg: 48.3,
                argument_of_periapsis_deg: 29.1,
                mean_anomaly_at_epoch_deg: 174.8,
            },
        ),
        BodyDescriptor::orbiting(
            "pell",
            "Pell",
            "veridia",
            7.35e22,
            1.737e6,
            OrbitDescriptor {
                semi_major_axis: 3.844e8,
                eccentricity: 0.0549,
                inclination_deg: 5.1,
                longitude_of_ascending_node_deg: 125.1,
                argument_of_periapsis_deg: 318.1,
                mean_anomaly_at_epoch_deg: 135.3,
            },
        ),
    ]
}
