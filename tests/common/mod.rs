//! Common test utilities for integration tests.

use bevy::prelude::*;

use orrery::floating_origin::FloatingOriginPlugin;
use orrery::orbit::OrbitalPhysicsPlugin;
use orrery::scene::{self, BodyDescriptor, OrbitDescriptor, SceneSummary};
use orrery::time::TimePlugin;
use orrery::types::UniversalTime;

/// A headless app with the full simulation tick installed.
pub fn sim_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins((TimePlugin, OrbitalPhysicsPlugin, FloatingOriginPlugin));
    app
}

/// Build a scene into the app's world.
pub fn build_bodies(app: &mut App, bodies: &[BodyDescriptor]) -> SceneSummary {
    scene::build_scene(app.world_mut(), bodies).expect("scene should build")
}

/// Pin the universal clock to an exact time value (and pause it so the
/// frame-delta advancement cannot smear the assertion).
pub fn set_time(app: &mut App, seconds: f64) {
    let mut time = app.world_mut().resource_mut::<UniversalTime>();
    time.paused = true;
    time.current = seconds;
}

/// The three-body reference scenario: a fixed star and a planet on a
/// mildly eccentric orbit. (Tests attach further bodies as needed.)
pub fn star_and_planet() -> Vec<BodyDescriptor> {
    vec![
        BodyDescriptor::fixed(
            "star",
            "Star",
            1.989e30,
            6.96e8,
            bevy::math::DVec3::ZERO,
        ),
        BodyDescriptor::orbiting(
            "planet",
            "Planet",
            "star",
            5.97e24,
            6.37e6,
            OrbitDescriptor {
                semi_major_axis: 1.0e11,
                eccentricity: 0.1,
                inclination_deg: 0.0,
                longitude_of_ascending_node_deg: 0.0,
                argument_of_periapsis_deg: 0.0,
                mean_anomaly_at_epoch_deg: 40.0,
            },
        ),
    ]
}
