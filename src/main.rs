//! Orrery - Floating-Origin Orbital Hierarchy Simulator
//!
//! A headless demo binary: builds the preset star system, runs the
//! simulation loop at an accelerated clock rate, and periodically logs
//! camera-relative body positions.

use bevy::prelude::*;

use orrery::floating_origin::{FloatingOriginPlugin, FloatingPosition};
use orrery::orbit::OrbitalPhysicsPlugin;
use orrery::render::{FloatingOriginCamera, RenderSyncPlugin};
use orrery::scene::{self, presets};
use orrery::time::TimePlugin;
use orrery::types::{BodyName, SECONDS_PER_DAY, UniversalTime};

fn main() {
    App::new()
        .add_plugins((
            // Headless: no window, a plain 60 Hz runner and log output.
            MinimalPlugins.set(bevy::app::ScheduleRunnerPlugin::run_loop(
                std::time::Duration::from_secs_f64(1.0 / 60.0),
            )),
            bevy::log::LogPlugin::default(),
        ))
        .add_plugins((
            TimePlugin,
            OrbitalPhysicsPlugin,
            FloatingOriginPlugin,
            RenderSyncPlugin,
        ))
        .add_systems(Startup, setup_demo_scene)
        .add_systems(Update, report_positions)
        .run();
}

/// Build the preset system, place the camera at the star, and speed the
/// clock up so orbital motion is visible in the log.
fn setup_demo_scene(world: &mut World) {
    match scene::build_scene(world, &presets::demo_system()) {
        Ok(summary) => {
            if !summary.rejected.is_empty() {
                warn!("{} bodies were rejected", summary.rejected.len());
            }
        }
        Err(err) => {
            error!("Failed to build demo scene: {err}");
            return;
        }
    }

    // One simulated week per real second.
    world.resource_mut::<UniversalTime>().rate = 7.0 * SECONDS_PER_DAY;

    world.spawn((FloatingOriginCamera, FloatingPosition::default()));
}

/// Log camera-relative positions a few times per minute.
fn report_positions(
    mut frames: Local<u32>,
    time: Res<UniversalTime>,
    camera: Query<&FloatingPosition, With<FloatingOriginCamera>>,
    bodies: Query<(&BodyName, &FloatingPosition), Without<FloatingOriginCamera>>,
) {
    *frames += 1;
    if *frames % 600 != 1 {
        return;
    }

    let Ok(camera_fp) = camera.single() else {
        return;
    };

    info!("t = {:.1} days", time.days());
    for (name, fp) in bodies.iter() {
        let rel = fp.relative_to(camera_fp);
        info!(
            "  {:<24} x = {:>14.0} m  y = {:>14.0} m  z = {:>14.0} m",
            name.0, rel.x, rel.y, rel.z
        );
    }
}
