//! Time advancement for the universal simulation clock.
//!
//! Handles progression of universal time based on the rate modifier and
//! pause flag. All propagation systems treat the clock as read-only; this
//! is the only place it advances.

use bevy::prelude::*;

use crate::types::{SimulationSet, UniversalTime};

/// Plugin providing universal clock advancement.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UniversalTime>().add_systems(
            Update,
            advance_universal_time.in_set(SimulationSet::AdvanceClock),
        );
        app.configure_sets(
            Update,
            (
                SimulationSet::AdvanceClock,
                SimulationSet::EvolveOrbits,
                SimulationSet::PlaceOrbits,
                SimulationSet::ComposeAttachments,
            )
                .chain(),
        );
    }
}

/// Advance universal time by elapsed real time scaled by the rate modifier.
///
/// Runs before any propagation so every system in the tick observes one
/// consistent time value.
fn advance_universal_time(mut universal: ResMut<UniversalTime>, time: Res<Time>) {
    advance(&mut universal, time.delta_secs_f64());
}

/// Apply one advancement step to the clock. No-op while paused.
pub fn advance(universal: &mut UniversalTime, real_dt: f64) {
    if universal.paused {
        return;
    }

    universal.current += real_dt * universal.rate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_applies_rate() {
        let mut time = UniversalTime::default();
        time.rate = 100.0;
        advance(&mut time, 0.5);
        assert_eq!(time.current, 50.0);
    }

    #[test]
    fn test_advance_respects_pause() {
        let mut time = UniversalTime::default();
        time.paused = true;
        advance(&mut time, 10.0);
        assert_eq!(time.current, 0.0, "Paused clock must not advance");
    }

    #[test]
    fn test_advance_accumulates() {
        let mut time = UniversalTime::at_seconds(100.0);
        advance(&mut time, 1.0);
        advance(&mut time, 2.0);
        assert_eq!(time.current, 103.0);
    }

    #[test]
    fn test_negative_rate_rewinds() {
        let mut time = UniversalTime::at_seconds(100.0);
        time.rate = -10.0;
        advance(&mut time, 1.0);
        assert_eq!(time.current, 90.0);
    }
}
