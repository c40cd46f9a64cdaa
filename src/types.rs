//! Core types and constants for the orbital hierarchy simulation.

use bevy::prelude::*;

/// System sets ordering one simulation tick.
///
/// The clock advances first, then every orbiting body's anomaly is
/// recomputed, then orbiting bodies are placed parent-before-child, and
/// finally fixed-offset attachments are composed against the placed bodies.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Universal clock advancement (runs first)
    AdvanceClock,
    /// Mean anomaly recomputation for all orbiting bodies
    EvolveOrbits,
    /// Orbital elements → floating position, in update order
    PlaceOrbits,
    /// Fixed-offset attachment composition (runs last)
    ComposeAttachments,
}

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Astronomical unit in meters
pub const AU_TO_METERS: f64 = 1.495978707e11;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Mass of a body in kilograms. Immutable after scene construction.
#[derive(Component, Clone, Copy, Debug)]
pub struct Mass(pub f64);

/// Equatorial radius of a body in meters.
#[derive(Component, Clone, Copy, Debug)]
pub struct BodyRadius(pub f64);

/// Stable string identifier a body was declared with.
#[derive(Component, Clone, Debug)]
pub struct BodyName(pub String);

/// The shared simulation clock every orbiting body is evaluated against.
///
/// Mutated only by the time-advance system (or an external time-control
/// surface); read-only from the perspective of all propagation systems.
/// Propagation is a pure function of `current`, so rewinding the clock is
/// safe and reproduces the exact orbital phase for that time.
#[derive(Resource, Clone, Debug)]
pub struct UniversalTime {
    /// Current simulation time in seconds
    pub current: f64,
    /// Rate modifier: simulation seconds per elapsed real second
    pub rate: f64,
    /// Whether advancement is suppressed
    pub paused: bool,
    /// Initial time for reset functionality
    pub initial: f64,
}

impl Default for UniversalTime {
    fn default() -> Self {
        Self {
            current: 0.0,
            rate: 1.0,
            paused: false,
            initial: 0.0,
        }
    }
}

impl UniversalTime {
    /// Create a clock starting at a specific time value
    pub fn at_seconds(seconds: f64) -> Self {
        Self {
            current: seconds,
            rate: 1.0,
            paused: false,
            initial: seconds,
        }
    }

    /// Reset to initial time
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.paused = true;
    }

    /// Current time in days
    pub fn days(&self) -> f64 {
        self.current / SECONDS_PER_DAY
    }
}
