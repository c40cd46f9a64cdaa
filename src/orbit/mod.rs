//! Analytic orbit propagation.
//!
//! Every orbiting body carries immutable [`KeplerElements`] and a mutable
//! [`MeanAnomaly`]. Each tick the anomaly is recomputed from the universal
//! clock (data-parallel, every body writes only its own state), then bodies
//! are placed relative to their parents in update order so a child always
//! reads a parent position already committed for this tick. Bodies without
//! a parent skip propagation entirely and keep a fixed floating position.

pub mod kepler;

#[cfg(test)]
mod proptest_orbit;

pub use kepler::{KeplerElements, KeplerSolution};

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::floating_origin::FloatingPosition;
use crate::hierarchy::UpdateOrder;
use crate::types::{SimulationSet, UniversalTime};

/// Mutable orbital phase of a body.
#[derive(Component, Clone, Copy, Debug)]
pub struct MeanAnomaly {
    /// Mean anomaly at the simulation epoch in radians (fixed at load)
    pub at_epoch: f64,
    /// Current mean anomaly in radians, recomputed every tick
    pub current: f64,
}

impl MeanAnomaly {
    /// Start a body at its epoch phase.
    pub fn from_epoch(radians: f64) -> Self {
        Self {
            at_epoch: radians,
            current: radians,
        }
    }
}

/// Back-reference to the body being orbited.
///
/// The parent's mass is cached here at scene construction rather than
/// looked up live: mass is immutable, and the cache keeps the per-tick
/// path free of registry lookups.
#[derive(Component, Clone, Copy, Debug)]
pub struct OrbitParent {
    /// Parent body entity
    pub entity: Entity,
    /// Parent mass in kilograms
    pub mass: f64,
}

/// Plugin providing per-tick orbit evolution and placement.
pub struct OrbitalPhysicsPlugin;

impl Plugin for OrbitalPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                evolve_orbits.in_set(SimulationSet::EvolveOrbits),
                place_orbiting_bodies.in_set(SimulationSet::PlaceOrbits),
            ),
        );
        app.configure_sets(
            Update,
            (SimulationSet::EvolveOrbits, SimulationSet::PlaceOrbits).chain(),
        );
    }
}

/// Recompute every orbiting body's mean anomaly from the shared clock.
///
/// Data-parallel: each body reads the immutable clock value and writes only
/// its own anomaly, so bodies evaluate concurrently without locking.
pub fn evolve_orbits(
    time: Res<UniversalTime>,
    mut orbiters: Query<(&KeplerElements, &mut MeanAnomaly)>,
) {
    let now = time.current;

    orbiters.par_iter_mut().for_each(|(elements, mut anomaly)| {
        anomaly.current =
            kepler::mean_anomaly_at_time(anomaly.at_epoch, elements.orbital_period, now);
    });
}

/// Convert each orbiting body's anomaly into an absolute floating position.
///
/// Bodies are processed rank by rank (parents strictly before children, as
/// assigned by the hierarchy resolver): within a rank all new positions are
/// staged against the committed state, then written back before the next
/// rank runs. A child therefore always sees its parent's position for
/// *this* tick, while bodies within one rank see a consistent snapshot.
pub fn place_orbiting_bodies(
    mut staged: Local<Vec<(Entity, DVec3)>>,
    orbiters: Query<(
        Entity,
        &KeplerElements,
        &MeanAnomaly,
        &OrbitParent,
        &UpdateOrder,
    )>,
    mut positions: Query<&mut FloatingPosition>,
) {
    let Some(max_rank) = orbiters.iter().map(|(_, _, _, _, order)| order.0).max() else {
        return;
    };

    // Orbiting bodies always rank at least 1; rank 0 roots are fixed.
    for rank in 1..=max_rank {
        staged.clear();

        for (entity, elements, anomaly, parent, order) in orbiters.iter() {
            if order.0 != rank {
                continue;
            }

            let Ok(parent_fp) = positions.get(parent.entity) else {
                warn_once!(
                    "Orbiting body {:?} has no parent floating position; skipping",
                    entity
                );
                continue;
            };

            let solution = kepler::solve_eccentric_anomaly(anomaly.current, elements.eccentricity);
            if !solution.converged {
                warn_once!(
                    "Kepler solver hit the iteration cap for body {:?} (e = {}); using best estimate",
                    entity,
                    elements.eccentricity
                );
            }

            let offset = elements.position_from_eccentric_anomaly(solution.eccentric_anomaly);
            staged.push((entity, parent_fp.add(offset).position));
        }

        for (entity, position) in staged.drain(..) {
            if let Ok(mut fp) = positions.get_mut(entity) {
                // Placement moves the body; its own orientation is not
                // derived from the orbit.
                fp.position = position;
            }
        }
    }
}
