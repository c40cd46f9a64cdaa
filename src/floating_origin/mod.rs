//! Floating-origin coordinate model.
//!
//! Bodies live at astronomical distances from the nominal origin, so their
//! absolute positions are kept in double precision ([`FloatingPosition`])
//! and only projected to single precision relative to the camera (see
//! `render`). This module also owns parent-relative attachment: a body
//! declared with a [`FloatingPositionParent`] is a rigid offset from another
//! body's resolved floating position, recomposed every tick.

pub mod math;

#[cfg(test)]
mod proptest_floating;

pub use math::FloatingPosition;

use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;

use crate::types::SimulationSet;

/// How an attachment's orientation is derived during composition.
///
/// The default keeps the declared local rotation and ignores the parent's
/// spin entirely; composing with the parent's rotation is opt-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Overwrite with the declared local rotation every tick.
    #[default]
    KeepLocal,
    /// Rotate the declared local rotation by the parent's current rotation.
    ComposeWithParent,
}

/// Declares a body's position as a fixed local offset from another body's
/// floating position.
///
/// Distinct from orbital parenting: orbital children evolve along Kepler
/// elements, while attachments are static offsets from a moving parent
/// frame (surface features, stations, points of interest).
#[derive(Component, Clone, Debug)]
pub struct FloatingPositionParent {
    /// Body whose floating position anchors this one
    pub parent: Entity,
    /// Offset from the parent, in the parent's translation frame (meters)
    pub local_position: DVec3,
    /// Declared orientation of the attachment
    pub local_rotation: DQuat,
    /// Orientation handling during composition
    pub rotation_policy: RotationPolicy,
}

impl FloatingPositionParent {
    /// Attachment with the default rotation policy.
    pub fn new(parent: Entity, local_position: DVec3, local_rotation: DQuat) -> Self {
        Self {
            parent,
            local_position,
            local_rotation,
            rotation_policy: RotationPolicy::default(),
        }
    }
}

/// Plugin providing per-tick composition of parent-relative attachments.
pub struct FloatingOriginPlugin;

impl Plugin for FloatingOriginPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            compose_attached_positions.in_set(SimulationSet::ComposeAttachments),
        );
        app.configure_sets(
            Update,
            SimulationSet::ComposeAttachments.after(SimulationSet::PlaceOrbits),
        );
    }
}

/// Recompute every attachment's floating position from its parent's.
///
/// Two-phase tick: a read-only pass stages all composed values into a
/// buffer, then a commit pass writes them back. Readers of
/// `FloatingPosition` during the staging pass observe one consistent
/// snapshot and never a half-updated value; an attachment chained to
/// another attachment picks up its parent's previous-tick position.
pub fn compose_attached_positions(
    mut staged: Local<Vec<(Entity, FloatingPosition)>>,
    attachments: Query<(Entity, &FloatingPositionParent)>,
    mut positions: Query<&mut FloatingPosition>,
) {
    staged.clear();

    for (entity, attachment) in attachments.iter() {
        let Ok(parent_fp) = positions.get(attachment.parent) else {
            warn_once!(
                "Attachment {:?} references parent {:?} without a floating position",
                entity,
                attachment.parent
            );
            continue;
        };

        let mut composed = parent_fp.add(attachment.local_position);
        composed.rotation = match attachment.rotation_policy {
            RotationPolicy::KeepLocal => attachment.local_rotation,
            RotationPolicy::ComposeWithParent => parent_fp.rotation * attachment.local_rotation,
        };

        staged.push((entity, composed));
    }

    for (entity, composed) in staged.drain(..) {
        if let Ok(mut fp) = positions.get_mut(entity) {
            *fp = composed;
        }
    }
}
