//! Double-precision position arithmetic for the floating-origin model.
//!
//! Absolute positions at astronomical scale do not fit usefully in f32:
//! at 1e13 m from the origin, single precision quantizes to whole
//! kilometers. `FloatingPosition` keeps the absolute coordinate in f64 and
//! only ever produces f32 as a camera-relative offset, after the large
//! magnitudes have cancelled in double precision.

use bevy::math::{DQuat, DVec3, Vec3};
use bevy::prelude::*;

/// Absolute position and orientation of a body, in double precision.
///
/// Created once per body at scene construction, rewritten every tick by the
/// propagation and composition systems, and never destroyed during a
/// session. All arithmetic stays in f64; the only f32 conversion happens in
/// [`FloatingPosition::relative_to`], on an already-small difference.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct FloatingPosition {
    /// Absolute position in meters
    pub position: DVec3,
    /// Absolute orientation
    pub rotation: DQuat,
}

impl Default for FloatingPosition {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl FloatingPosition {
    /// Create a floating position equal to the given absolute coordinate,
    /// with identity orientation. Exact: no error relative to the input.
    pub fn from_world(position: DVec3) -> Self {
        Self {
            position,
            rotation: DQuat::IDENTITY,
        }
    }

    /// Create a floating position with an explicit orientation.
    pub fn with_rotation(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Translate by a local offset, entirely in double precision.
    ///
    /// The result represents `self.position + offset` and keeps `self`'s
    /// orientation. Error is bounded by f64 rounding regardless of the
    /// magnitude of `self.position`.
    pub fn add(&self, offset: DVec3) -> Self {
        Self {
            position: self.position + offset,
            rotation: self.rotation,
        }
    }

    /// Camera-relative offset in single precision.
    ///
    /// The subtraction runs in f64 first, so the result stays meter-accurate
    /// near the camera no matter how far both positions are from the nominal
    /// origin. This is the input contract of the render collaborator.
    pub fn relative_to(&self, camera: &FloatingPosition) -> Vec3 {
        (self.position - camera.position).as_vec3()
    }

    /// Distance to another floating position, in meters (f64 throughout).
    pub fn distance(&self, other: &FloatingPosition) -> f64 {
        self.position.distance(other.position)
    }
}
