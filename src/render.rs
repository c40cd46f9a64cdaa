//! Projection of floating positions into camera-relative render transforms.
//!
//! The rendering side of the engine consumes ordinary single-precision
//! `Transform`s. Every frame, after propagation and composition have
//! settled, each body's double-precision position is subtracted from the
//! camera's in f64 and only the small camera-relative remainder is
//! converted to f32. What gets drawn with those transforms is someone
//! else's business.

use bevy::prelude::*;

use crate::floating_origin::FloatingPosition;

/// Marks the entity whose floating position defines the render origin.
#[derive(Component, Default, Debug)]
pub struct FloatingOriginCamera;

/// Plugin wiring the projection into the frame, after simulation settles.
pub struct RenderSyncPlugin;

impl Plugin for RenderSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, project_render_transforms);
    }
}

/// Write each body's camera-relative transform.
///
/// Requires exactly one [`FloatingOriginCamera`]; does nothing (once,
/// loudly) otherwise.
pub fn project_render_transforms(
    camera: Query<&FloatingPosition, With<FloatingOriginCamera>>,
    mut bodies: Query<(&FloatingPosition, &mut Transform), Without<FloatingOriginCamera>>,
) {
    let Ok(camera_fp) = camera.single() else {
        warn_once!("Render projection needs exactly one FloatingOriginCamera");
        return;
    };

    for (fp, mut transform) in bodies.iter_mut() {
        transform.translation = fp.relative_to(camera_fp);
        transform.rotation = fp.rotation.as_quat();
    }
}
