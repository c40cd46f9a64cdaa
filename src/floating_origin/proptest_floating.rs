//! Property-based tests for floating-origin arithmetic.
//!
//! The contract under test: composing offsets onto an astronomical-scale
//! base position must retain meter-level precision, and the camera-relative
//! projection must stay exact near the camera.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::math::FloatingPosition;

/// Absolute positions up to ~100 AU on every axis.
fn astronomical_position() -> impl Strategy<Value = DVec3> {
    let axis = -1.5e13f64..1.5e13;
    (axis.clone(), axis.clone(), axis).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

/// Human-scale offsets (meters).
fn local_offset() -> impl Strategy<Value = DVec3> {
    let axis = -1000.0f64..1000.0;
    (axis.clone(), axis.clone(), axis).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `p.add(a).add(b)` and `p.add(a + b)` agree to double precision even
    /// when `p` is tens of AU from the origin.
    #[test]
    fn prop_add_associative_at_scale(
        base in astronomical_position(),
        a in local_offset(),
        b in local_offset(),
    ) {
        let p = FloatingPosition::from_world(base);

        let stepped = p.add(a).add(b);
        let combined = p.add(a + b);

        let error = stepped.position.distance(combined.position);
        prop_assert!(
            error < 0.1,
            "Offset composition lost precision: error = {} m at |base| = {:.3e} m",
            error, base.length()
        );
    }

    /// Order of offsets does not matter.
    #[test]
    fn prop_add_commutative(
        base in astronomical_position(),
        a in local_offset(),
        b in local_offset(),
    ) {
        let p = FloatingPosition::from_world(base);

        let ab = p.add(a).add(b);
        let ba = p.add(b).add(a);

        prop_assert!(ab.position.distance(ba.position) < 0.1);
    }

    /// A meter-scale offset from the camera survives the f32 projection
    /// with sub-centimeter error, independent of absolute magnitude.
    #[test]
    fn prop_relative_to_precise_near_camera(
        camera_pos in astronomical_position(),
        offset in local_offset(),
    ) {
        let camera = FloatingPosition::from_world(camera_pos);
        let body = camera.add(offset);

        let rel = body.relative_to(&camera);
        let expected = offset.as_vec3();

        let error = (rel - expected).length() as f64;
        prop_assert!(
            error < 1e-2,
            "Render projection error {} m for offset {:?} at |camera| = {:.3e} m",
            error, offset, camera_pos.length()
        );
    }

    /// Round trip: initializing from a world position is exact.
    #[test]
    fn prop_from_world_exact(pos in astronomical_position()) {
        let fp = FloatingPosition::from_world(pos);
        prop_assert_eq!(fp.position, pos);
    }
}
