//! Orrery - Floating-Origin Orbital Hierarchy Simulator
//!
//! A library crate simulating a hierarchy of celestial bodies at
//! astronomical scale: analytic Kepler orbits evaluated against a shared
//! universal clock, dependency-ordered parent/child placement, and a
//! double-precision floating-origin coordinate model projected to
//! camera-relative single precision for rendering consumers.

pub mod floating_origin;
pub mod hierarchy;
pub mod orbit;
pub mod render;
pub mod scene;
pub mod time;
pub mod types;
