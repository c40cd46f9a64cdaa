//! Scene construction and validation.
//!
//! Consumes parsed body descriptors (file loading is a separate concern),
//! validates them, resolves the update-order hierarchy, and spawns the
//! entities the per-tick systems operate on. Construction is strictly
//! sequential and happens once, before any ticking; everything it builds
//! (the registry in particular) is read-only afterwards.
//!
//! Validation happens here, never inside per-tick math: a body with bad
//! data is rejected and reported instead of propagating NaN through the
//! simulation later.

pub mod presets;

use std::collections::{HashMap, HashSet};

use bevy::math::{DMat3, DQuat, DVec3};
use bevy::prelude::*;
use thiserror::Error;

use crate::floating_origin::{FloatingPosition, FloatingPositionParent};
use crate::hierarchy::{self, HierarchyError, UpdateOrder};
use crate::orbit::{KeplerElements, MeanAnomaly, OrbitParent};
use crate::types::{BodyName, BodyRadius, DEG_TO_RAD, Mass};

/// Parsed description of one celestial body.
#[derive(Clone, Debug)]
pub struct BodyDescriptor {
    /// Stable identifier, unique within the scene
    pub id: String,
    /// Display name
    pub name: String,
    /// Identifier of the body this one orbits, if any
    pub parent: Option<String>,
    /// Mass in kilograms
    pub mass: f64,
    /// Equatorial radius in meters
    pub radius: f64,
    /// Absolute position in meters; used only by bodies without an orbit
    pub position: DVec3,
    /// Orbital elements; absent for bodies fixed in space
    pub orbit: Option<OrbitDescriptor>,
    /// Surface-fixed features attached to this body
    pub points_of_interest: Vec<PointOfInterestDescriptor>,
}

impl BodyDescriptor {
    /// A body fixed at an absolute position (a star, typically).
    pub fn fixed(id: &str, name: &str, mass: f64, radius: f64, position: DVec3) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent: None,
            mass,
            radius,
            position,
            orbit: None,
            points_of_interest: Vec::new(),
        }
    }

    /// A body orbiting another.
    pub fn orbiting(id: &str, name: &str, parent: &str, mass: f64, radius: f64, orbit: OrbitDescriptor) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent: Some(parent.to_string()),
            mass,
            radius,
            position: DVec3::ZERO,
            orbit: Some(orbit),
            points_of_interest: Vec::new(),
        }
    }

    /// Attach a surface point of interest.
    pub fn with_point_of_interest(mut self, name: &str, latitude_deg: f64, longitude_deg: f64) -> Self {
        self.points_of_interest.push(PointOfInterestDescriptor {
            name: name.to_string(),
            latitude_deg,
            longitude_deg,
        });
        self
    }
}

/// Orbital element source data. Angles arrive in degrees, as in the body
/// data files, and are converted to radians at ingestion.
#[derive(Clone, Copy, Debug)]
pub struct OrbitDescriptor {
    /// Semi-major axis in meters
    pub semi_major_axis: f64,
    /// Eccentricity (must be < 1; parabolic/hyperbolic orbits unsupported)
    pub eccentricity: f64,
    /// Inclination in degrees
    pub inclination_deg: f64,
    /// Longitude of the ascending node in degrees
    pub longitude_of_ascending_node_deg: f64,
    /// Argument of periapsis in degrees
    pub argument_of_periapsis_deg: f64,
    /// Mean anomaly at epoch in degrees
    pub mean_anomaly_at_epoch_deg: f64,
}

/// A named surface location given as latitude/longitude on the parent body.
#[derive(Clone, Debug)]
pub struct PointOfInterestDescriptor {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// Per-body data problems detected at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyValidationError {
    #[error("eccentricity {0} is outside [0, 1)")]
    EccentricityOutOfRange(f64),
    #[error("mass {0} kg is not positive")]
    NonPositiveMass(f64),
    #[error("equatorial radius {0} m is not positive")]
    NonPositiveRadius(f64),
    #[error("orbital elements declared without a parent body")]
    OrbitWithoutParent,
}

/// Scene-level construction failures. Any of these mean ticking must not
/// start: the hierarchy would be inconsistent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("duplicate body id {0:?}")]
    DuplicateId(String),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

/// Lookup table between declared body ids and spawned entities.
///
/// Built once during scene construction; read-only during steady-state
/// ticking.
#[derive(Resource, Default, Debug)]
pub struct BodyRegistry {
    id_to_entity: HashMap<String, Entity>,
    entity_to_id: HashMap<Entity, String>,
}

impl BodyRegistry {
    /// Register a spawned body.
    pub fn register(&mut self, id: &str, entity: Entity) {
        self.id_to_entity.insert(id.to_string(), entity);
        self.entity_to_id.insert(entity, id.to_string());
    }

    /// Entity spawned for a body id.
    pub fn entity_of(&self, id: &str) -> Option<Entity> {
        self.id_to_entity.get(id).copied()
    }

    /// Body id of an entity.
    pub fn id_of(&self, entity: Entity) -> Option<&str> {
        self.entity_to_id.get(&entity).map(String::as_str)
    }

    /// Number of registered bodies.
    pub fn len(&self) -> usize {
        self.id_to_entity.len()
    }

    /// Whether no bodies are registered.
    pub fn is_empty(&self) -> bool {
        self.id_to_entity.is_empty()
    }

    /// All registered id/entity pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> + '_ {
        self.id_to_entity.iter().map(|(id, &e)| (id.as_str(), e))
    }
}

/// Outcome of a successful scene build.
#[derive(Debug)]
pub struct SceneSummary {
    /// Bodies spawned (not counting points of interest)
    pub bodies_spawned: usize,
    /// Points of interest spawned
    pub points_of_interest_spawned: usize,
    /// Bodies rejected by validation, with the reason each was excluded
    pub rejected: Vec<(String, BodyValidationError)>,
}

/// Validate one descriptor. Returns the first problem found.
fn validate_body(body: &BodyDescriptor) -> Result<(), BodyValidationError> {
    if body.mass <= 0.0 {
        return Err(BodyValidationError::NonPositiveMass(body.mass));
    }
    if body.radius <= 0.0 {
        return Err(BodyValidationError::NonPositiveRadius(body.radius));
    }
    if let Some(orbit) = &body.orbit {
        if body.parent.is_none() {
            return Err(BodyValidationError::OrbitWithoutParent);
        }
        if !(0.0..1.0).contains(&orbit.eccentricity) {
            return Err(BodyValidationError::EccentricityOutOfRange(orbit.eccentricity));
        }
    }
    Ok(())
}

/// Build the scene: validate descriptors, resolve update order, spawn
/// bodies and their points of interest, and install the [`BodyRegistry`].
///
/// Bodies that fail validation are excluded from the scene and reported in
/// the summary. If the surviving set has a duplicate id, an unknown parent,
/// or a parent cycle, the whole build fails: a partially consistent
/// hierarchy must never start ticking.
pub fn build_scene(
    world: &mut World,
    bodies: &[BodyDescriptor],
) -> Result<SceneSummary, SceneError> {
    // Ids must be unique across bodies and points of interest before any
    // entity exists.
    let mut seen: HashSet<&str> = HashSet::new();
    for body in bodies {
        if !seen.insert(&body.id) {
            return Err(SceneError::DuplicateId(body.id.clone()));
        }
        for poi in &body.points_of_interest {
            if !seen.insert(&poi.name) {
                return Err(SceneError::DuplicateId(poi.name.clone()));
            }
        }
    }

    let mut rejected = Vec::new();
    let mut accepted: Vec<&BodyDescriptor> = Vec::new();
    for body in bodies {
        match validate_body(body) {
            Ok(()) => accepted.push(body),
            Err(reason) => {
                warn!("Excluding body {:?} from the scene: {}", body.id, reason);
                rejected.push((body.id.clone(), reason));
            }
        }
    }

    // Update order over the surviving set. A rejected parent surfaces here
    // as a missing parent, failing the build as a whole.
    let declarations: Vec<(&str, Option<&str>)> = accepted
        .iter()
        .map(|b| (b.id.as_str(), b.parent.as_deref()))
        .collect();
    let resolution = hierarchy::resolve_update_order(&declarations)?;

    let masses: HashMap<&str, f64> = accepted.iter().map(|b| (b.id.as_str(), b.mass)).collect();

    // First pass: spawn every body with its common components so parent
    // entities exist before orbital components reference them.
    let mut registry = BodyRegistry::default();
    for body in &accepted {
        let order = resolution
            .order_of(&body.id)
            .expect("resolved set covers every accepted body");

        let entity = world
            .spawn((
                FloatingPosition::from_world(body.position),
                Mass(body.mass),
                BodyRadius(body.radius),
                BodyName(body.id.clone()),
                UpdateOrder(order),
            ))
            .id();
        registry.register(&body.id, entity);
    }

    // Second pass: orbital components, now that every parent has an entity.
    for body in &accepted {
        let Some(orbit) = &body.orbit else { continue };
        let parent_id = body
            .parent
            .as_deref()
            .expect("validation rejects orbits without a parent");
        let parent_entity = registry
            .entity_of(parent_id)
            .expect("resolver verified the parent id");
        let parent_mass = masses[parent_id];

        let entity = registry.entity_of(&body.id).unwrap();
        world.entity_mut(entity).insert((
            KeplerElements::from_degrees(
                orbit.semi_major_axis,
                orbit.eccentricity,
                orbit.inclination_deg,
                orbit.longitude_of_ascending_node_deg,
                orbit.argument_of_periapsis_deg,
                parent_mass,
            ),
            MeanAnomaly::from_epoch(orbit.mean_anomaly_at_epoch_deg * DEG_TO_RAD),
            OrbitParent {
                entity: parent_entity,
                mass: parent_mass,
            },
        ));
    }

    // Points of interest: rigid surface attachments composed against the
    // parent body's floating position every tick.
    let mut poi_count = 0;
    for body in &accepted {
        let body_entity = registry.entity_of(&body.id).unwrap();
        for poi in &body.points_of_interest {
            let (local_position, local_rotation) =
                surface_attachment(body.radius, poi.latitude_deg, poi.longitude_deg);

            let entity = world
                .spawn((
                    FloatingPosition::default(),
                    FloatingPositionParent::new(body_entity, local_position, local_rotation),
                    BodyName(poi.name.clone()),
                ))
                .id();
            registry.register(&poi.name, entity);
            poi_count += 1;
        }
    }

    info!(
        "Scene built: {} bodies, {} points of interest, {} rejected",
        accepted.len(),
        poi_count,
        rejected.len()
    );

    world.insert_resource(registry);

    Ok(SceneSummary {
        bodies_spawned: accepted.len(),
        points_of_interest_spawned: poi_count,
        rejected,
    })
}

/// Surface-fixed local offset and orientation for a latitude/longitude on a
/// body of the given radius.
///
/// The offset points from the body center to the surface location; the
/// orientation's up axis is the outward radial. At the poles the tangent
/// frame is degenerate and the orientation falls back to identity.
pub fn surface_attachment(radius: f64, latitude_deg: f64, longitude_deg: f64) -> (DVec3, DQuat) {
    let lat = latitude_deg * DEG_TO_RAD;
    let lon = longitude_deg * DEG_TO_RAD;

    let position = DVec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.cos() * lon.sin(),
        radius * lat.sin(),
    );

    let up = position / radius;
    let flat = position.cross(DVec3::Z);
    if flat.length_squared() < 1e-9 {
        return (position, DQuat::IDENTITY);
    }

    let forward = flat.normalize();
    let right = up.cross(forward);
    let rotation = DQuat::from_mat3(&DMat3::from_cols(right, up, forward));

    (position, rotation)
}
