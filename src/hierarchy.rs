//! Dependency-ordered body hierarchy resolution.
//!
//! Before any ticking starts, every body is assigned an update order: roots
//! get 0, every other body gets its parent's order plus one. The per-tick
//! placement step walks these ranks so a body is never evaluated before its
//! parent within the same tick.
//!
//! Resolution is a breadth-first fixed point. The naive form of this loop
//! never terminates when a parent id is unknown or the ancestry contains a
//! cycle, so the pass count is bounded by the body count and a stalled pass
//! aborts immediately, reporting the unresolved set.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use thiserror::Error;

/// Evaluation rank of a body within a tick: 0 for roots, parent + 1 below.
/// Strictly greater than the parent's along any chain.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct UpdateOrder(pub u32);

/// Failure modes of hierarchy resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// A body names a parent that is not in the body set.
    #[error("body {body:?} references unknown parent {parent:?}")]
    MissingParent { body: String, parent: String },
    /// Bodies whose order could not be assigned (parent cycle).
    #[error("could not resolve update order for {0:?} (parent cycle?)")]
    Unresolved(Vec<String>),
}

/// Successful hierarchy resolution.
#[derive(Debug, Clone)]
pub struct UpdateOrderResolution {
    /// Assigned order per body id
    pub orders: HashMap<String, u32>,
    /// Passes the fixed point took; at most `depth + 1` for a valid tree
    pub passes: u32,
}

impl UpdateOrderResolution {
    /// Order assigned to a body id.
    pub fn order_of(&self, id: &str) -> Option<u32> {
        self.orders.get(id).copied()
    }
}

/// Assign update orders to a set of `(id, parent_id)` declarations.
///
/// Runs once at scene construction, strictly before ticking. Terminates for
/// any input: missing parents are rejected up front, and a cycle is
/// detected as a pass that assigns nothing while bodies remain unresolved.
pub fn resolve_update_order(
    bodies: &[(&str, Option<&str>)],
) -> Result<UpdateOrderResolution, HierarchyError> {
    let ids: HashSet<&str> = bodies.iter().map(|(id, _)| *id).collect();

    // Unknown parents would otherwise stall the fixed point below; reject
    // them with a precise error instead of a generic unresolved set.
    for (id, parent) in bodies {
        if let Some(parent) = parent
            && !ids.contains(parent)
        {
            return Err(HierarchyError::MissingParent {
                body: (*id).to_string(),
                parent: (*parent).to_string(),
            });
        }
    }

    if bodies.is_empty() {
        return Ok(UpdateOrderResolution {
            orders: HashMap::new(),
            passes: 0,
        });
    }

    let mut orders: HashMap<&str, u32> = HashMap::new();
    let mut passes = 0;

    // Bounded fixed point: a valid tree of depth d resolves in d + 1
    // passes, and no input needs more passes than it has bodies.
    while passes < bodies.len() as u32 {
        passes += 1;
        let mut progressed = false;

        for (id, parent) in bodies {
            if orders.contains_key(id) {
                continue;
            }

            match parent {
                None => {
                    orders.insert(*id, 0);
                    progressed = true;
                }
                Some(parent) => {
                    if let Some(&parent_order) = orders.get(parent) {
                        orders.insert(*id, parent_order + 1);
                        progressed = true;
                    }
                }
            }
        }

        if orders.len() == bodies.len() {
            return Ok(UpdateOrderResolution {
                orders: orders
                    .into_iter()
                    .map(|(id, order)| (id.to_string(), order))
                    .collect(),
                passes,
            });
        }

        if !progressed {
            break;
        }
    }

    let mut unresolved: Vec<String> = bodies
        .iter()
        .filter(|(id, _)| !orders.contains_key(id))
        .map(|(id, _)| (*id).to_string())
        .collect();
    unresolved.sort();

    Err(HierarchyError::Unresolved(unresolved))
}
