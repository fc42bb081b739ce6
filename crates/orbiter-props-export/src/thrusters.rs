//! Thruster collection, indexing and geometry
//!
//! Groups are walked in configured order and each group's collection in its
//! authored order. The first time an object is seen fixes its place; objects
//! shared by several groups keep that first place. Only empties become
//! thrusters, and they are numbered 0..N in that order, so an unchanged
//! scene always yields the same numbering.

use std::collections::{HashMap, HashSet};

use orbiter_props_core::{to_orbiter, OrbiterPoint, Result, ResultExt};
use orbiter_props_scene::{ObjectKind, Scene, SceneObject};
use tracing::{debug, warn};

use crate::settings::RocketGroup;

/// Local point whose world position gives the thruster's +Z axis
const LOCAL_UP: [f64; 3] = [0.0, 0.0, 1.0];

/// Position and thrust direction in Orbiter coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrusterGeometry {
    pub position: OrbiterPoint,
    pub direction: OrbiterPoint,
}

/// An indexed thruster
#[derive(Debug, Clone, PartialEq)]
pub struct Thruster {
    pub name: String,
    pub index: usize,
    pub position: OrbiterPoint,
    pub direction: OrbiterPoint,
}

/// Thrusters in index order with lookup by object name
#[derive(Debug, Clone, Default)]
pub struct ThrusterIndex {
    thrusters: Vec<Thruster>,
    by_name: HashMap<String, usize>,
}

impl ThrusterIndex {
    fn push(&mut self, name: &str, geometry: ThrusterGeometry) {
        let index = self.thrusters.len();
        self.by_name.insert(name.to_string(), index);
        self.thrusters.push(Thruster {
            name: name.to_string(),
            index,
            position: geometry.position,
            direction: geometry.direction,
        });
    }

    pub fn len(&self) -> usize {
        self.thrusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thrusters.is_empty()
    }

    /// Thrusters ordered by index
    pub fn iter(&self) -> std::slice::Iter<'_, Thruster> {
        self.thrusters.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Thruster> {
        self.by_name.get(name).map(|&idx| &self.thrusters[idx])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}

impl<'a> IntoIterator for &'a ThrusterIndex {
    type Item = &'a Thruster;
    type IntoIter = std::slice::Iter<'a, Thruster>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A group's raw member list, including members that are not thrusters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListing {
    pub name: String,
    pub members: Vec<String>,
}

/// Result of walking all configured groups
#[derive(Debug, Clone, Default)]
pub struct CollectedThrusters {
    pub index: ThrusterIndex,
    pub groups: Vec<GroupListing>,
}

fn is_thruster(object: &SceneObject) -> bool {
    object.kind == ObjectKind::Empty
}

/// Collect, deduplicate and index the thrusters referenced by `groups`.
///
/// Fails with `ResourceNotFound` on the first group whose collection does
/// not exist.
pub fn collect_thrusters(scene: &Scene, groups: &[RocketGroup]) -> Result<CollectedThrusters> {
    let mut seen = HashSet::new();
    let mut ordered: Vec<&SceneObject> = Vec::new();
    let mut listings = Vec::with_capacity(groups.len());

    for group in groups {
        let members = scene
            .collection_objects(&group.collection)
            .with_context(|| format!("rocket group '{}'", group.name))?;

        let eligible = members.iter().filter(|o| is_thruster(o)).count();
        if eligible == 0 {
            warn!(group = %group.name, collection = %group.collection, "Rocket group has no thrusters");
        }
        debug!(
            group = %group.name,
            collection = %group.collection,
            members = members.len(),
            eligible,
            "Resolved rocket group"
        );

        for &object in &members {
            if seen.insert(object.name.as_str()) {
                ordered.push(object);
            }
        }

        listings.push(GroupListing {
            name: group.name.clone(),
            members: members.iter().map(|o| o.name.clone()).collect(),
        });
    }

    let mut index = ThrusterIndex::default();
    for object in ordered.into_iter().filter(|o| is_thruster(o)) {
        let geometry = resolve_geometry(scene, &object.name)?;
        debug!(
            thruster = %object.name,
            index = index.len(),
            position = %geometry.position,
            direction = %geometry.direction,
            "Indexed thruster"
        );
        index.push(&object.name, geometry);
    }

    Ok(CollectedThrusters {
        index,
        groups: listings,
    })
}

/// World position and thrust direction of one thruster object.
///
/// Markers point the way the thruster fires; Orbiter wants the opposite
/// vector, so the local +Z axis is negated before conversion.
pub fn resolve_geometry(scene: &Scene, name: &str) -> Result<ThrusterGeometry> {
    let location = scene.world_location(name)?;
    let up = scene.world_point(name, LOCAL_UP)? - location;

    Ok(ThrusterGeometry {
        position: to_orbiter(location),
        direction: to_orbiter(-up),
    })
}
