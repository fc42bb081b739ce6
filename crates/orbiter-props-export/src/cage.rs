//! Collision cage extraction
//!
//! Each vertex of the cage mesh becomes one Orbiter touchdown point. Vertex
//! order is kept as stored in the mesh.

use orbiter_props_core::numeric::round_decimals;
use orbiter_props_core::{to_orbiter, AuthoringPoint, OrbiterPoint, Result, ResultExt};
use orbiter_props_scene::Scene;
use tracing::debug;

/// Spring stiffness written for every touchdown point
pub const TOUCHDOWN_STIFFNESS: f64 = 1e6;
/// Damping written for every touchdown point
pub const TOUCHDOWN_DAMPING: f64 = 1e5;
/// Maximum compression written for every touchdown point
pub const TOUCHDOWN_COMPRESSION: f64 = 1.6;
/// Decimal places kept in cage coordinates
pub const CAGE_PRECISION: usize = 2;

/// One touchdown point in Orbiter coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub position: OrbiterPoint,
    pub stiffness: f64,
    pub damping: f64,
    pub compression: f64,
}

impl ContactPoint {
    /// Convert a cage vertex, rounding its coordinates
    pub fn from_vertex(vertex: AuthoringPoint) -> Self {
        Self {
            position: to_orbiter(vertex).map(|c| round_decimals(c, CAGE_PRECISION)),
            stiffness: TOUCHDOWN_STIFFNESS,
            damping: TOUCHDOWN_DAMPING,
            compression: TOUCHDOWN_COMPRESSION,
        }
    }
}

/// Read the touchdown points from the mesh of object `cage`.
///
/// Fails with `ResourceNotFound` when no such object exists and with
/// `InvalidInput` when it has no mesh data.
pub fn extract_collision_cage(scene: &mut Scene, cage: &str) -> Result<Vec<ContactPoint>> {
    let object = scene
        .object_mut(cage)
        .context("collision cage")?;

    let mesh = object.edit_mesh()?;
    let points: Vec<_> = mesh.verts().map(ContactPoint::from_vertex).collect();
    drop(mesh);

    debug!(cage, vertices = points.len(), "Collision cage extracted");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbiter_props_scene::{ObjectKind, SceneObject};

    fn make_scene() -> Scene {
        Scene::new(
            vec![
                SceneObject::mesh(
                    "Cage",
                    vec![[1.005, 2.0, -3.0], [0.0, 0.0, 0.0], [-0.333, 1.234, 5.678]],
                ),
                SceneObject::empty("Marker", [0.0; 3]),
            ],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_vertices_converted_and_rounded_in_order() {
        let mut scene = make_scene();
        let points = extract_collision_cage(&mut scene, "Cage").unwrap();

        let positions: Vec<_> = points.iter().map(|p| p.position.to_array()).collect();
        assert_eq!(
            positions,
            vec![[-1.0, -3.0, -2.0], [-0.0, 0.0, -0.0], [0.33, 5.68, -1.23]]
        );
    }

    #[test]
    fn test_fixed_parameters() {
        let mut scene = make_scene();
        let points = extract_collision_cage(&mut scene, "Cage").unwrap();
        assert!(points.iter().all(|p| p.stiffness == 1e6 && p.damping == 1e5 && p.compression == 1.6));
    }

    #[test]
    fn test_count_matches_vertex_count() {
        let vertices: Vec<[f64; 3]> = (0..37).map(|i| [f64::from(i), 0.0, 0.0]).collect();
        let mut scene = Scene::new(vec![SceneObject::mesh("Hull", vertices)], vec![]).unwrap();
        assert_eq!(extract_collision_cage(&mut scene, "Hull").unwrap().len(), 37);
    }

    #[test]
    fn test_extraction_leaves_mesh_untouched() {
        let mut scene = make_scene();
        let before = scene.object("Cage").unwrap().mesh.clone();
        extract_collision_cage(&mut scene, "Cage").unwrap();
        assert_eq!(scene.object("Cage").unwrap().mesh, before);
    }

    #[test]
    fn test_missing_cage() {
        let mut scene = make_scene();
        let err = extract_collision_cage(&mut scene, "Nope").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "collision cage: object not found: 'Nope'");
    }

    #[test]
    fn test_cage_without_mesh() {
        let mut scene = make_scene();
        let err = extract_collision_cage(&mut scene, "Marker").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_any_kind_with_mesh_data_is_accepted() {
        let cage = SceneObject::mesh("Curve", vec![[1.0, 1.0, 1.0]]).with_kind(ObjectKind::Curve);
        let mut scene = Scene::new(vec![cage], vec![]).unwrap();
        assert_eq!(extract_collision_cage(&mut scene, "Curve").unwrap().len(), 1);
    }
}
