//! Local transforms and world-space resolution through parent chains

use std::collections::HashSet;

use glam::{DMat4, DQuat, DVec3};
use orbiter_props_core::{AuthoringPoint, Error, ResourceKind, Result, ResultExt};
use serde::{Deserialize, Serialize};

use crate::model::Scene;

/// Object transform relative to its parent (or the world when unparented)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformSpec {
    Matrix(MatrixTransform),
    Trs(TrsTransform),
}

/// Full 4x4 matrix, column-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixTransform {
    pub matrix: [f64; 16],
}

/// Translation, rotation quaternion `[x, y, z, w]` and scale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrsTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
}

impl Default for TransformSpec {
    fn default() -> Self {
        TransformSpec::Trs(TrsTransform::default())
    }
}

impl TransformSpec {
    pub fn from_translation(translation: [f64; 3]) -> Self {
        TransformSpec::Trs(TrsTransform {
            translation: Some(translation),
            ..TrsTransform::default()
        })
    }

    pub fn from_trs(translation: [f64; 3], rotation: [f64; 4], scale: [f64; 3]) -> Self {
        TransformSpec::Trs(TrsTransform {
            translation: Some(translation),
            rotation: Some(rotation),
            scale: Some(scale),
        })
    }

    /// Local matrix for this transform
    pub fn local_matrix(&self) -> Result<DMat4> {
        let matrix = match self {
            TransformSpec::Matrix(MatrixTransform { matrix }) => DMat4::from_cols_array(matrix),
            TransformSpec::Trs(TrsTransform {
                translation,
                rotation,
                scale,
            }) => {
                let rotation = match rotation {
                    Some([x, y, z, w]) => {
                        let q = DQuat::from_xyzw(*x, *y, *z, *w);
                        let length = q.length();
                        if !length.is_finite() || length < 1e-12 {
                            return Err(Error::invalid_input(format!(
                                "rotation quaternion {:?} cannot be normalized",
                                [x, y, z, w]
                            )));
                        }
                        q / length
                    }
                    None => DQuat::IDENTITY,
                };
                DMat4::from_scale_rotation_translation(
                    scale.map_or(DVec3::ONE, DVec3::from_array),
                    rotation,
                    translation.map_or(DVec3::ZERO, DVec3::from_array),
                )
            }
        };

        if !matrix.is_finite() {
            return Err(Error::invalid_input("transform contains non-finite values"));
        }
        Ok(matrix)
    }
}

impl Scene {
    /// World matrix of an object, composed through its parent chain
    pub fn world_matrix(&self, name: &str) -> Result<DMat4> {
        let mut object = self.object(name)?;
        let mut world = object
            .transform
            .local_matrix()
            .with_context(|| format!("transform of '{}'", object.name))?;

        let mut visited = HashSet::new();
        visited.insert(object.name.as_str());

        while let Some(parent_name) = object.parent.as_deref() {
            if !visited.insert(parent_name) {
                return Err(Error::invalid_input(format!(
                    "parent cycle through '{parent_name}' while resolving '{name}'"
                )));
            }
            object = self.object(parent_name).map_err(|_| Error::ResourceNotFound {
                kind: ResourceKind::Parent,
                name: parent_name.to_string(),
            })?;
            let parent_local = object
                .transform
                .local_matrix()
                .with_context(|| format!("transform of '{}'", object.name))?;
            world = parent_local * world;
        }

        Ok(world)
    }

    /// World-space location of an object
    pub fn world_location(&self, name: &str) -> Result<AuthoringPoint> {
        let world = self.world_matrix(name)?;
        Ok(AuthoringPoint::from(world.w_axis.truncate().to_array()))
    }

    /// A point given in the object's local space, moved into world space
    pub fn world_point(&self, name: &str, local: [f64; 3]) -> Result<AuthoringPoint> {
        let world = self.world_matrix(name)?;
        let point = world.transform_point3(DVec3::from_array(local));
        Ok(AuthoringPoint::from(point.to_array()))
    }
}
