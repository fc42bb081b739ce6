//! Scene objects, collections and name lookup

use std::collections::HashMap;
use std::fmt;

use orbiter_props_core::{AuthoringPoint, Error, Result};
use serde::{Deserialize, Serialize};

use crate::edit::MeshEditGuard;
use crate::transform::TransformSpec;

/// Object type as reported by the modeling tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Mesh,
    /// Marker without geometry. Thrusters are modeled as empties.
    Empty,
    Camera,
    Light,
    Curve,
    Other,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Mesh => "mesh",
            ObjectKind::Empty => "empty",
            ObjectKind::Camera => "camera",
            ObjectKind::Light => "light",
            ObjectKind::Curve => "curve",
            ObjectKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Mesh geometry in object-local coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex positions in stored order
    pub vertices: Vec<[f64; 3]>,
    /// Faces as vertex index loops
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faces: Vec<Vec<u32>>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex positions as typed points, in stored order
    pub fn points(&self) -> impl Iterator<Item = AuthoringPoint> + '_ {
        self.vertices.iter().map(|&v| AuthoringPoint::from(v))
    }
}

/// A named object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub transform: TransformSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshData>,
}

impl SceneObject {
    /// Object without geometry at `translation`
    pub fn empty(name: impl Into<String>, translation: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Empty,
            parent: None,
            transform: TransformSpec::from_translation(translation),
            mesh: None,
        }
    }

    /// Mesh object at the origin
    pub fn mesh(name: impl Into<String>, vertices: Vec<[f64; 3]>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            parent: None,
            transform: TransformSpec::default(),
            mesh: Some(MeshData {
                vertices,
                faces: Vec::new(),
            }),
        }
    }

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_transform(mut self, transform: TransformSpec) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Open a scoped edit handle on this object's mesh.
    ///
    /// Fails with `InvalidInput` when the object carries no mesh data.
    pub fn edit_mesh(&mut self) -> Result<MeshEditGuard<'_>> {
        match self.mesh.as_mut() {
            Some(mesh) => Ok(MeshEditGuard::begin(mesh)),
            None => Err(Error::invalid_input(format!(
                "object '{}' ({}) has no mesh data",
                self.name, self.kind
            ))),
        }
    }
}

/// A named, ordered group of objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    /// Member object names in authored order
    #[serde(default)]
    pub objects: Vec<String>,
}

impl Collection {
    pub fn new(name: impl Into<String>, objects: &[&str]) -> Self {
        Self {
            name: name.into(),
            objects: objects.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Validated scene snapshot
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    collections: Vec<Collection>,
    object_index: HashMap<String, usize>,
    collection_index: HashMap<String, usize>,
}

impl Scene {
    /// Build a scene, rejecting duplicate names and dangling collection members
    pub fn new(objects: Vec<SceneObject>, collections: Vec<Collection>) -> Result<Self> {
        let mut object_index = HashMap::with_capacity(objects.len());
        for (idx, object) in objects.iter().enumerate() {
            if object_index.insert(object.name.clone(), idx).is_some() {
                return Err(Error::invalid_input(format!(
                    "duplicate object name '{}'",
                    object.name
                )));
            }
        }

        let mut collection_index = HashMap::with_capacity(collections.len());
        for (idx, collection) in collections.iter().enumerate() {
            if collection_index.insert(collection.name.clone(), idx).is_some() {
                return Err(Error::invalid_input(format!(
                    "duplicate collection name '{}'",
                    collection.name
                )));
            }
            if let Some(missing) = collection
                .objects
                .iter()
                .find(|name| !object_index.contains_key(name.as_str()))
            {
                return Err(Error::invalid_input(format!(
                    "collection '{}' references unknown object '{}'",
                    collection.name, missing
                )));
            }
        }

        Ok(Self {
            objects,
            collections,
            object_index,
            collection_index,
        })
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn object(&self, name: &str) -> Result<&SceneObject> {
        self.object_index
            .get(name)
            .map(|&idx| &self.objects[idx])
            .ok_or_else(|| Error::object_not_found(name))
    }

    pub fn object_mut(&mut self, name: &str) -> Result<&mut SceneObject> {
        match self.object_index.get(name) {
            Some(&idx) => Ok(&mut self.objects[idx]),
            None => Err(Error::object_not_found(name)),
        }
    }

    pub fn collection(&self, name: &str) -> Result<&Collection> {
        self.collection_index
            .get(name)
            .map(|&idx| &self.collections[idx])
            .ok_or_else(|| Error::collection_not_found(name))
    }

    /// Member objects of a collection, in the collection's order
    pub fn collection_objects(&self, name: &str) -> Result<Vec<&SceneObject>> {
        self.collection(name)?
            .objects
            .iter()
            .map(|member| self.object(member))
            .collect()
    }
}
