//! Loading scene snapshots from JSON

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use orbiter_props_core::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{Collection, Scene, SceneObject};

/// On-disk layout of a scene snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl Scene {
    /// Load and validate a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Scene> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading scene snapshot");

        let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("scene '{}'", path.display()))
    }

    /// Parse and validate a snapshot from a reader
    pub fn from_reader(reader: impl Read) -> Result<Scene> {
        let file: SceneFile =
            serde_json::from_reader(reader).map_err(|e| Error::parse("scene snapshot", e))?;
        Self::from_file(file)
    }

    /// Parse and validate a snapshot from a JSON string
    pub fn from_json_str(json: &str) -> Result<Scene> {
        let file: SceneFile =
            serde_json::from_str(json).map_err(|e| Error::parse("scene snapshot", e))?;
        Self::from_file(file)
    }

    fn from_file(file: SceneFile) -> Result<Scene> {
        let scene = Scene::new(file.objects, file.collections)?;
        debug!(
            objects = scene.objects().len(),
            collections = scene.collections().len(),
            "Scene snapshot validated"
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectKind;
    use crate::transform::TransformSpec;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "objects": [
            { "name": "Cage", "kind": "mesh",
              "mesh": { "vertices": [[1.0, 2.0, 0.0], [0.0, -2.0, 0.5]], "faces": [[0, 1]] } },
            { "name": "Main", "kind": "empty",
              "transform": { "translation": [0.0, -4.0, 0.0] } },
            { "name": "Body", "kind": "empty",
              "transform": { "matrix": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,2,1] } },
            { "name": "Lamp", "kind": "light", "parent": "Body" }
        ],
        "collections": [
            { "name": "Engines", "objects": ["Main", "Lamp"] }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let scene = Scene::from_json_str(SNAPSHOT).unwrap();

        assert_eq!(scene.objects().len(), 4);
        assert_eq!(scene.object("Cage").unwrap().mesh.as_ref().unwrap().vertex_count(), 2);
        assert_eq!(scene.object("Lamp").unwrap().kind, ObjectKind::Light);
        assert!(matches!(
            scene.object("Body").unwrap().transform,
            TransformSpec::Matrix(_)
        ));
        assert_eq!(scene.collection("Engines").unwrap().objects, ["Main", "Lamp"]);
        assert_eq!(scene.world_location("Lamp").unwrap().z, 2.0);
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = Scene::from_json_str(r#"{"objects": [{"name": "X", "kind": "blob"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_misspelled_transform_key_rejected() {
        let json = r#"{"objects": [{"name": "X", "kind": "empty",
                        "transform": {"translate": [1, 2, 3]}}]}"#;
        assert!(Scene::from_json_str(json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let scene = Scene::load(file.path()).unwrap();
        assert_eq!(scene.collections().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scene::load("/definitely/not/here.json").unwrap_err();
        assert!(err.is_io());
    }
}
