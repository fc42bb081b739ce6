//! orbiter-props-scene
//!
//! In-memory scene snapshot the exporter reads from: named objects with a
//! kind, an optional parent, a local transform and optional mesh data, plus
//! named, ordered collections of objects.
//!
//! # Snapshot format
//!
//! ```json
//! {
//!   "objects": [
//!     { "name": "Cage", "kind": "mesh",
//!       "mesh": { "vertices": [[1.0, 2.0, 0.0], [0.0, -2.0, 0.0]] } },
//!     { "name": "Main", "kind": "empty",
//!       "transform": { "translation": [0.0, -4.0, 0.0],
//!                      "rotation": [0.7071068, 0.0, 0.0, 0.7071068] } }
//!   ],
//!   "collections": [
//!     { "name": "Engines", "objects": ["Main"] }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orbiter_props_scene::Scene;
//!
//! let scene = Scene::load("vessel.scene.json")?;
//! for object in scene.collection_objects("Engines")? {
//!     println!("{} at {}", object.name, scene.world_location(&object.name)?);
//! }
//! ```

pub mod edit;
pub mod loader;
pub mod model;
pub mod transform;

pub use edit::MeshEditGuard;
pub use model::{Collection, MeshData, ObjectKind, Scene, SceneObject};
pub use transform::{MatrixTransform, TransformSpec, TrsTransform};
