//! User-configured export settings
//!
//! Settings normally live in a YAML file next to the scene snapshot:
//!
//! ```yaml
//! collision_cage: Cage
//! cage_suffix: _landed
//! header_file: //vessel.h
//! rocket_groups:
//!   - name: THGROUP_MAIN
//!     collection: Engines
//!   - name: THGROUP_ATT_PITCHUP
//!     collection: RCS_Pitch
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use orbiter_props_core::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix marking a path relative to the scene snapshot's directory
pub const SCENE_RELATIVE_PREFIX: &str = "//";

/// Default unsigned type used for the vertex count constant
pub const DEFAULT_UINT_TYPE: &str = "DWORD";

/// One named thruster group and the collection it lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RocketGroup {
    /// Symbol name emitted as `const int <name>`
    pub name: String,
    /// Scene collection whose members make up the group
    pub collection: String,
}

impl RocketGroup {
    pub fn new(name: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: collection.into(),
        }
    }
}

/// Parses `NAME=COLLECTION`. A bare `NAME` uses the collection of the same name.
impl FromStr for RocketGroup {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, collection) = match s.split_once('=') {
            Some((name, collection)) => (name.trim(), collection.trim()),
            None => (s.trim(), s.trim()),
        };
        if name.is_empty() || collection.is_empty() {
            return Err(format!("Invalid rocket group '{s}', expected NAME=COLLECTION"));
        }
        Ok(Self::new(name, collection))
    }
}

/// Everything the exporter needs besides the scene itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Name of the mesh object used as collision cage
    pub collision_cage: String,
    /// Suffix appended to the `ntdvtx`/`tdvtx` symbol names
    pub cage_suffix: String,
    /// Output header path; `//` prefix means relative to the scene snapshot
    pub header_file: String,
    /// Thruster groups in output order
    pub rocket_groups: Vec<RocketGroup>,
    /// Type token for the vertex count constant
    pub uint_type: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            collision_cage: String::new(),
            cage_suffix: String::new(),
            header_file: String::new(),
            rocket_groups: Vec::new(),
            uint_type: DEFAULT_UINT_TYPE.to_string(),
        }
    }
}

impl ExportSettings {
    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        let settings = Self::from_yaml_str(&text)
            .with_context(|| format!("settings '{}'", path.display()))?;
        debug!(path = %path.display(), groups = settings.rocket_groups.len(), "Loaded export settings");
        Ok(settings)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::parse("export settings", e))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::parse("export settings", e))
    }

    /// Check that every required field is filled in
    pub fn validate(&self) -> Result<()> {
        if self.collision_cage.trim().is_empty() {
            return Err(Error::invalid_input("no collision cage object configured"));
        }
        if self.header_file.trim().is_empty() {
            return Err(Error::invalid_input("no header file configured"));
        }
        let header_path = self
            .header_file
            .strip_prefix(SCENE_RELATIVE_PREFIX)
            .unwrap_or(&self.header_file);
        if Path::new(header_path).file_stem().is_none() {
            return Err(Error::invalid_input(format!(
                "header file '{}' has no file name",
                self.header_file
            )));
        }
        if self.uint_type.trim().is_empty() {
            return Err(Error::invalid_input("uint type must not be empty"));
        }
        for (idx, group) in self.rocket_groups.iter().enumerate() {
            if group.name.trim().is_empty() {
                return Err(Error::invalid_input(format!("rocket group #{idx} has no name")));
            }
            if group.collection.trim().is_empty() {
                return Err(Error::invalid_input(format!(
                    "rocket group '{}' has no collection",
                    group.name
                )));
            }
        }
        Ok(())
    }

    /// Resolve `header_file` to a filesystem path.
    ///
    /// `//name.h` is taken relative to the directory holding `scene_path`.
    /// Without a scene path the prefix is dropped and the path is relative
    /// to the working directory.
    pub fn resolve_header_path(&self, scene_path: Option<&Path>) -> PathBuf {
        match self.header_file.strip_prefix(SCENE_RELATIVE_PREFIX) {
            Some(relative) => {
                let base = scene_path
                    .and_then(Path::parent)
                    .unwrap_or_else(|| Path::new(""));
                base.join(relative)
            }
            None => PathBuf::from(&self.header_file),
        }
    }
}
