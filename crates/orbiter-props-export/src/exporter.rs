//! Export driver
//!
//! Runs the stages in order and only touches the output file once every
//! scene reference has resolved, so a failed export leaves the previous
//! header in place.

use std::path::{Path, PathBuf};
use std::time::Instant;

use orbiter_props_core::Result;
use orbiter_props_scene::Scene;
use serde::Serialize;
use tracing::info;

use crate::cage::extract_collision_cage;
use crate::header::{guard_name, HeaderDocument};
use crate::settings::ExportSettings;
use crate::thrusters::collect_thrusters;

/// What a finished export produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub contact_points: usize,
    pub thrusters: usize,
    pub groups: usize,
}

/// Orbiter header exporter
pub struct HeaderExporter {
    settings: ExportSettings,
}

impl HeaderExporter {
    /// Create an exporter for validated settings
    pub fn new(settings: ExportSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Gather everything the header needs, without writing anything.
    ///
    /// `output_path` only feeds the include guard name.
    pub fn build_document(&self, scene: &mut Scene, output_path: &Path) -> Result<HeaderDocument> {
        let contact_points = extract_collision_cage(scene, &self.settings.collision_cage)?;
        let collected = collect_thrusters(scene, &self.settings.rocket_groups)?;

        Ok(HeaderDocument {
            guard: guard_name(output_path),
            uint_type: self.settings.uint_type.clone(),
            cage_suffix: self.settings.cage_suffix.clone(),
            contact_points,
            thrusters: collected.index,
            groups: collected.groups,
        })
    }

    /// Build the header for `scene` and write it to `output_path`
    pub fn export(&self, scene: &mut Scene, output_path: impl AsRef<Path>) -> Result<ExportSummary> {
        let output_path = output_path.as_ref();
        let started = Instant::now();
        info!(
            cage = %self.settings.collision_cage,
            groups = self.settings.rocket_groups.len(),
            output = %output_path.display(),
            "Starting header export"
        );

        let document = self.build_document(scene, output_path)?;
        document.write_to(output_path)?;

        let summary = ExportSummary {
            output: output_path.to_path_buf(),
            contact_points: document.contact_points.len(),
            thrusters: document.thrusters.len(),
            groups: document.groups.len(),
        };
        info!(
            duration_ms = %started.elapsed().as_millis(),
            contact_points = summary.contact_points,
            thrusters = summary.thrusters,
            "Header export complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RocketGroup;
    use orbiter_props_scene::{Collection, SceneObject};

    fn make_settings() -> ExportSettings {
        ExportSettings {
            collision_cage: "Cage".into(),
            cage_suffix: "1".into(),
            header_file: "ship.h".into(),
            rocket_groups: vec![RocketGroup::new("G", "Jets")],
            ..ExportSettings::default()
        }
    }

    fn make_scene() -> Scene {
        Scene::new(
            vec![
                SceneObject::mesh("Cage", vec![[0.0; 3], [1.0, 1.0, 1.0]]),
                SceneObject::empty("J", [0.0; 3]),
            ],
            vec![Collection::new("Jets", &["J"])],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_incomplete_settings() {
        assert!(HeaderExporter::new(ExportSettings::default()).is_err());
    }

    #[test]
    fn test_build_document() {
        let exporter = HeaderExporter::new(make_settings()).unwrap();
        let mut scene = make_scene();
        let doc = exporter.build_document(&mut scene, Path::new("dir/ship.h")).unwrap();

        assert_eq!(doc.guard, "SHIP");
        assert_eq!(doc.contact_points.len(), 2);
        assert_eq!(doc.thrusters.len(), 1);
        assert_eq!(doc.groups.len(), 1);
    }

    #[test]
    fn test_export_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ship.h");
        let exporter = HeaderExporter::new(make_settings()).unwrap();

        let summary = exporter.export(&mut make_scene(), &path).unwrap();
        assert_eq!(
            summary,
            ExportSummary {
                output: path.clone(),
                contact_points: 2,
                thrusters: 1,
                groups: 1,
            }
        );
        assert!(path.exists());
    }
}
