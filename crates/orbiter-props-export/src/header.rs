//! Orbiter header rendering
//!
//! The whole output grammar lives in [`HeaderDocument::render`]. Rendering
//! only substitutes values and repeats rows; it never branches on content.

use std::fs;
use std::path::Path;

use orbiter_props_core::numeric::{c_float, c_float_exp};
use orbiter_props_core::{Error, OrbiterPoint, Result};
use tracing::{debug, trace};

use crate::cage::ContactPoint;
use crate::thrusters::{GroupListing, ThrusterIndex};

/// Separator between array rows
const ROW_SEPARATOR: &str = ",\n    ";

/// Include guard stem: the output file name without extension, upper-cased
pub fn guard_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// Everything that goes into one generated header
#[derive(Debug, Clone, Default)]
pub struct HeaderDocument {
    /// Include guard stem, see [`guard_name`]
    pub guard: String,
    /// Type token for the vertex count constant
    pub uint_type: String,
    /// Suffix of the `ntdvtx`/`tdvtx` symbols
    pub cage_suffix: String,
    pub contact_points: Vec<ContactPoint>,
    pub thrusters: ThrusterIndex,
    pub groups: Vec<GroupListing>,
}

fn vector_row(p: OrbiterPoint) -> String {
    format!("{{{}, {}, {}}}", c_float(p.x), c_float(p.y), c_float(p.z))
}

fn touchdown_row(point: &ContactPoint) -> String {
    let p = point.position;
    format!(
        "{{_V({}, {}, {}), {}, {}, {}}}",
        c_float(p.x),
        c_float(p.y),
        c_float(p.z),
        c_float_exp(point.stiffness),
        c_float_exp(point.damping),
        c_float(point.compression)
    )
}

fn group_block(group: &GroupListing) -> String {
    format!(
        "const int {} {{\n    {}\n}}",
        group.name,
        group.members.join(ROW_SEPARATOR)
    )
}

fn join_rows(rows: impl Iterator<Item = String>) -> String {
    rows.collect::<Vec<_>>().join(ROW_SEPARATOR)
}

impl HeaderDocument {
    /// Render the header text
    pub fn render(&self) -> String {
        let guard = &self.guard;
        let uint_type = &self.uint_type;
        let suffix = &self.cage_suffix;
        let vertex_count = self.contact_points.len();

        let rocket_defines = self
            .thrusters
            .iter()
            .map(|t| format!("#define {} {};", t.name.to_uppercase(), t.index))
            .collect::<Vec<_>>()
            .join("\n");
        let cage_rows = join_rows(self.contact_points.iter().map(touchdown_row));
        let positions = join_rows(self.thrusters.iter().map(|t| vector_row(t.position)));
        let directions = join_rows(self.thrusters.iter().map(|t| vector_row(t.direction)));
        let groups = self
            .groups
            .iter()
            .map(group_block)
            .collect::<Vec<_>>()
            .join("\n");

        trace!(
            guard = %guard,
            vertex_count,
            thrusters = self.thrusters.len(),
            groups = self.groups.len(),
            "Rendering header"
        );

        // Group blocks are newline-joined, so exactly one blank line precedes `#endif`.
        format!(
            "#ifndef _{guard}_H_
#define _{guard}_H_

{rocket_defines}

static const {uint_type} ntdvtx{suffix} = {vertex_count};
static TOUCHDOWNVTX tdvtx{suffix}[ntdvtx{suffix}] = {{
    {cage_rows}
}};

const ROCKET_POSITIONS = {{
    {positions}
}};

const ROCKET_DIRECTIONS = {{
    {directions}
}};

{groups}

#endif // _{guard}_H_
"
        )
    }

    /// Render and write the header, replacing any existing file
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.render();
        fs::write(path, &text).map_err(|e| Error::io_at(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "Header written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cage::ContactPoint;
    use crate::thrusters::collect_thrusters;
    use crate::settings::RocketGroup;
    use orbiter_props_core::AuthoringPoint;
    use orbiter_props_scene::{Collection, Scene, SceneObject};

    fn make_document() -> HeaderDocument {
        let scene = Scene::new(
            vec![
                SceneObject::empty("Main", [0.0, -4.0, 0.0]),
                SceneObject::empty("Rcs1", [1.0, 0.5, 0.0]),
                SceneObject::mesh("Bell", vec![[0.0; 3]]),
            ],
            vec![
                Collection::new("Engines", &["Main", "Bell"]),
                Collection::new("Rcs", &["Rcs1", "Main"]),
            ],
        )
        .unwrap();
        let collected = collect_thrusters(
            &scene,
            &[
                RocketGroup::new("THGROUP_MAIN", "Engines"),
                RocketGroup::new("THGROUP_RCS", "Rcs"),
            ],
        )
        .unwrap();

        HeaderDocument {
            guard: "DELTA".into(),
            uint_type: "DWORD".into(),
            cage_suffix: "_gear".into(),
            contact_points: vec![
                ContactPoint::from_vertex(AuthoringPoint::new(1.005, 2.0, -3.0)),
                ContactPoint::from_vertex(AuthoringPoint::new(0.5, -1.25, 0.0)),
            ],
            thrusters: collected.index,
            groups: collected.groups,
        }
    }

    #[test]
    fn test_full_render() {
        let expected = "\
#ifndef _DELTA_H_
#define _DELTA_H_

#define MAIN 0;
#define RCS1 1;

static const DWORD ntdvtx_gear = 2;
static TOUCHDOWNVTX tdvtx_gear[ntdvtx_gear] = {
    {_V(-1.0, -3.0, -2.0), 1e6, 1e5, 1.6},
    {_V(-0.5, 0.0, 1.25), 1e6, 1e5, 1.6}
};

const ROCKET_POSITIONS = {
    {-0.0, 0.0, 4.0},
    {-1.0, 0.0, -0.5}
};

const ROCKET_DIRECTIONS = {
    {0.0, -1.0, 0.0},
    {0.0, -1.0, 0.0}
};

const int THGROUP_MAIN {
    Main,
    Bell
}
const int THGROUP_RCS {
    Rcs1,
    Main
}

#endif // _DELTA_H_
";
        assert_eq!(make_document().render(), expected);
    }

    #[test]
    fn test_empty_document_renders_skeleton() {
        let doc = HeaderDocument {
            guard: "BARE".into(),
            uint_type: "DWORD".into(),
            ..HeaderDocument::default()
        };
        let expected = "\
#ifndef _BARE_H_
#define _BARE_H_



static const DWORD ntdvtx = 0;
static TOUCHDOWNVTX tdvtx[ntdvtx] = {
    
};

const ROCKET_POSITIONS = {
    
};

const ROCKET_DIRECTIONS = {
    
};



#endif // _BARE_H_
";
        assert_eq!(doc.render(), expected);
    }

    #[test]
    fn test_guard_name() {
        assert_eq!(guard_name(Path::new("/out/deltaglider.h")), "DELTAGLIDER");
        assert_eq!(guard_name(Path::new("my-ship.v2.h")), "MY-SHIP.V2");
        assert_eq!(guard_name(Path::new("noext")), "NOEXT");
        assert_eq!(guard_name(Path::new("..")), "");
    }

    #[test]
    fn test_ends_with_single_newline() {
        let text = make_document().render();
        assert!(text.ends_with("#endif // _DELTA_H_\n"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delta.h");
        fs::write(&path, "stale content that is much longer than nothing at all").unwrap();

        let doc = make_document();
        doc.write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), doc.render());
    }

    #[test]
    fn test_write_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/delta.h");
        let err = make_document().write_to(&path).unwrap_err();
        assert!(err.is_io());
    }
}
