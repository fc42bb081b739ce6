//! Scoped edit handle over an object's mesh
//!
//! The guard works on a private copy of the mesh. When it goes out of scope
//! the copy is written back if anything changed, then released. Drop runs on
//! every exit path, including early `?` returns and unwinding.

use std::ops::Deref;

use orbiter_props_core::AuthoringPoint;
use tracing::trace;

use crate::model::MeshData;

/// Editable working copy of a mesh, flushed back on drop
#[derive(Debug)]
pub struct MeshEditGuard<'a> {
    target: &'a mut MeshData,
    working: Option<MeshData>,
    dirty: bool,
}

impl<'a> MeshEditGuard<'a> {
    /// Copy `target` into a working mesh
    pub fn begin(target: &'a mut MeshData) -> Self {
        let working = target.clone();
        trace!(vertices = working.vertices.len(), "Mesh edit started");
        Self {
            target,
            working: Some(working),
            dirty: false,
        }
    }

    /// Vertex positions in stored order
    pub fn verts(&self) -> impl Iterator<Item = AuthoringPoint> + '_ {
        self.mesh().points()
    }

    /// Mutable access to the working copy; marks the edit for write-back
    pub fn mesh_mut(&mut self) -> &mut MeshData {
        self.dirty = true;
        self.working.get_or_insert_with(MeshData::default)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mesh(&self) -> &MeshData {
        // `working` is only taken in drop
        self.working.as_ref().unwrap_or(&*self.target)
    }
}

impl Deref for MeshEditGuard<'_> {
    type Target = MeshData;

    fn deref(&self) -> &MeshData {
        self.mesh()
    }
}

impl Drop for MeshEditGuard<'_> {
    fn drop(&mut self) {
        if let Some(working) = self.working.take() {
            if self.dirty {
                *self.target = working;
                trace!("Mesh edit flushed");
            }
        }
    }
}
