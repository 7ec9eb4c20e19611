//! Mesh I/O boundary for the unwrapper.
//!
//! Readers decode text into a [`MeshData`] (points plus faces with 1-based
//! point indices); writers serialize one back. The geometry core only ever
//! sees [`MeshData`].

pub mod obj;

use crate::geometry::Vec3;
use crate::unwrap_error::UnwrapError;
use std::io::{Read, Write};

/// One face: an optional group name and 1-based indices into the point list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face {
    pub group: Option<String>,
    pub indices: Vec<usize>,
}

/// Decoded mesh: an ordered point list and an ordered face list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub points: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl MeshData {
    /// Resolves the points of face `face` (0-based position in `faces`).
    pub fn face_points(&self, face: usize) -> Result<Vec<Vec3>, UnwrapError> {
        let f = self
            .faces
            .get(face)
            .ok_or_else(|| UnwrapError::MeshIoParse(format!("no face {}", face + 1)))?;
        f.indices
            .iter()
            .map(|&index| {
                index
                    .checked_sub(1)
                    .and_then(|i| self.points.get(i))
                    .copied()
                    .ok_or(UnwrapError::VertexIndexOutOfRange {
                        face: face + 1,
                        index: index as i64,
                        count: self.points.len(),
                    })
            })
            .collect()
    }
}

/// Trait for mesh readers that produce decoded mesh data.
pub trait MeshReader {
    /// Parse mesh data from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<MeshData, UnwrapError>;
}

/// Trait for mesh writers that serialize decoded mesh data.
pub trait MeshWriter {
    /// Write mesh data to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &MeshData) -> Result<(), UnwrapError>;
}
