//! Wavefront `.obj` reader and writer.
//!
//! # Supported statements
//! - `v x y z` points (a fourth `w` component is ignored).
//! - `f a b c ...` faces. Each token may be `i`, `i/t`, `i/t/n` or `i//n`; only
//!   the point index is kept. Negative indices count back from the last point
//!   read so far.
//! - `g name ...` sets the group of the following faces; a bare `g` clears it.
//!
//! # Limitations
//! - Texture coordinates, normals, materials and smoothing groups are skipped.
//! - Lines ending in `\` are not joined.

use crate::geometry::Vec3;
use crate::io::{Face, MeshData, MeshReader, MeshWriter};
use crate::unwrap_error::UnwrapError;
use std::io::{Read, Write};

/// `.obj` reader.
#[derive(Debug, Default, Clone)]
pub struct ObjReader;

/// Per-read parser state; a group set in one file never leaks into another.
#[derive(Debug, Default)]
struct ObjParseState {
    group: Option<String>,
    mesh: MeshData,
}

impl ObjReader {
    fn parse_coord(raw: Option<&str>, axis: char, line_no: usize) -> Result<f64, UnwrapError> {
        let raw = raw.ok_or_else(|| {
            UnwrapError::MeshIoParse(format!("line {line_no}: missing {axis} coordinate"))
        })?;
        raw.parse::<f64>().map_err(|_| {
            UnwrapError::MeshIoParse(format!("line {line_no}: invalid coordinate: {raw}"))
        })
    }

    fn parse_index(
        token: &str,
        point_count: usize,
        face: usize,
        line_no: usize,
    ) -> Result<usize, UnwrapError> {
        let raw = token.split('/').next().unwrap_or_default();
        let index = raw.parse::<i64>().map_err(|_| {
            UnwrapError::MeshIoParse(format!("line {line_no}: invalid point index: {token}"))
        })?;
        match index {
            0 => Err(UnwrapError::MeshIoParse(format!(
                "line {line_no}: point index 0 is invalid"
            ))),
            i if i > 0 => usize::try_from(i).map_err(|_| {
                UnwrapError::MeshIoParse(format!("line {line_no}: point index too large: {i}"))
            }),
            i => {
                let back = usize::try_from(i.unsigned_abs()).unwrap_or(usize::MAX);
                (point_count + 1)
                    .checked_sub(back)
                    .filter(|&resolved| resolved > 0)
                    .ok_or(UnwrapError::VertexIndexOutOfRange {
                        face,
                        index: i,
                        count: point_count,
                    })
            }
        }
    }

    fn process_line(
        state: &mut ObjParseState,
        line: &str,
        line_no: usize,
    ) -> Result<(), UnwrapError> {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            return Ok(());
        };
        match keyword {
            "v" => {
                let x = Self::parse_coord(parts.next(), 'x', line_no)?;
                let y = Self::parse_coord(parts.next(), 'y', line_no)?;
                let z = Self::parse_coord(parts.next(), 'z', line_no)?;
                state.mesh.points.push(Vec3::new(x, y, z));
            }
            "f" => {
                let face = state.mesh.faces.len() + 1;
                let point_count = state.mesh.points.len();
                let indices = parts
                    .map(|token| Self::parse_index(token, point_count, face, line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                state.mesh.faces.push(Face {
                    group: state.group.clone(),
                    indices,
                });
            }
            "g" => {
                let name = parts.collect::<Vec<_>>().join(" ");
                state.group = (!name.is_empty()).then_some(name);
            }
            "vt" | "vn" | "vp" | "o" | "s" | "usemtl" | "mtllib" | "l" => {}
            k if k.starts_with('#') => {}
            other => {
                log::warn!("obj: line {line_no}: skipping unsupported statement `{other}`");
            }
        }
        Ok(())
    }
}

impl MeshReader for ObjReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<MeshData, UnwrapError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let mut state = ObjParseState::default();
        for (i, line) in contents.lines().enumerate() {
            Self::process_line(&mut state, line, i + 1)?;
        }
        log::debug!(
            "obj: read {} points and {} faces",
            state.mesh.points.len(),
            state.mesh.faces.len()
        );
        Ok(state.mesh)
    }
}

/// `.obj` writer. Header lines are written as `#` comments.
#[derive(Debug, Default, Clone)]
pub struct ObjWriter {
    pub header: Vec<String>,
}

impl ObjWriter {
    pub fn with_header<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl MeshWriter for ObjWriter {
    fn write<W: Write>(&self, mut writer: W, mesh: &MeshData) -> Result<(), UnwrapError> {
        if self.header.is_empty() {
            writeln!(writer, "# Generated by mesh-unwrap")?;
        }
        for line in &self.header {
            writeln!(writer, "# {line}")?;
        }

        for p in &mesh.points {
            writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
        }

        let mut group: Option<&str> = None;
        for face in &mesh.faces {
            let face_group = face.group.as_deref();
            if face_group != group {
                match face_group {
                    Some(name) => writeln!(writer, "g {name}")?,
                    None => writeln!(writer, "g")?,
                }
                group = face_group;
            }
            write!(writer, "f")?;
            for index in &face.indices {
                write!(writer, " {index}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_SIDE: &str = "\
# two faces of a cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0.5 0.5
g front face
f 1/1 2/1 3/1 4/1
g
f -4//1 -3//1 -2//1
";

    #[test]
    fn reads_points_faces_and_groups() {
        let mesh = ObjReader.read(CUBE_SIDE.as_bytes()).unwrap();
        assert_eq!(mesh.points.len(), 4);
        assert_eq!(mesh.points[2], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.faces[0].group.as_deref(), Some("front face"));
        assert_eq!(mesh.faces[0].indices, vec![1, 2, 3, 4]);
        assert_eq!(mesh.faces[1].group, None);
        assert_eq!(mesh.faces[1].indices, vec![1, 2, 3]);
    }

    #[test]
    fn group_does_not_leak_between_reads() {
        let first = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng left\nf 1 2 3\n";
        let second = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        ObjReader.read(first.as_bytes()).unwrap();
        let mesh = ObjReader.read(second.as_bytes()).unwrap();
        assert_eq!(mesh.faces[0].group, None);
    }

    #[test]
    fn rejects_bad_input() {
        let bad_coord = ObjReader.read("v 0 zero 0\n".as_bytes()).unwrap_err();
        assert!(matches!(bad_coord, UnwrapError::MeshIoParse(_)));

        let zero_index = ObjReader.read("v 0 0 0\nf 0 1 1\n".as_bytes()).unwrap_err();
        assert!(matches!(zero_index, UnwrapError::MeshIoParse(_)));

        let far_back = ObjReader.read("v 0 0 0\nf -2 -1 -1\n".as_bytes()).unwrap_err();
        assert!(matches!(
            far_back,
            UnwrapError::VertexIndexOutOfRange { face: 1, index: -2, count: 1 }
        ));
    }

    #[test]
    fn writer_emits_header_points_and_group_changes() {
        let mesh = MeshData {
            points: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.5, 0.0, 0.0),
                Vec3::new(0.0, 2.0, -1.0),
            ],
            faces: vec![
                Face {
                    group: Some("1".into()),
                    indices: vec![1, 2, 3],
                },
                Face {
                    group: Some("1".into()),
                    indices: vec![3, 2, 1],
                },
            ],
        };
        let mut out = Vec::new();
        ObjWriter::default().write(&mut out, &mesh).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "# Generated by mesh-unwrap\nv 0 0 0\nv 1.5 0 0\nv 0 2 -1\ng 1\nf 1 2 3\nf 3 2 1\n"
        );

        let reread = ObjReader.read(text.as_bytes()).unwrap();
        assert_eq!(reread, mesh);
    }

    #[test]
    fn custom_header_replaces_default() {
        let mut out = Vec::new();
        ObjWriter::with_header(["layout", "page 1"])
            .write(&mut out, &MeshData::default())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# layout\n# page 1\n");
    }
}
