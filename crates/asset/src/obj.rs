//! OBJ parser for triangulated meshes with positions, normals and texture coordinates.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{
    error::{Attribute, ObjError},
    mesh::MeshData,
    wireframe::wireframe_indices,
};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.display()))?;
    let mesh = load_obj_from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load OBJ file: {}", path.display()))?;

    log::debug!(
        "Loaded {}: {} vertices, {} triangles, {} edges, bounds={:?}",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.edge_count(),
        mesh.bounds(),
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<MeshData> {
    let mut parser = ObjParser::default();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        parser.parse_line(&line, line_no + 1)?;
    }
    Ok(parser.finish()?)
}

/// Parse OBJ text that is already in memory.
pub fn parse_obj_str(contents: &str) -> Result<MeshData, ObjError> {
    let mut parser = ObjParser::default();
    for (line_no, line) in contents.lines().enumerate() {
        parser.parse_line(line, line_no + 1)?;
    }
    parser.finish()
}

/// Identity of a face corner: 0-based (position, texcoord, normal).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct CornerKey {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

#[derive(Default)]
struct ObjParser {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    /// Flat, `texcoord_width` floats per record.
    texcoords: Vec<f32>,
    texcoord_width: usize,

    unique: HashMap<CornerKey, u32>,
    mesh: MeshData,
}

impl ObjParser {
    fn parse_line(&mut self, line: &str, line_no: usize) -> Result<(), ObjError> {
        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            return Ok(());
        };

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                self.positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                let w = parts
                    .next()
                    .map(|token| parse_f32(Some(token), line_no, "w coordinate"))
                    .transpose()?;
                match w {
                    Some(w) => self.push_texcoord(&[u, v, w], line_no)?,
                    None => self.push_texcoord(&[u, v], line_no)?,
                }
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                self.normals.push([nx, ny, nz]);
            }
            "f" => {
                let corners: Vec<&str> = parts.collect();
                if corners.len() != 3 {
                    return Err(ObjError::NonTriangularFace {
                        line: line_no,
                        corners: corners.len(),
                    });
                }
                for corner in corners {
                    let key = self.parse_corner(corner, line_no)?;
                    let slot = self.slot_for(key)?;
                    self.mesh.indices.push(slot);
                }
            }
            _ => {
                // Ignore other directives (#/o/g/s/usemtl/mtllib/etc.)
            }
        }

        Ok(())
    }

    fn push_texcoord(&mut self, record: &[f32], line_no: usize) -> Result<(), ObjError> {
        if self.texcoord_width == 0 {
            self.texcoord_width = record.len();
            // Vertices emitted before the first `vt` get zeroed texcoords.
            let filled = self.mesh.vertex_count() * self.texcoord_width;
            self.mesh.texcoords.resize(filled, 0.0);
        } else if record.len() != self.texcoord_width {
            return Err(ObjError::TexcoordWidthMismatch {
                line: line_no,
                expected: self.texcoord_width,
                found: record.len(),
            });
        }
        self.texcoords.extend_from_slice(record);
        Ok(())
    }

    fn texcoord_count(&self) -> usize {
        match self.texcoord_width {
            0 => 0,
            w => self.texcoords.len() / w,
        }
    }

    fn parse_corner(&self, token: &str, line_no: usize) -> Result<CornerKey, ObjError> {
        let malformed = || ObjError::MalformedCorner {
            line: line_no,
            token: token.to_owned(),
        };

        if token.matches('/').count() > 2 {
            return Err(malformed());
        }

        let mut fields = token.split('/');
        let position = match fields.next() {
            Some(value) if !value.is_empty() => value,
            _ => return Err(malformed()),
        };
        let position = resolve_index(position, Attribute::Position, self.positions.len(), line_no)?;

        let texcoord = match fields.next() {
            Some(value) if !value.is_empty() => Some(resolve_index(
                value,
                Attribute::Texcoord,
                self.texcoord_count(),
                line_no,
            )?),
            _ => None,
        };

        let normal = match fields.next() {
            Some(value) if !value.is_empty() => Some(resolve_index(
                value,
                Attribute::Normal,
                self.normals.len(),
                line_no,
            )?),
            _ => None,
        };

        Ok(CornerKey {
            position,
            texcoord,
            normal,
        })
    }

    /// Output slot for `key`, allocating and filling a new vertex on first use.
    fn slot_for(&mut self, key: CornerKey) -> Result<u32, ObjError> {
        if let Some(&slot) = self.unique.get(&key) {
            return Ok(slot);
        }

        let slot = u32::try_from(self.mesh.vertex_count()).map_err(|_| ObjError::TooManyVertices)?;

        self.mesh.positions.extend_from_slice(&self.positions[key.position]);

        let normal = key.normal.map_or([0.0; 3], |i| self.normals[i]);
        self.mesh.normals.extend_from_slice(&normal);

        let width = self.texcoord_width;
        match key.texcoord {
            Some(i) => self
                .mesh
                .texcoords
                .extend_from_slice(&self.texcoords[i * width..(i + 1) * width]),
            None => {
                let filled = self.mesh.texcoords.len() + width;
                self.mesh.texcoords.resize(filled, 0.0);
            }
        }

        self.unique.insert(key, slot);
        Ok(slot)
    }

    fn finish(mut self) -> Result<MeshData, ObjError> {
        if self.mesh.indices.is_empty() {
            return Err(ObjError::NoTriangles);
        }
        self.mesh.texcoord_width = self.texcoord_width;
        self.mesh.wireframe_indices = wireframe_indices(&self.mesh.indices);
        Ok(self.mesh)
    }
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &'static str) -> Result<f32, ObjError> {
    let token = value.ok_or(ObjError::MissingComponent {
        line: line_no,
        what,
    })?;
    match token.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ObjError::InvalidNumber {
            line: line_no,
            token: token.to_owned(),
        }),
    }
}

/// Convert a 1-based OBJ reference into a 0-based index below `count`.
fn resolve_index(
    token: &str,
    attribute: Attribute,
    count: usize,
    line_no: usize,
) -> Result<usize, ObjError> {
    let raw = token.parse::<i64>().map_err(|_| ObjError::InvalidNumber {
        line: line_no,
        token: token.to_owned(),
    })?;

    match raw {
        0 => Err(ObjError::ZeroIndex { line: line_no }),
        r if r < 0 => Err(ObjError::RelativeIndex {
            line: line_no,
            index: r,
        }),
        r if (r as u64) > count as u64 => Err(ObjError::IndexOutOfRange {
            line: line_no,
            attribute,
            index: r,
            count,
        }),
        r => Ok((r - 1) as usize),
    }
}
