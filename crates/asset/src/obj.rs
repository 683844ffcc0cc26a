//! OBJ parser for the `v`/`vn`/`vt`/`f` subset.
//!
//! Produces a [`RawMesh`]: attribute arrays plus 0-based index streams with
//! quads already split into two triangles. Indices are only recorded here;
//! bounds are checked when the mesh is normalized.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
};

use crate::error::{MeshError, MeshResult};
use crate::mesh::RawMesh;

/// Corner order emitted for a triangle face.
const TRIANGLE: [usize; 3] = [0, 1, 2];
/// Corner order emitted for a quad face, split along the 0-2 diagonal.
const QUAD: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Parse an OBJ file from a path.
pub fn parse_obj_path(path: impl AsRef<Path>) -> MeshResult<RawMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MeshError::File {
        path: Some(path.to_path_buf()),
        source,
    })?;
    parse_obj(BufReader::new(file), Some(path))
}

/// Parse OBJ records from a [`BufRead`] implementation.
pub fn parse_obj_reader<R: BufRead>(reader: R) -> MeshResult<RawMesh> {
    parse_obj(reader, None)
}

/// Convenience helper to parse an OBJ string literal.
pub fn parse_obj_str(contents: &str) -> MeshResult<RawMesh> {
    parse_obj(io::Cursor::new(contents), None)
}

fn parse_obj<R: BufRead>(reader: R, path: Option<&Path>) -> MeshResult<RawMesh> {
    let mut builder = Builder::default();

    for (line_no, line) in reader.lines().enumerate() {
        let text = line.map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => MeshError::Parse {
                line: line_no + 1,
                content: String::new(),
                reason: format!("line is not valid UTF-8: {source}"),
            },
            _ => MeshError::File {
                path: path.map(Path::to_path_buf),
                source,
            },
        })?;
        builder.record(&Line {
            no: line_no + 1,
            text: text.trim(),
        })?;
    }

    if builder.ignored > 0 {
        log::debug!("Ignored {} unsupported OBJ directives", builder.ignored);
    }
    Ok(builder.mesh)
}

/// One source line, kept around for error reporting.
struct Line<'a> {
    no: usize,
    text: &'a str,
}

impl Line<'_> {
    fn error(&self, reason: impl Into<String>) -> MeshError {
        MeshError::Parse {
            line: self.no,
            content: self.text.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Which optional components a face corner carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout {
    texcoord: bool,
    normal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Corner {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

impl Corner {
    fn layout(&self) -> Layout {
        Layout {
            texcoord: self.texcoord.is_some(),
            normal: self.normal.is_some(),
        }
    }
}

#[derive(Default)]
struct Builder {
    mesh: RawMesh,
    // Set by the first face; every later face must match it.
    layout: Option<Layout>,
    ignored: usize,
}

impl Builder {
    fn record(&mut self, line: &Line<'_>) -> MeshResult<()> {
        let mut parts = line.text.split_whitespace();
        let Some(tag) = parts.next() else {
            return Ok(());
        };

        match tag {
            "v" => {
                let [x, y, z] = parse_floats::<3>(parts, line, "vertex position")?;
                self.mesh.positions.push([x, y, z]);
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(parts, line, "vertex normal")?;
                self.mesh.normals.push([x, y, z]);
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(parts, line, "texture coordinate")?;
                self.mesh.texcoords.push([u, v]);
            }
            "f" => {
                let corners = parts
                    .map(|token| parse_corner(token, line))
                    .collect::<MeshResult<Vec<_>>>()?;
                self.push_face(&corners, line)?;
            }
            _ => {
                // Comments, groups, materials, smoothing, ...
                self.ignored += 1;
            }
        }
        Ok(())
    }

    fn push_face(&mut self, corners: &[Corner], line: &Line<'_>) -> MeshResult<()> {
        let order: &[usize] = match corners.len() {
            3 => &TRIANGLE,
            4 => &QUAD,
            n => {
                return Err(line.error(format!(
                    "face has {n} corners; only triangles and quads are supported"
                )));
            }
        };

        let layout = corners[0].layout();
        if corners.iter().any(|c| c.layout() != layout) {
            return Err(line.error("face corners mix attribute layouts"));
        }
        match self.layout {
            None => {
                self.layout = Some(layout);
                if layout.texcoord {
                    self.mesh.texcoord_indices = Some(Vec::new());
                }
                if layout.normal {
                    self.mesh.normal_indices = Some(Vec::new());
                }
            }
            Some(expected) if expected != layout => {
                return Err(line.error("face attribute layout differs from earlier faces"));
            }
            Some(_) => {}
        }

        for &i in order {
            let corner = corners[i];
            self.mesh.position_indices.push(corner.position);
            if let (Some(stream), Some(t)) = (self.mesh.texcoord_indices.as_mut(), corner.texcoord)
            {
                stream.push(t);
            }
            if let (Some(stream), Some(n)) = (self.mesh.normal_indices.as_mut(), corner.normal) {
                stream.push(n);
            }
        }
        Ok(())
    }
}

fn parse_floats<const N: usize>(
    mut parts: SplitWhitespace<'_>,
    line: &Line<'_>,
    what: &str,
) -> MeshResult<[f32; N]> {
    let mut out = [0.0_f32; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = parts
            .next()
            .ok_or_else(|| line.error(format!("{what} needs {N} components, found {i}")))?;
        let value = token
            .parse::<f32>()
            .map_err(|e| line.error(format!("invalid {what} component '{token}': {e}")))?;
        if !value.is_finite() {
            return Err(line.error(format!("non-finite {what} component '{token}'")));
        }
        *slot = value;
    }
    if parts.next().is_some() {
        return Err(line.error(format!("{what} takes exactly {N} components")));
    }
    Ok(out)
}

/// Parse a corner descriptor: `p`, `p/t`, `p/t/n` or `p//n`.
fn parse_corner(token: &str, line: &Line<'_>) -> MeshResult<Corner> {
    let mut split = token.split('/');
    let position = match split.next() {
        Some(value) if !value.is_empty() => parse_index(value, line)?,
        _ => return Err(line.error(format!("face element '{token}' has no position index"))),
    };

    let texcoord = match split.next() {
        Some(value) if !value.is_empty() => Some(parse_index(value, line)?),
        _ => None,
    };

    let normal = match split.next() {
        Some(value) if !value.is_empty() => Some(parse_index(value, line)?),
        _ => None,
    };

    if split.next().is_some() {
        return Err(line.error(format!("face element '{token}' has too many components")));
    }

    Ok(Corner {
        position,
        texcoord,
        normal,
    })
}

/// Convert a 1-based OBJ index to 0-based.
fn parse_index(token: &str, line: &Line<'_>) -> MeshResult<usize> {
    let raw = token
        .parse::<i64>()
        .map_err(|_| line.error(format!("invalid index '{token}'")))?;
    if raw == 0 {
        return Err(line.error("OBJ indices are 1-based; found 0"));
    }
    if raw < 0 {
        return Err(line.error(format!("relative index {raw} is not supported")));
    }
    usize::try_from(raw - 1).map_err(|_| line.error(format!("index {raw} is too large")))
}
