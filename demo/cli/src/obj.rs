// Copyright 2025 Lars Brubaker
// License: MIT
//
// Minimal Wavefront OBJ reader: texture coordinates and faces only.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ObjError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// UVs and faces of an OBJ file. Face corners hold 0-based `vt` indices, or
/// `None` for a corner written without one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjMesh {
    pub uvs: Vec<[f64; 2]>,
    pub faces: Vec<Vec<Option<u32>>>,
}

impl ObjMesh {
    pub fn parse(text: &str) -> Result<Self, ObjError> {
        let mut mesh = ObjMesh::default();
        for (n, raw) in text.lines().enumerate() {
            let line = n + 1;
            let raw = raw.split('#').next().unwrap_or("");
            let mut fields = raw.split_whitespace();
            match fields.next() {
                Some("vt") => {
                    let u = parse_float(fields.next(), line)?;
                    // 1D texture coordinates are allowed; v defaults to 0.
                    let v = match fields.next() {
                        Some(f) => parse_float(Some(f), line)?,
                        None => 0.0,
                    };
                    mesh.uvs.push([u, v]);
                }
                Some("f") => {
                    let corners = fields
                        .map(|c| mesh.corner(c, line))
                        .collect::<Result<Vec<_>, _>>()?;
                    if corners.len() < 3 {
                        return Err(parse_error(line, "face with fewer than 3 corners"));
                    }
                    mesh.faces.push(corners);
                }
                _ => {}
            }
        }
        Ok(mesh)
    }

    /// Resolve the `vt` part of a `v/vt/vn` corner.
    fn corner(&self, token: &str, line: usize) -> Result<Option<u32>, ObjError> {
        let vt = match token.split('/').nth(1) {
            Some(vt) if !vt.is_empty() => vt,
            _ => return Ok(None),
        };
        let index: i64 = vt
            .parse()
            .map_err(|_| parse_error(line, &format!("bad texture index '{vt}'")))?;
        let count = self.uvs.len() as i64;
        // Negative indices count back from the last vt read so far.
        let resolved = if index < 0 { count + index } else { index - 1 };
        if index == 0 || resolved < 0 || resolved >= count {
            return Err(parse_error(
                line,
                &format!("texture index {index} out of range ({count} defined)"),
            ));
        }
        Ok(Some(resolved as u32))
    }
}

fn parse_float(field: Option<&str>, line: usize) -> Result<f64, ObjError> {
    let field = field.ok_or_else(|| parse_error(line, "missing texture coordinate"))?;
    field
        .parse()
        .map_err(|_| parse_error(line, &format!("bad texture coordinate '{field}'")))
}

fn parse_error(line: usize, message: &str) -> ObjError {
    ObjError::Parse {
        line,
        message: message.to_string(),
    }
}
