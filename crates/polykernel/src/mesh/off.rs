//! Object File Format (OFF) reader.
//!
//! Layout: optional `OFF` keyword, counts `nv nf [ne]` (on the keyword line or
//! the next one), `nv` vertex lines, then `nf` face lines `k i0 .. i(k-1)`.
//! Indices are zero-based. Trailing per-face colour values are ignored.

use super::load::MeshError;
use super::store::Mesh;

/// Parse OFF text into a mesh. Faces must have exactly three corners.
pub fn parse_off(text: &str) -> Result<Mesh, MeshError> {
    let eof_line = text.lines().count() + 1;
    // (1-based line, tokens) for every line carrying data
    let mut lines = text.lines().enumerate().filter_map(|(i, raw)| {
        let content = raw.split('#').next().unwrap_or("");
        let toks: Vec<&str> = content.split_whitespace().collect();
        (!toks.is_empty()).then_some((i + 1, toks))
    });

    let (mut line, mut toks) = lines
        .next()
        .ok_or_else(|| MeshError::format(eof_line, "empty file"))?;
    if toks[0] == "OFF" {
        toks.remove(0);
        if toks.is_empty() {
            (line, toks) = lines
                .next()
                .ok_or_else(|| MeshError::format(eof_line, "missing vertex/face counts"))?;
        }
    }
    if toks.len() < 2 {
        return Err(MeshError::format(line, "expected `nv nf [ne]`"));
    }
    let nv = parse_count(toks[0], line)?;
    let nf = parse_count(toks[1], line)?;

    // every vertex and face takes a line of its own, so the line count bounds both
    let mut mesh = Mesh::with_capacity(nv.min(eof_line), nf.min(eof_line));
    for k in 0..nv {
        let (line, toks) = lines.next().ok_or_else(|| {
            MeshError::format(eof_line, format!("expected {nv} vertices, found {k}"))
        })?;
        if toks.len() < 3 {
            return Err(MeshError::format(line, "vertex needs 3 coordinates"));
        }
        let x = parse_coord(toks[0], line)?;
        let y = parse_coord(toks[1], line)?;
        let z = parse_coord(toks[2], line)?;
        mesh.add_vertex(x, y, z);
    }

    for k in 0..nf {
        let (line, toks) = lines.next().ok_or_else(|| {
            MeshError::format(eof_line, format!("expected {nf} faces, found {k}"))
        })?;
        let arity = parse_count(toks[0], line)?;
        if arity != 3 {
            return Err(MeshError::format(
                line,
                format!("face has {arity} corners; only triangles are supported"),
            ));
        }
        if toks.len() < 4 {
            return Err(MeshError::format(line, "face lists fewer than 3 indices"));
        }
        let mut corners = [0usize; 3];
        for (slot, tok) in corners.iter_mut().zip(&toks[1..4]) {
            *slot = parse_count(tok, line)?;
        }
        mesh.add_triangle(corners).ok_or_else(|| {
            MeshError::format(line, format!("face index outside 0..{nv}"))
        })?;
    }
    Ok(mesh)
}

fn parse_count(tok: &str, line: usize) -> Result<usize, MeshError> {
    tok.parse::<usize>()
        .map_err(|_| MeshError::format(line, format!("expected a non-negative integer, got `{tok}`")))
}

fn parse_coord(tok: &str, line: usize) -> Result<f64, MeshError> {
    tok.parse::<f64>()
        .map_err(|_| MeshError::format(line, format!("bad coordinate `{tok}`")))
}
