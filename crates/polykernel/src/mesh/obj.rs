//! Wavefront OBJ reader (geometry only: `v` and `f` records).

use super::load::MeshError;
use super::store::Mesh;

/// Parse OBJ text. Unknown record types are skipped.
pub fn parse_obj(text: &str) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("");
        let mut tokens = content.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let mut xyz = [0.0; 3];
                for slot in &mut xyz {
                    let tok = tokens
                        .next()
                        .ok_or_else(|| MeshError::format(line, "vertex needs 3 coordinates"))?;
                    *slot = parse_coord(tok, line)?;
                }
                mesh.add_vertex(xyz[0], xyz[1], xyz[2]);
            }
            Some("f") => {
                let refs: Vec<&str> = tokens.collect();
                if refs.len() != 3 {
                    return Err(MeshError::format(
                        line,
                        format!("face has {} corners; only triangles are supported", refs.len()),
                    ));
                }
                let n = mesh.num_vertices();
                let mut corners = [0usize; 3];
                for (slot, r) in corners.iter_mut().zip(refs) {
                    *slot = resolve_index(r, n, line)?;
                }
                mesh.add_triangle(corners)
                    .ok_or_else(|| MeshError::format(line, "face index out of range"))?;
            }
            _ => {}
        }
    }
    Ok(mesh)
}

fn parse_coord(tok: &str, line: usize) -> Result<f64, MeshError> {
    tok.parse::<f64>()
        .map_err(|_| MeshError::format(line, format!("bad coordinate `{tok}`")))
}

/// Resolve `i`, `i/t`, `i//n` or `i/t/n` against `n` vertices defined so far.
///
/// Positive indices are 1-based; negative ones count back from the newest vertex.
fn resolve_index(r: &str, n: usize, line: usize) -> Result<usize, MeshError> {
    let head = r.split('/').next().unwrap_or("");
    let i: i64 = head
        .parse()
        .map_err(|_| MeshError::format(line, format!("bad vertex reference `{r}`")))?;
    let resolved = if i > 0 {
        i - 1
    } else if i < 0 {
        n as i64 + i
    } else {
        return Err(MeshError::format(line, "vertex index 0 (OBJ indices start at 1)"));
    };
    if resolved < 0 || resolved as usize >= n {
        return Err(MeshError::format(
            line,
            format!("vertex reference `{r}` outside 1..={n}"),
        ));
    }
    Ok(resolved as usize)
}
