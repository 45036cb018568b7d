//! File entry point: pick a parser by extension and read the file.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::obj::parse_obj;
use super::off::parse_off;
use super::store::Mesh;

/// Errors surfaced while loading a mesh.
#[derive(Debug)]
pub enum MeshError {
    /// The file could not be opened or read.
    Io { path: PathBuf, source: io::Error },
    /// The content does not follow the OBJ/OFF grammar (1-based line).
    Format { line: usize, reason: String },
}

impl MeshError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "cannot read {}", path.display()),
            Self::Format { line, reason } => write!(f, "malformed mesh at line {line}: {reason}"),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { .. } => None,
        }
    }
}

/// Supported text formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Off,
}

impl MeshFormat {
    /// `.off` (case-sensitive) selects OFF; everything else is tried as OBJ.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(".off") {
            Self::Off
        } else {
            Self::Obj
        }
    }

    pub fn parse(self, text: &str) -> Result<Mesh, MeshError> {
        match self {
            Self::Obj => parse_obj(text),
            Self::Off => parse_off(text),
        }
    }
}

/// Read and parse the mesh at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    MeshFormat::from_path(path).parse(&text)
}
