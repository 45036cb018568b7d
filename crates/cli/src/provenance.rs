//! `<stem>.provenance.json` sidecars next to written tables.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde_json::{json, Value};

/// Write `<stem>.provenance.json` next to `artifact`: code revision, crate
/// version, run parameters, the mesh files read and the artifact itself.
pub fn write_sidecar(artifact: &Path, params: Value, inputs: &[PathBuf]) -> Result<PathBuf> {
    let sidecar = sidecar_path(artifact);
    let doc = json!({
        "code_rev": current_git_rev(),
        "polykernel": polykernel::VERSION,
        "params": params,
        "inputs": inputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "outputs": [artifact.display().to_string()],
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    tracing::debug!(path = %sidecar.display(), "provenance written");
    Ok(sidecar)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("table"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit of the build (`GIT_COMMIT` at compile or run time), else `git rev-parse HEAD`.
fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
