//! Per-mesh results: console lines, JSON records and the batch table.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use polykernel::api::KernelPoint;
use serde::Serialize;

/// Outcome of one mesh in a run.
#[derive(Clone, Debug, Serialize)]
pub struct Record {
    pub path: String,
    /// `found`, `infeasible`, `unbounded` or `error`.
    pub status: String,
    pub point: Option<[f64; 3]>,
    pub faces: Option<usize>,
    pub millis: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Record {
    pub fn solved(path: &Path, kp: &KernelPoint, faces: usize, millis: u64) -> Self {
        Self {
            path: path.display().to_string(),
            status: kp.status().to_string(),
            point: kp.point().map(|p| [p.x, p.y, p.z]),
            faces: Some(faces),
            millis,
            error: None,
        }
    }

    pub fn failed(path: &Path, err: &anyhow::Error, millis: u64) -> Self {
        Self {
            path: path.display().to_string(),
            status: "error".to_string(),
            point: None,
            faces: None,
            millis,
            error: Some(format!("{err:#}")),
        }
    }
}

/// Columns `path, status, x, y, z, faces, millis`; one row per record.
pub fn to_frame(records: &[Record]) -> PolarsResult<DataFrame> {
    let coord = |i: usize| -> Vec<Option<f64>> {
        records.iter().map(|r| r.point.map(|p| p[i])).collect()
    };
    let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
    let status: Vec<&str> = records.iter().map(|r| r.status.as_str()).collect();
    let faces: Vec<Option<u64>> = records.iter().map(|r| r.faces.map(|f| f as u64)).collect();
    let millis: Vec<u64> = records.iter().map(|r| r.millis).collect();
    DataFrame::new(vec![
        Series::new("path".into(), paths),
        Series::new("status".into(), status),
        Series::new("x".into(), coord(0)),
        Series::new("y".into(), coord(1)),
        Series::new("z".into(), coord(2)),
        Series::new("faces".into(), faces),
        Series::new("millis".into(), millis),
    ])
}

/// Write the batch table, creating parent directories.
///
/// A `.parquet` suffix selects Parquet; anything else is written as CSV.
pub fn write_table(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating table dir {}", parent.display()))?;
        }
    }
    let mut df = to_frame(records)?;
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if path.extension().is_some_and(|e| e == "parquet") {
        ParquetWriter::new(&mut file)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    tracing::info!(path = %path.display(), rows = df.height(), "table written");
    Ok(())
}
