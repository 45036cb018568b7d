mod provenance;
mod report;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use polykernel::api::{kernel_point_of, load, log_mesh, KernelCfg, KernelPoint, LpCfg};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::provenance::write_sidecar;
use crate::report::{write_table, Record};

#[derive(Parser, Debug)]
#[command(name = "kernel-point")]
#[command(about = "Find a point inside the kernel of closed triangle meshes (OBJ/OFF)")]
struct Cmd {
    /// Mesh files; a `.off` suffix selects OFF, anything else is read as OBJ
    #[arg(required = true, value_name = "MESH")]
    paths: Vec<PathBuf>,

    /// Print one JSON object per mesh instead of the text report
    #[arg(long)]
    json: bool,

    /// Write a results table (CSV, or Parquet for `.parquet`) plus a provenance sidecar
    #[arg(long, value_name = "PATH")]
    table: Option<PathBuf>,

    /// Write the (single) input mesh back out in OFF
    #[arg(long, value_name = "OFF")]
    write_off: Option<PathBuf>,

    /// Seed of the LP constraint shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Skip neighbour and inversion winding checks
    #[arg(long)]
    no_winding_check: bool,

    /// Debug logging on stderr
    #[arg(long, short)]
    verbose: bool,
}

impl Cmd {
    fn kernel_cfg(&self) -> KernelCfg {
        let defaults = KernelCfg::default();
        KernelCfg {
            lp: LpCfg {
                seed: self.seed.unwrap_or(defaults.lp.seed),
                ..defaults.lp
            },
            check_winding: !self.no_winding_check,
            ..defaults
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::WARN };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if cmd.write_off.is_some() && cmd.paths.len() != 1 {
        bail!("--write-off takes exactly one input mesh");
    }
    let cfg = cmd.kernel_cfg();
    let records = run(&cmd, &cfg)?;

    if let Some(table) = &cmd.table {
        write_table(table, &records)?;
        let params = json!({
            "seed": cfg.lp.seed,
            "check_winding": cfg.check_winding,
            "eps_feas": cfg.lp.eps_feas,
            "eps_degenerate": cfg.eps_degenerate,
        });
        write_sidecar(table, params, &cmd.paths)?;
    }

    let failed = records.iter().filter(|r| r.status == "error").count();
    if failed > 0 {
        bail!("{failed} of {} meshes failed", records.len());
    }
    Ok(())
}

/// Query every mesh in order; failures are recorded, not fatal.
fn run(cmd: &Cmd, cfg: &KernelCfg) -> Result<Vec<Record>> {
    let mut records = Vec::with_capacity(cmd.paths.len());
    for path in &cmd.paths {
        let start = Instant::now();
        let outcome = query(path, cfg, cmd.write_off.as_deref());
        let millis = start.elapsed().as_millis() as u64;
        let record = match outcome {
            Ok((kp, faces)) => {
                if !cmd.json {
                    println!("{kp}");
                    println!("Time taken: {millis} ms");
                }
                Record::solved(path, &kp, faces, millis)
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "{err:#}");
                Record::failed(path, &err, millis)
            }
        };
        if cmd.json {
            println!("{}", serde_json::to_string(&record)?);
        }
        records.push(record);
    }
    Ok(records)
}

/// Load, optionally re-export, and solve one mesh. Returns the result and face count.
fn query(
    path: &Path,
    cfg: &KernelCfg,
    write_off: Option<&Path>,
) -> Result<(KernelPoint, usize)> {
    let mesh = load(path)?;
    log_mesh(path, &mesh);
    if let Some(out) = write_off {
        mesh.write_off(out)
            .with_context(|| format!("writing {}", out.display()))?;
        tracing::info!(path = %out.display(), "mesh written as OFF");
    }
    let kp = kernel_point_of(&mesh, cfg).with_context(|| format!("{}", path.display()))?;
    Ok((kp, mesh.num_triangles()))
}
