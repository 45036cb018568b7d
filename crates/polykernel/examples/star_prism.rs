//! Kernel-query timing probe on extruded star polygons.
//!
//! A regular star prism is non-convex but star-shaped about its axis, so the
//! query always finds a point; the face count grows linearly with the number
//! of spikes. Prints one line per size with the point and wall-clock times.

use std::time::Instant;

use polykernel::prelude::*;

/// Star with `spikes` outer corners at radius 1 and inner corners at `inner`,
/// extruded from `z = 0` to `z = height`, faces wound outward.
fn star_prism(spikes: usize, inner: f64, height: f64) -> Mesh {
    let ring = 2 * spikes;
    let mut mesh = Mesh::with_capacity(2 * ring + 2, 4 * ring);
    for z in [0.0, height] {
        for i in 0..ring {
            let angle = std::f64::consts::PI * i as f64 / spikes as f64;
            let r = if i % 2 == 0 { 1.0 } else { inner };
            mesh.add_vertex(r * angle.cos(), r * angle.sin(), z);
        }
    }
    let bottom = mesh.add_vertex(0.0, 0.0, 0.0).0;
    let top = mesh.add_vertex(0.0, 0.0, height).0;
    for i in 0..ring {
        let j = (i + 1) % ring;
        let (p, q) = (i, j);
        let (pt, qt) = (ring + i, ring + j);
        mesh.add_triangle([bottom, q, p]);
        mesh.add_triangle([top, pt, qt]);
        mesh.add_triangle([p, q, qt]);
        mesh.add_triangle([p, qt, pt]);
    }
    mesh
}

fn main() {
    let cfg = KernelCfg::default();
    for spikes in [5, 50, 500, 5000] {
        let mesh = star_prism(spikes, 0.4, 0.5);
        let start = Instant::now();
        let kp = kernel_point_of(&mesh, &cfg).expect("star prism is a valid solid");
        let ms = start.elapsed().as_secs_f64() * 1e3;
        println!(
            "spikes={spikes} faces={} status={} point={:?} time_ms={ms:.3}",
            mesh.num_triangles(),
            kp.status(),
            kp.point().map(|p| [p.x, p.y, p.z]),
        );
    }
}
