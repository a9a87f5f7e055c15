//! Roadline demo: loads a path asset, drives a tracker along it and builds the road mesh.
//!
//! Usage:
//! ```text
//! cargo run --example road_demo                      # built-in loop
//! cargo run --example road_demo -- path/to/road.json # asset from disk
//! RUST_LOG=roadline=debug cargo run --example road_demo
//! ```

use std::error::Error;

use roadline::math::Point3;
use roadline::{ArcTracker, CurvePath, PathAsset, RibbonMeshBuilder, RibbonStyle};
use tracing::info;

const BUILTIN_ASSET: &str = r#"{
    "handles": [
        { "position": [0, 0, 0], "control0": [0, 0, 0], "control1": [0, 0, 0], "is_corner": true },
        { "position": [30, 0, 0], "control0": [24, 0, 0], "control1": [36, 0, 0] },
        { "position": [40, 20, 0], "control0": [40, 14, 0], "control1": [40, 26, 0] },
        { "position": [20, 40, 0], "control0": [20, 40, 0], "control1": [20, 40, 0], "is_corner": true },
        { "position": [0, 40, 0], "control0": [0, 40, 0], "control1": [0, 40, 0], "is_corner": true }
    ],
    "divisions": 24
}"#;

/// Distance an agent covers per simulated frame.
const STEP: f64 = 2.5;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for the demo and roadline.
    // Override with RUST_LOG env var (e.g. RUST_LOG=roadline=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("road_demo=info".parse().unwrap_or_default())
        .add_directive("roadline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let json = match std::env::args().nth(1) {
        Some(file) => std::fs::read_to_string(file)?,
        None => BUILTIN_ASSET.to_owned(),
    };
    let mut path = CurvePath::from_asset(PathAsset::from_json(&json)?)?;
    info!(handles = path.handles().len(), divisions = path.divisions(), "loaded path");

    for reverse in [false, true] {
        let mut tracker = ArcTracker::new(&path, reverse)?;
        let mut frames = 0;
        while !tracker.is_end() {
            let pose = tracker.step(STEP)?;
            frames += 1;
            tracing::debug!(frames, x = pose.position.x, y = pose.position.y, "agent moved");
        }
        info!(
            reverse,
            frames,
            length = tracker.total_length(),
            "agent reached the end of the road"
        );
    }

    let builder = RibbonMeshBuilder::new(RibbonStyle::default())?;
    let mesh = builder.generate_for_path(&path)?;
    report("initial mesh", &mesh);

    path.subscribe(move |p| match builder.generate_for_path(p) {
        Ok(mesh) => report("rebuilt mesh", &mesh),
        Err(e) => tracing::warn!(error = %e, "mesh rebuild failed"),
    });
    path.move_handle(2, Point3::new(50.0, 25.0, 0.0))?;
    path.toggle_corner(1)?;

    Ok(())
}

fn report(label: &str, mesh: &roadline::RibbonMesh) {
    let (min, max) = mesh
        .bounds
        .map_or(([0.0; 3], [0.0; 3]), |b| ([b.min.x, b.min.y, b.min.z], [b.max.x, b.max.y, b.max.z]));
    info!(
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        ?min,
        ?max,
        "{label}"
    );
}
