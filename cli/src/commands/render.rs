use std::io::Write;

use anyhow::{Context, Result};
use poimap::warehouse::{LocalWarehouse, Warehouse};
use poimap::{Controls, MapSession};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let mut warehouse = LocalWarehouse::open(&cli.warehouse)?;
    let records = warehouse.select_points()?;

    let controls = Controls {
        mode: args.mode.clone(),
        map_style: args.map_style.clone(),
        search: args.search.clone(),
        buffer_meters: args.buffer_meters,
        hex_resolution: args.resolution,
        heatmap_radius: args.heatmap_radius,
        heatmap_intensity: args.heatmap_intensity,
        heatmap_opacity: args.heatmap_opacity,
    };

    let mut session = MapSession::new();
    let value = session.render_pass(&records, &controls)?.to_json();
    log::info!("[render] total records: {}", session.total_records());

    let bytes = if args.pretty { serde_json::to_vec_pretty(&value)? } else { serde_json::to_vec(&value)? };

    match &args.output {
        Some(path) => std::fs::write(path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
