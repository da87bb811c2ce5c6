use std::time::Duration;

use anyhow::Result;
use poimap::fetch::{extract_points, OverpassClient, OverpassQuery};
use poimap::warehouse::{LocalWarehouse, Warehouse};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::FetchArgs) -> Result<()> {
    let query = OverpassQuery {
        area: args.area.clone(),
        amenity: args.amenity.clone(),
        timeout_secs: args.timeout,
    };

    // Client timeout leaves headroom over the server-side query timeout.
    let client = OverpassClient::new(&args.endpoint, Duration::from_secs(u64::from(args.timeout) + 10))?;
    let raw = client.fetch_raw(&query)?;

    let response = serde_json::from_value(raw.clone())?;
    let found = extract_points(&response).len();
    if found == 0 {
        log::warn!("[fetch] no usable points for {} in {:?}; nothing staged", args.amenity, args.area);
        return Ok(());
    }

    let mut warehouse = LocalWarehouse::open(&cli.warehouse)?;
    if !args.append {
        warehouse.truncate_raw()?;
    }
    warehouse.insert_raw(&raw)?;
    let rows = warehouse.refresh()?;

    eprintln!("Staged {rows} points into {}", warehouse.dir().display());
    Ok(())
}
