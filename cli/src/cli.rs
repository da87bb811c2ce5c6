use std::path::PathBuf;

/// Point-of-interest fetch, staging and map layer CLI
#[derive(clap::Parser, Debug)]
#[command(name = "poimap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Local warehouse directory
    #[arg(long, global = true, env = "POIMAP_WAREHOUSE_DIR", default_value = "warehouse",
          value_hint = clap::ValueHint::DirPath)]
    pub warehouse: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Query the Overpass service and stage the result in the warehouse
    Fetch(FetchArgs),

    /// Read points back from the warehouse and write a deck description
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Administrative area name to search within
    #[arg(long, default_value = "Daerah Khusus ibukota Jakarta")]
    pub area: String,

    /// OSM amenity value to search for
    #[arg(long, default_value = "pharmacy")]
    pub amenity: String,

    /// Overpass interpreter endpoint
    #[arg(long, env = "POIMAP_OVERPASS_URL", default_value = poimap::fetch::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Server-side query timeout and client timeout, in seconds
    #[arg(long, default_value_t = 25)]
    pub timeout: u32,

    /// Keep previously staged documents instead of truncating first
    #[arg(long)]
    pub append: bool,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Visualization mode: "Buffer", "H3 Hexagons" (hexbin) or "Heatmap"
    #[arg(short, long, default_value = "Buffer")]
    pub mode: String,

    /// Basemap: streets, satellite, dark, light, or a style URL
    #[arg(long, default_value = "streets")]
    pub map_style: String,

    /// Only show points whose name contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Buffer distance in meters (100-1000, step 50)
    #[arg(long, default_value_t = 500.0)]
    pub buffer_meters: f64,

    /// Hexagon resolution (6-9)
    #[arg(long, default_value_t = 7)]
    pub resolution: u8,

    /// Heatmap radius in pixels (10-100)
    #[arg(long, default_value_t = 50)]
    pub heatmap_radius: u32,

    /// Heatmap intensity (1-10)
    #[arg(long, default_value_t = 5)]
    pub heatmap_intensity: u32,

    /// Heatmap opacity (0.1-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub heatmap_opacity: f64,

    /// Output deck file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
