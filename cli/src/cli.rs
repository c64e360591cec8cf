use std::path::PathBuf;

/// Thematic map generation CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "carto", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Scatter one dot per N households over residential land (writes GeoJSON)
    Dots(DotsArgs),

    /// Render a 3x3 bivariate choropleth of two indicators (writes SVG)
    Bivariate(BivariateArgs),
}

#[derive(clap::Args, Debug)]
pub struct DotsArgs {
    /// JSON config file; omitted fields keep their defaults
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Region polygon layer (GeoJSON or Shapefile)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub regions: Option<PathBuf>,

    /// Tenure table (CSV)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub tenure: Option<PathBuf>,

    /// Land-use polygon layer
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub land_use: Option<PathBuf>,

    /// Output point layer, defaults to "data/dots.geojson"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Households represented by one dot
    #[arg(long)]
    pub households_per_dot: Option<f64>,

    /// Seed for reproducible dot placement
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub summary: bool,
}

#[derive(clap::Args, Debug)]
pub struct BivariateArgs {
    /// JSON config file; omitted fields keep their defaults
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Region polygon layer (GeoJSON or Shapefile)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub regions: Option<PathBuf>,

    /// Output image, defaults to "images/winnipeg-bivariate-map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub summary: bool,
}
