use anyhow::Result;
use carto::dots::{self, DotDensityConfig};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::DotsArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => carto::load_config::<DotDensityConfig>(path)?,
        None => DotDensityConfig::default(),
    };

    if let Some(regions) = &args.regions { config.regions = regions.clone() }
    if let Some(tenure) = &args.tenure { config.tenure = tenure.clone() }
    if let Some(land_use) = &args.land_use { config.land_use = land_use.clone() }
    if let Some(output) = &args.output { config.output = output.clone() }
    if let Some(ratio) = args.households_per_dot { config.households_per_dot = ratio }
    if args.seed.is_some() { config.seed = args.seed }

    log::info!("[dots] generating dots from {}", config.regions.display());
    let summary = dots::run(&config)?;
    log::info!(
        "[dots] wrote {} dots for {} of {} regions to {}",
        summary.total_dots(), summary.regions_retained, summary.regions_loaded, config.output.display(),
    );

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
