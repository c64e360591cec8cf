use anyhow::Result;
use carto::bivariate::{self, BivariateConfig};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::BivariateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => carto::load_config::<BivariateConfig>(path)?,
        None => BivariateConfig::default(),
    };

    if let Some(regions) = &args.regions { config.regions = regions.clone() }
    if let Some(output) = &args.output { config.output = output.clone() }
    if let Some(width) = args.width { config.width = width }

    log::info!("[bivariate] rendering {}", config.regions.display());
    let summary = bivariate::run(&config)?;
    log::info!("[bivariate] wrote {} regions to {}", summary.regions, config.output.display());

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
