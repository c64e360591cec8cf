use anyhow::{Context, Result};
use geo::MultiPolygon;
use polars::frame::DataFrame;

use crate::{bivariate::BivariateConfig, common, layer::FeatureLayer};

/// A region with both indicator values joined on.
#[derive(Debug, Clone)]
pub struct IndicatorRow {
    pub id: String,
    pub geometry: MultiPolygon<f64>,
    pub x: f64,
    pub y: f64,
}

/// One indicator: the table holding it, the table's join column and the value column.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSource<'a> {
    pub table: &'a DataFrame,
    pub id: &'a str,
    pub column: &'a str,
}

/// Load the region layer and both indicator tables named by `config` and join them.
pub fn load_indicators(config: &BivariateConfig) -> Result<Vec<IndicatorRow>> {
    log::info!("[bivariate::load] reading regions from {}", config.regions.display());
    let layer = FeatureLayer::read(&config.regions, &[config.region_id.as_str()])?;

    common::require_file_exists(&config.x_table)?;
    log::info!("[bivariate::load] reading x indicator from {}", config.x_table.display());
    let x_table = common::read_csv(&config.x_table, &config.x_id)?;

    common::require_file_exists(&config.y_table)?;
    log::info!("[bivariate::load] reading y indicator from {}", config.y_table.display());
    let y_table = common::read_csv(&config.y_table, &config.y_id)?;

    join_indicators(
        &layer,
        &config.region_id,
        IndicatorSource { table: &x_table, id: &config.x_id, column: &config.x_column },
        IndicatorSource { table: &y_table, id: &config.y_id, column: &config.y_column },
    )
}

/// Left-join both indicators onto the region layer, in layer order.
/// Regions missing from either table get a zero for that indicator.
pub fn join_indicators(
    layer: &FeatureLayer,
    region_id: &str,
    x: IndicatorSource,
    y: IndicatorSource,
) -> Result<Vec<IndicatorRow>> {
    let ids = layer.ids(region_id)?;
    let polygons = layer.polygons()?;

    let xs = indicator_values(&ids, x)?;
    let ys = indicator_values(&ids, y)?;

    Ok(ids.into_iter()
        .zip(polygons)
        .zip(xs.into_iter().zip(ys))
        .map(|((id, geometry), (x, y))| IndicatorRow { id, geometry, x, y })
        .collect())
}

fn indicator_values(ids: &[String], source: IndicatorSource) -> Result<Vec<f64>> {
    let joined = common::left_join_on_ids(ids, source.table, source.id)
        .with_context(|| format!("[bivariate::load] Failed to join indicator {:?}", source.column))?;

    let missing = joined.column(source.column)
        .with_context(|| format!("[bivariate::load] missing indicator column {:?}", source.column))?
        .null_count();
    if missing > 0 {
        log::warn!("[bivariate::load] {} of {} regions have no {:?} value; set to zero", missing, ids.len(), source.column);
    }

    common::column_f64_or_zero(&joined, source.column)
}
