use std::collections::HashSet;

use anyhow::{Context, Result};
use geo::MultiPolygon;
use polars::frame::DataFrame;

use crate::{common, dots::{DotDensityConfig, TenureCounts}, layer::FeatureLayer};

/// A source polygon joined with its tenure counts.
#[derive(Debug, Clone)]
pub struct Region {
    pub id: String,
    pub geometry: MultiPolygon<f64>,
    pub counts: TenureCounts,
}

/// Load the region layer and tenure table named by `config` and join them.
pub fn load_regions(config: &DotDensityConfig) -> Result<Vec<Region>> {
    log::info!("[dots::load] reading regions from {}", config.regions.display());
    let layer = FeatureLayer::read(&config.regions, &[config.region_id.as_str()])?;

    common::require_file_exists(&config.tenure)?;
    log::info!("[dots::load] reading tenure table from {}", config.tenure.display());
    let table = common::read_csv(&config.tenure, &config.tenure_id)?;

    join_regions(&layer, &config.region_id, &table, &config.tenure_id)
}

/// Left-join the tenure table onto the region layer. Regions without a table row get zero counts.
pub fn join_regions(layer: &FeatureLayer, region_id: &str, table: &DataFrame, table_id: &str) -> Result<Vec<Region>> {
    let ids = layer.ids(region_id)?;
    let polygons = layer.polygons()?;

    let joined = common::left_join_on_ids(&ids, table, table_id)
        .context("[dots::load] Failed to join tenure table onto regions")?;

    let owner = common::column_f64_or_zero(&joined, TenureCounts::OWNER)?;
    let renter = common::column_f64_or_zero(&joined, TenureCounts::RENTER)?;
    let owner_with_mortgage = common::column_f64_or_zero(&joined, TenureCounts::OWNER_WITH_MORTGAGE)?;
    let renter_in_subsidized_housing = common::column_f64_or_zero(&joined, TenureCounts::RENTER_IN_SUBSIDIZED_HOUSING)?;

    let unmatched = ids.len() - table_ids_matched(table, table_id, &ids)?;
    if unmatched > 0 {
        log::warn!("[dots::load] {} of {} regions have no tenure row; counts set to zero", unmatched, ids.len());
    }

    Ok(ids.into_iter()
        .zip(polygons)
        .enumerate()
        .map(|(i, (id, geometry))| Region {
            id,
            geometry,
            counts: TenureCounts {
                owner: owner[i],
                renter: renter[i],
                owner_with_mortgage: owner_with_mortgage[i],
                renter_in_subsidized_housing: renter_in_subsidized_housing[i],
            },
        })
        .collect())
}

/// Count how many of `ids` appear in the table's id column.
fn table_ids_matched(table: &DataFrame, table_id: &str, ids: &[String]) -> Result<usize> {
    let table_ids = common::column_strings(table, table_id)?
        .into_iter()
        .flatten()
        .collect::<HashSet<_>>();
    Ok(ids.iter().filter(|id| table_ids.contains(*id)).count())
}

#[cfg(test)]
mod tests {
    use geo::{Geometry, LineString, Polygon};
    use polars::prelude::{Column, DataFrame};

    use super::*;

    fn square(x: f64) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from(vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0), (x, 0.0)]),
            vec![],
        ))
    }

    #[test]
    fn join_fills_missing_rows_and_values_with_zero() {
        let layer = FeatureLayer::from_geometries(
            "DAUID",
            vec!["1".into(), "2".into()],
            vec![square(0.0), square(1.0)],
        ).unwrap();

        let table = DataFrame::new(vec![
            Column::new("DAUID".into(), &["2"]),
            Column::new("Owner".into(), &[Some(100.0)]),
            Column::new("Renter".into(), &[Some(50.0)]),
            Column::new("Owner_with_mortgage".into(), &[Some(60.0)]),
            Column::new("Renter_in_subsidized_housing".into(), &[None::<f64>]),
        ]).unwrap();

        let regions = join_regions(&layer, "DAUID", &table, "DAUID").unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id, "1");
        assert_eq!(regions[0].counts, TenureCounts::default());
        assert_eq!(regions[1].counts.owner_no_mortgage(), 40.0);
        assert_eq!(regions[1].counts.total(), 150.0);
        assert_eq!(regions[1].counts.renter_in_subsidized_housing, 0.0);
    }

    #[test]
    fn missing_count_column_is_an_error() {
        let layer = FeatureLayer::from_geometries("DAUID", vec!["1".into()], vec![square(0.0)]).unwrap();
        let table = DataFrame::new(vec![Column::new("DAUID".into(), &["1"])]).unwrap();
        assert!(join_regions(&layer, "DAUID", &table, "DAUID").is_err());
    }
}
