use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bivariate::TERTILES;

/// Inputs, outputs and parameters of a bivariate map run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BivariateConfig {
    /// Polygon layer of regions (GeoJSON or Shapefile).
    pub regions: PathBuf,
    /// Identifier field on the region layer.
    pub region_id: String,
    /// Table holding the x indicator (CSV).
    pub x_table: PathBuf,
    pub x_id: String,
    pub x_column: String,
    /// Table holding the y indicator (CSV).
    pub y_table: PathBuf,
    pub y_id: String,
    pub y_column: String,
    /// Number of quantile classes per indicator.
    pub classes: usize,
    /// Context layers drawn under and over the regions.
    pub boundary: PathBuf,
    pub streets: PathBuf,
    pub rivers: PathBuf,
    /// Output image (SVG).
    pub output: PathBuf,
    /// Image width in pixels; the height follows from the region bounds.
    pub width: f64,
    pub margin: f64,
}

impl Default for BivariateConfig {
    fn default() -> Self {
        Self {
            regions: "data/dissemination-area-winnipeg-2016.geojson".into(),
            region_id: "dauid".to_string(),
            x_table: "data/can-bics-winnipeg.csv".into(),
            x_id: "dauid".to_string(),
            x_column: "CBICS_cont".to_string(),
            y_table: "data/can-marg-manitoba-2016.csv".into(),
            y_id: "dauid".to_string(),
            y_column: "material_resources_DA16".to_string(),
            classes: TERTILES,
            boundary: "data/csd-winnipeg-2016.geojson".into(),
            streets: "data/streets-osm-winnipeg.geojson".into(),
            rivers: "data/river-osm-winnipeg.geojson".into(),
            output: "images/winnipeg-bivariate-map.svg".into(),
            width: 1200.0,
            margin: 10.0,
        }
    }
}
