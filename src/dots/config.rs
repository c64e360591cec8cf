use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{dots::{HOUSEHOLDS_PER_DOT, RESIDENTIAL_CLASSES}, geom::DEFAULT_MAX_ATTEMPTS};

/// Inputs, outputs and parameters of a dot-density run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotDensityConfig {
    /// Polygon layer of regions (GeoJSON or Shapefile).
    pub regions: PathBuf,
    /// Identifier field on the region layer.
    pub region_id: String,
    /// Tenure table (CSV).
    pub tenure: PathBuf,
    /// Identifier column in the tenure table.
    pub tenure_id: String,
    /// Land-use polygon layer.
    pub land_use: PathBuf,
    /// Class field on the land-use layer.
    pub land_use_class: String,
    /// Land-use classes a dot may fall in.
    pub residential_classes: Vec<String>,
    /// Households per dot.
    pub households_per_dot: f64,
    /// Cap on candidate draws per accepted dot.
    pub max_attempts: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Output point layer (GeoJSON).
    pub output: PathBuf,
    /// EPSG code written to the output layer.
    pub epsg: u32,
}

impl Default for DotDensityConfig {
    fn default() -> Self {
        Self {
            regions: "data/toronto-da-2021.geojson".into(),
            region_id: "DAUID".to_string(),
            tenure: "data/toronto-tenure-da-2021.csv".into(),
            tenure_id: "DAUID".to_string(),
            land_use: "data/toronto-land-use-2022-sp.shp".into(),
            land_use_class: "Class_name".to_string(),
            residential_classes: RESIDENTIAL_CLASSES.map(String::from).to_vec(),
            households_per_dot: HOUSEHOLDS_PER_DOT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            output: "data/dots.geojson".into(),
            epsg: 4326,
        }
    }
}
