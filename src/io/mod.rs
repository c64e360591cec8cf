//! IO module for format-specific reading and writing operations.
//!
//! # Format Modules
//!
//! - `geojson` - GeoJSON feature collections (polygon/line layers in, dot layers out)
//! - `shp` - Shapefile polygon layers
//! - `svg` - SVG format for map rendering
//!
//! Tabular CSV input goes through polars in `common::data`.

pub(crate) mod geojson;
pub(crate) mod shp;
pub(crate) mod svg;

use geo::Geometry;
use serde_json::{Map, Value};

/// A feature read from any vector format: geometry plus untyped attributes.
#[derive(Debug, Clone)]
pub(crate) struct RawFeature {
    pub(crate) geometry: Geometry<f64>,
    pub(crate) properties: Map<String, Value>,
}
