//! GeoJSON writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use geo::Point;
use serde_json::{Map, Value, json};

/// Build a Point FeatureCollection, naming the coordinate reference system by EPSG code.
pub(crate) fn points_to_geojson<'a>(
    points: impl IntoIterator<Item = (&'a Point<f64>, Map<String, Value>)>,
    epsg: u32,
) -> Value {
    let features = points.into_iter()
        .map(|(point, properties)| json!({
            "type": "Feature",
            "properties": properties,
            "geometry": {
                "type": "Point",
                "coordinates": [point.x(), point.y()],
            },
        }))
        .collect::<Vec<_>>();

    json!({
        "type": "FeatureCollection",
        "crs": {
            "type": "name",
            "properties": { "name": format!("urn:ogc:def:crs:EPSG::{epsg}") },
        },
        "features": features,
    })
}

/// Write a GeoJSON value to `path`.
pub(crate) fn write_geojson(path: &Path, value: &Value) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::geojson] Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("[io::geojson] Failed to write GeoJSON to {:?}", path))?;
    writer.flush()?;
    Ok(())
}
