//! GeoJSON reading operations.

use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPolygon, Point, Polygon};
use serde_json::Value;

use crate::io::RawFeature;

/// Reads every feature of a GeoJSON FeatureCollection at `path`.
pub(crate) fn read_geojson(path: &Path) -> Result<Vec<RawFeature>> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::geojson] Failed to open GeoJSON file: {}", path.display()))?;
    read_geojson_bytes(&bytes)
        .with_context(|| format!("[io::geojson] Failed to read GeoJSON from {:?}", path))
}

/// Read features from GeoJSON bytes.
pub(crate) fn read_geojson_bytes(bytes: &[u8]) -> Result<Vec<RawFeature>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON bytes")?;

    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] expected a FeatureCollection with a \"features\" array"))?;

    features.iter().enumerate()
        .map(|(i, feature)| {
            let geometry = match &feature["geometry"] {
                Value::Null => Geometry::GeometryCollection(GeometryCollection(Vec::new())),
                geometry => parse_geometry(geometry)
                    .with_context(|| format!("[io::geojson] invalid geometry in feature {}", i))?,
            };
            let properties = feature["properties"].as_object().cloned().unwrap_or_default();
            Ok(RawFeature { geometry, properties })
        })
        .collect()
}

/// Parse a GeoJSON geometry object into a geo::Geometry.
fn parse_geometry(geometry: &Value) -> Result<Geometry<f64>> {
    let coords = &geometry["coordinates"];
    Ok(match geometry["type"].as_str() {
        Some("Point") => Geometry::Point(Point(parse_coord(coords)?)),
        Some("LineString") => Geometry::LineString(parse_line(coords)?),
        Some("MultiLineString") => Geometry::MultiLineString(MultiLineString(
            as_array(coords)?.iter().map(parse_line).collect::<Result<_>>()?
        )),
        Some("Polygon") => Geometry::Polygon(parse_polygon(coords)?),
        Some("MultiPolygon") => Geometry::MultiPolygon(MultiPolygon(
            as_array(coords)?.iter().map(parse_polygon).collect::<Result<_>>()?
        )),
        Some("GeometryCollection") => Geometry::GeometryCollection(GeometryCollection(
            as_array(&geometry["geometries"])?.iter().map(parse_geometry).collect::<Result<_>>()?
        )),
        Some(other) => bail!("unsupported geometry type {:?}", other),
        None => bail!("geometry has no \"type\""),
    })
}

/// Parse polygon rings: the first is the exterior, the rest are holes.
fn parse_polygon(coords: &Value) -> Result<Polygon<f64>> {
    let mut rings = as_array(coords)?.iter()
        .map(parse_ring)
        .collect::<Result<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next().unwrap_or_else(|| LineString(Vec::new()));
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Parse a ring, ensuring it is closed (first point == last point).
fn parse_ring(coords: &Value) -> Result<LineString<f64>> {
    let mut ring = parse_line(coords)?;
    ring.close();
    Ok(ring)
}

fn parse_line(coords: &Value) -> Result<LineString<f64>> {
    Ok(LineString(as_array(coords)?.iter().map(parse_coord).collect::<Result<_>>()?))
}

/// Parse a position [x, y, ...]; extra dimensions are ignored.
fn parse_coord(position: &Value) -> Result<Coord<f64>> {
    match as_array(position)?.as_slice() {
        [x, y, ..] => Ok(Coord {
            x: x.as_f64().ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?,
            y: y.as_f64().ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?,
        }),
        _ => bail!("Invalid coordinate: expected at least two numbers"),
    }
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("expected an array, found {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_polygons_lines_and_null_geometry() {
        let bytes = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"DAUID": "35200002"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1]]]}},
                {"type": "Feature", "properties": {"name": "Main St"},
                 "geometry": {"type": "LineString", "coordinates": [[0,0],[2,2,5]]}},
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        }"#;

        let features = read_geojson_bytes(bytes).unwrap();
        assert_eq!(features.len(), 3);

        let Geometry::Polygon(polygon) = &features[0].geometry else { panic!("expected polygon") };
        assert!(polygon.exterior().is_closed());
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(features[0].properties["DAUID"], "35200002");

        let Geometry::LineString(line) = &features[1].geometry else { panic!("expected line") };
        assert_eq!(line.0[1], Coord { x: 2.0, y: 2.0 });

        assert!(matches!(&features[2].geometry, Geometry::GeometryCollection(gc) if gc.0.is_empty()));
        assert!(features[2].properties.is_empty());
    }

    #[test]
    fn rejects_non_feature_collections() {
        assert!(read_geojson_bytes(br#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
        assert!(read_geojson_bytes(b"not json").is_err());
    }
}
