//! Shapefile reading operations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPolygon, Point, Polygon};
use serde_json::{Map, Value, json};
use shapefile::{Reader, Shape, dbase::{FieldValue, Record}};

use crate::io::RawFeature;

/// Reads all shapes + attribute records from a given `.shp` file path (the `.dbf` sits next to it).
pub(crate) fn read_shapefile(path: &Path) -> Result<Vec<RawFeature>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut features = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("[io::shp] Error reading shape+record")?;
        features.push(RawFeature {
            geometry: shape_to_geometry(shape)
                .with_context(|| format!("[io::shp] Error converting shape {} in {}", features.len(), path.display()))?,
            properties: record_to_properties(record),
        });
    }
    Ok(features)
}

/// Coerce a shapefile shape into a geo::Geometry, raising error on unsupported shapes.
fn shape_to_geometry(shape: Shape) -> Result<Geometry<f64>> {
    Ok(match shape {
        Shape::NullShape => Geometry::GeometryCollection(GeometryCollection(Vec::new())),
        Shape::Point(point) => Geometry::Point(Point::new(point.x, point.y)),
        Shape::Polyline(polyline) => Geometry::MultiLineString(MultiLineString(
            polyline.parts().iter()
                .map(|part| part.iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect())
                .collect()
        )),
        Shape::Polygon(polygon) => Geometry::MultiPolygon(shp_to_geo(&polygon)),
        other => bail!("unsupported shape type: {:?}", other.shapetype()),
    })
}

/// Convert the dBase record into untyped attributes; empty values become null.
fn record_to_properties(record: Record) -> Map<String, Value> {
    record.into_iter()
        .map(|(field, value)| {
            let value = match value {
                FieldValue::Character(Some(s)) => json!(s.trim()),
                FieldValue::Numeric(Some(n)) => json!(n),
                FieldValue::Integer(n) => json!(n),
                FieldValue::Double(n) => json!(n),
                FieldValue::Float(Some(n)) => json!(n),
                FieldValue::Logical(Some(b)) => json!(b),
                _ => Value::Null,
            };
            (field, value)
        })
        .collect()
}

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>
pub(crate) fn shp_to_geo(p: &shapefile::Polygon) -> MultiPolygon<f64> {
    // Shapefile stores each exterior ring (CW) followed by its holes (CCW).
    let mut polys: Vec<Polygon<f64>> = Vec::new();
    let mut current_exterior: Option<LineString<f64>> = None;
    let mut current_holes: Vec<LineString<f64>> = Vec::new();

    for ring in p.rings() {
        let mut ls: LineString<f64> = ring.points().iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect();
        ls.close();

        if signed_area(&ls.0) < 0.0 {
            if let Some(ext) = current_exterior.take() {
                polys.push(Polygon::new(ext, std::mem::take(&mut current_holes)));
            }
            current_exterior = Some(ls);
        } else {
            current_holes.push(ls);
        }
    }
    if let Some(ext) = current_exterior {
        polys.push(Polygon::new(ext, current_holes));
    }

    MultiPolygon(polys)
}

/// Get the signed area of a closed coordinate list (negative for clockwise).
fn signed_area(pts: &[Coord<f64>]) -> f64 {
    pts.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum::<f64>() / 2.0
}
