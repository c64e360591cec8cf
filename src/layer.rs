use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result, anyhow, bail, ensure};
use geo::{BoundingRect, Geometry, MultiPolygon, Rect};
use polars::{frame::DataFrame, prelude::Column};
use serde_json::Value;

use crate::{common, geom, io::{self, RawFeature}};

/// A vector layer: one geometry per feature plus the requested attribute fields (as strings).
#[derive(Debug, Clone)]
pub struct FeatureLayer {
    data: DataFrame,
    geoms: Vec<Geometry<f64>>,
}

impl FeatureLayer {
    /// Read a layer from a GeoJSON (`.geojson`, `.json`) or Shapefile (`.shp`) path,
    /// keeping only the attribute `fields` named.
    pub fn read(path: &Path, fields: &[&str]) -> Result<Self> {
        common::require_file_exists(path)?;

        let extension = path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let features = match extension.as_deref() {
            Some("geojson" | "json") => io::geojson::read_geojson(path)?,
            Some("shp") => io::shp::read_shapefile(path)?,
            _ => bail!("[layer] unsupported vector format: {}", path.display()),
        };

        Self::from_features(features, fields)
            .with_context(|| format!("[layer] Failed to load layer {}", path.display()))
    }

    /// Build a layer from raw features.
    pub(crate) fn from_features(features: Vec<RawFeature>, fields: &[&str]) -> Result<Self> {
        let columns = fields.iter()
            .map(|&field| {
                ensure!(
                    features.is_empty() || features.iter().any(|f| f.properties.contains_key(field)),
                    "field {:?} not present in any feature", field
                );
                let values = features.iter()
                    .map(|f| f.properties.get(field).and_then(value_to_string))
                    .collect::<Vec<_>>();
                Ok(Column::new(field.into(), values))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            data: DataFrame::new(columns)?,
            geoms: features.into_iter().map(|f| f.geometry).collect(),
        })
    }

    /// Build a layer directly from geometries and one string field.
    pub fn from_geometries(field: &str, values: Vec<String>, geoms: Vec<Geometry<f64>>) -> Result<Self> {
        ensure!(values.len() == geoms.len(), "[layer] {} values for {} geometries", values.len(), geoms.len());
        Ok(Self {
            data: DataFrame::new(vec![Column::new(field.into(), values)])?,
            geoms,
        })
    }

    /// Get the number of features.
    #[inline] pub fn len(&self) -> usize { self.geoms.len() }

    /// Check if there are no features.
    #[inline] pub fn is_empty(&self) -> bool { self.geoms.is_empty() }

    /// Get a reference to the feature geometries.
    #[inline] pub fn geoms(&self) -> &[Geometry<f64>] { &self.geoms }

    /// Get the attribute table.
    #[inline] pub fn data(&self) -> &DataFrame { &self.data }

    /// Get an attribute field as optional strings.
    pub fn field(&self, name: &str) -> Result<Vec<Option<String>>> {
        common::column_strings(&self.data, name)
    }

    /// Get an identifier field, requiring every value to be present and unique.
    pub fn ids(&self, name: &str) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        self.field(name)?.into_iter().enumerate()
            .map(|(i, id)| {
                let id = id.ok_or_else(|| anyhow!("[layer] feature {} has no {:?}", i, name))?;
                ensure!(seen.insert(id.clone()), "[layer] duplicate {:?} value {:?}", name, id);
                Ok(id)
            })
            .collect()
    }

    /// Coerce every geometry into an owned MultiPolygon, raising error on non-areal features.
    /// Null geometries become empty MultiPolygons.
    pub fn polygons(&self) -> Result<Vec<MultiPolygon<f64>>> {
        self.geoms.iter().enumerate()
            .map(|(i, geometry)| to_multipolygon(geometry)
                .with_context(|| format!("[layer] feature {} is not a polygon", i)))
            .collect()
    }

    /// Compute the bounding rectangle of all geometries.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        geom::merge_bounds(self.geoms.iter().filter_map(|geometry| geometry.bounding_rect()))
    }
}

fn to_multipolygon(geometry: &Geometry<f64>) -> Result<MultiPolygon<f64>> {
    Ok(match geometry {
        Geometry::Polygon(polygon) => MultiPolygon(vec![polygon.clone()]),
        Geometry::MultiPolygon(mp) => mp.clone(),
        Geometry::Rect(rect) => MultiPolygon(vec![rect.to_polygon()]),
        Geometry::Triangle(tri) => MultiPolygon(vec![tri.to_polygon()]),
        Geometry::GeometryCollection(gc) => MultiPolygon(
            gc.0.iter()
                .map(to_multipolygon)
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .flat_map(|mp| mp.0)
                .collect()
        ),
        _ => bail!("expected Polygon or MultiPolygon geometry"),
    })
}

/// Render an attribute value as a join-friendly string; null becomes None.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use geo::{Area, Coord, LineString, Point, Polygon};
    use serde_json::{Map, json};

    use super::*;

    fn feature(geometry: Geometry<f64>, properties: Value) -> RawFeature {
        let properties: Map<String, Value> = properties.as_object().cloned().unwrap_or_default();
        RawFeature { geometry, properties }
    }

    fn square(x: f64, y: f64) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from(vec![(x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0), (x, y)]),
            vec![],
        ))
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let layer = FeatureLayer::from_features(vec![
            feature(square(0.0, 0.0), json!({"DAUID": 35200002})),
            feature(square(1.0, 0.0), json!({"DAUID": "35200003"})),
        ], &["DAUID"]).unwrap();

        assert_eq!(layer.ids("DAUID").unwrap(), vec!["35200002", "35200003"]);
        assert_eq!(layer.bounds().unwrap().max(), Coord { x: 2.0, y: 1.0 });
    }

    #[test]
    fn duplicate_or_missing_ids_are_rejected() {
        let dup = FeatureLayer::from_features(vec![
            feature(square(0.0, 0.0), json!({"DAUID": "a"})),
            feature(square(1.0, 0.0), json!({"DAUID": "a"})),
        ], &["DAUID"]).unwrap();
        assert!(dup.ids("DAUID").is_err());

        let missing = FeatureLayer::from_features(vec![
            feature(square(0.0, 0.0), json!({"DAUID": "a"})),
            feature(square(1.0, 0.0), json!({})),
        ], &["DAUID"]).unwrap();
        assert!(missing.ids("DAUID").is_err());

        assert!(FeatureLayer::from_features(vec![feature(square(0.0, 0.0), json!({}))], &["DAUID"]).is_err());
    }

    #[test]
    fn polygons_reject_points() {
        let layer = FeatureLayer::from_features(vec![
            feature(Geometry::Point(Point::new(0.0, 0.0)), json!({})),
        ], &[]).unwrap();
        assert!(layer.polygons().is_err());
    }

    /// Write a polygon shapefile with one `Class_name` field, one 4x4 square per class.
    fn write_land_use(path: &Path, classes: &[(&str, f64)]) {
        use shapefile::{PolygonRing, dbase::{FieldName, FieldValue, Record, TableWriterBuilder}};

        let table = TableWriterBuilder::new()
            .add_character_field(FieldName::try_from("Class_name").unwrap(), 32);
        let mut writer = shapefile::Writer::from_path(path, table).unwrap();
        for &(class, x) in classes {
            let ring = [(x, 0.0), (x, 4.0), (x + 4.0, 4.0), (x + 4.0, 0.0), (x, 0.0)]
                .map(|(x, y)| shapefile::Point { x, y })
                .to_vec();
            let polygon = shapefile::Polygon::with_rings(vec![PolygonRing::Outer(ring)]);
            let mut record = Record::default();
            record.insert("Class_name".to_string(), FieldValue::Character(Some(class.to_string())));
            writer.write_shape_and_record(&polygon, &record).unwrap();
        }
        drop(writer);
    }

    #[test]
    fn shapefile_layer_reads_geometry_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("land-use.shp");
        write_land_use(&path, &[("Neighbourhoods", 0.0), ("Parks", 10.0)]);

        let layer = FeatureLayer::read(&path, &["Class_name"]).unwrap();
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.field("Class_name").unwrap(), vec![Some("Neighbourhoods".into()), Some("Parks".into())]);

        let polygons = layer.polygons().unwrap();
        assert!((polygons[0].unsigned_area() - 16.0).abs() < 1e-9);
        assert_eq!(layer.bounds().unwrap().max(), Coord { x: 14.0, y: 4.0 });
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layer.kml");
        std::fs::write(&path, "<kml/>").unwrap();
        assert!(FeatureLayer::read(&path, &[]).is_err());
    }
}
