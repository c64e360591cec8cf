use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value, json};

use crate::{common, dots::Dot, io};

/// Build the output point layer: one feature per dot with its category in `type`.
pub fn dots_to_geojson(dots: &[Dot], epsg: u32) -> Value {
    io::geojson::points_to_geojson(
        dots.iter().map(|dot| {
            let mut properties = Map::new();
            properties.insert("type".to_string(), json!(dot.category.as_str()));
            (&dot.point, properties)
        }),
        epsg,
    )
}

/// Write the dots as a GeoJSON FeatureCollection at `path`, creating parent directories.
pub fn write_dots(path: &Path, dots: &[Dot], epsg: u32) -> Result<()> {
    common::ensure_parent_dir(path)?;
    log::info!("[dots::export] writing {} dots to {}", dots.len(), path.display());
    io::geojson::write_geojson(path, &dots_to_geojson(dots, epsg))
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::dots::TenureCategory;

    #[test]
    fn written_layer_reads_back_as_points() {
        let dots = vec![
            Dot { category: TenureCategory::OwnerWithMortgage, point: Point::new(1.0, 2.0) },
            Dot { category: TenureCategory::RenterInSubsidizedHousing, point: Point::new(3.0, 4.0) },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/dots.geojson");
        write_dots(&path, &dots, 4326).unwrap();

        let value: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1]["properties"]["type"], "Renter_in_subsidized_housing");
        assert_eq!(features[1]["geometry"]["type"], "Point");
        assert_eq!(features[0]["geometry"]["coordinates"], json!([1.0, 2.0]));
    }
}
