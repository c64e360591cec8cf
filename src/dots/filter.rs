use anyhow::{Result, ensure};
use geo::MultiPolygon;

use crate::{dots::{Region, TenureCounts}, geom, layer::FeatureLayer};

/// Land-use classes treated as residential.
pub const RESIDENTIAL_CLASSES: [&str; 3] = ["MixedUse", "Neighbourhoods", "ApartmentNeighbourhoods"];

/// The residential-zoned part of a region: one (possibly multi-part) polygon per region id.
#[derive(Debug, Clone)]
pub struct FilteredRegion {
    pub id: String,
    pub geometry: MultiPolygon<f64>,
    pub counts: TenureCounts,
}

/// Select the parcels of a land-use layer whose `class_field` is one of `classes`.
pub fn residential_parcels(layer: &FeatureLayer, class_field: &str, classes: &[String]) -> Result<Vec<MultiPolygon<f64>>> {
    ensure!(!classes.is_empty(), "[dots::filter] no land-use classes allowed; every region would be dropped");

    let labels = layer.field(class_field)?;
    let polygons = layer.polygons()?;

    let parcels = labels.into_iter()
        .zip(polygons)
        .filter(|(label, _)| label.as_ref().is_some_and(|label| classes.iter().any(|c| c == label)))
        .map(|(_, polygon)| polygon)
        .collect::<Vec<_>>();

    log::info!("[dots::filter] {} of {} land-use parcels are residential", parcels.len(), layer.len());
    Ok(parcels)
}

/// Intersect each region with the residential parcels and dissolve the fragments by region id.
/// Regions with no residential overlap are dropped and receive no dots.
pub fn filter_regions(regions: &[Region], parcels: &[MultiPolygon<f64>]) -> Vec<FilteredRegion> {
    let sources = regions.iter().map(|region| region.geometry.clone()).collect::<Vec<_>>();

    let fragments = geom::overlay_intersection(&sources, parcels);
    let dissolved = geom::dissolve(fragments);

    let dropped = regions.len() - dissolved.len();
    if dropped > 0 {
        log::info!("[dots::filter] {} of {} regions have no residential land use", dropped, regions.len());
    }

    dissolved.into_iter()
        .map(|(i, geometry)| FilteredRegion {
            id: regions[i].id.clone(),
            geometry,
            counts: regions[i].counts,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{Area, Geometry, LineString, Polygon};

    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        )])
    }

    fn region(id: &str, geometry: MultiPolygon<f64>) -> Region {
        Region { id: id.into(), geometry, counts: TenureCounts { owner: 10.0, ..Default::default() } }
    }

    #[test]
    fn only_allowed_classes_are_kept() {
        let layer = FeatureLayer::from_geometries(
            "Class_name",
            vec!["Neighbourhoods".into(), "Parks".into(), "MixedUse".into()],
            vec![
                Geometry::MultiPolygon(rect(0.0, 0.0, 1.0, 1.0)),
                Geometry::MultiPolygon(rect(1.0, 0.0, 2.0, 1.0)),
                Geometry::MultiPolygon(rect(2.0, 0.0, 3.0, 1.0)),
            ],
        ).unwrap();
        let classes = RESIDENTIAL_CLASSES.map(String::from);

        let parcels = residential_parcels(&layer, "Class_name", &classes).unwrap();
        assert_eq!(parcels.len(), 2);
        assert!(residential_parcels(&layer, "Class_name", &[]).is_err());
    }

    #[test]
    fn regions_are_clipped_dissolved_and_dropped() {
        let regions = [
            region("a", rect(0.0, 0.0, 4.0, 4.0)),
            region("b", rect(10.0, 10.0, 12.0, 12.0)),
        ];
        // two parcels cover the left and right strips of region "a"
        let parcels = [rect(0.0, 0.0, 1.0, 4.0), rect(3.0, 0.0, 5.0, 4.0)];

        let filtered = filter_regions(&regions, &parcels);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
        assert_eq!(filtered[0].counts.owner, 10.0);
        assert!((filtered[0].geometry.unsigned_area() - 8.0).abs() < 1e-9);
    }
}
