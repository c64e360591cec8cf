use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use geo::Point;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    dots::{DotDensityConfig, FilteredRegion, TenureCategory, dots_needed, filter_regions, load_regions, residential_parcels, write_dots},
    geom,
    layer::FeatureLayer,
};

/// A single sampled point tagged with its tenure category.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub category: TenureCategory,
    pub point: Point<f64>,
}

/// What a dot-density run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DotSummary {
    /// Regions read from the region layer.
    pub regions_loaded: usize,
    /// Regions with residential land use after filtering.
    pub regions_retained: usize,
    /// Dots placed per category.
    pub dots: BTreeMap<TenureCategory, usize>,
    /// (region, category) pairs skipped because their polygon could not be sampled.
    pub skipped: usize,
    /// (region, category) pairs whose derived count was negative.
    pub negative_counts: usize,
}

impl DotSummary {
    /// Total dots across all categories.
    pub fn total_dots(&self) -> usize { self.dots.values().sum() }
}

/// Run the dot-density pipeline end to end: load, join, filter, sample, export.
pub fn run(config: &DotDensityConfig) -> Result<DotSummary> {
    ensure!(
        config.households_per_dot > 0.0 && config.households_per_dot.is_finite(),
        "[dots] households_per_dot must be positive, got {}", config.households_per_dot
    );
    ensure!(config.max_attempts > 0, "[dots] max_attempts must be positive");

    let regions = load_regions(config)?;

    log::info!("[dots] reading land use from {}", config.land_use.display());
    let land_use = FeatureLayer::read(&config.land_use, &[config.land_use_class.as_str()])?;
    let parcels = residential_parcels(&land_use, &config.land_use_class, &config.residential_classes)?;

    let filtered = filter_regions(&regions, &parcels);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let (dots, mut summary) = generate_dots(&filtered, config.households_per_dot, config.max_attempts, &mut rng);
    summary.regions_loaded = regions.len();

    write_dots(&config.output, &dots, config.epsg)?;
    Ok(summary)
}

/// Sample the dots for every (region, category) pair.
///
/// Negative counts are reported and clamped to zero dots; pairs whose polygon is
/// degenerate or exhausts the attempt cap are reported and skipped.
pub fn generate_dots(
    regions: &[FilteredRegion],
    households_per_dot: f64,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> (Vec<Dot>, DotSummary) {
    let mut dots = Vec::new();
    let mut summary = DotSummary {
        regions_retained: regions.len(),
        dots: TenureCategory::ALL.iter().map(|&c| (c, 0)).collect(),
        ..Default::default()
    };

    for region in regions {
        for category in TenureCategory::ALL {
            let count = region.counts.count(category);
            if count < 0.0 {
                log::warn!("[dots] region {} has negative {} count ({}); placing no dots", region.id, category, count);
                summary.negative_counts += 1;
                continue;
            }

            let n = dots_needed(count, households_per_dot);
            match geom::sample_points(&region.geometry, n, max_attempts, &mut *rng) {
                Ok(points) => {
                    log::debug!("[dots] region {} {}: {} dots", region.id, category, points.len());
                    *summary.dots.entry(category).or_default() += points.len();
                    dots.extend(points.into_iter().map(|point| Dot { category, point }));
                }
                Err(err) => {
                    log::warn!("[dots] skipping {} dots of {} in region {}: {}", n, category, region.id, err);
                    summary.skipped += 1;
                }
            }
        }
    }

    log::info!("[dots] placed {} dots in {} regions", dots.len(), regions.len());
    (dots, summary)
}

#[cfg(test)]
mod tests {
    use geo::{Intersects, LineString, MultiPolygon, Polygon};

    use super::*;
    use crate::dots::{HOUSEHOLDS_PER_DOT, TenureCounts};

    fn square(size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(0.0, 0.0), (size, 0.0), (size, size), (0.0, size), (0.0, 0.0)]),
            vec![],
        )])
    }

    #[test]
    fn dots_per_category_follow_counts() {
        let region = FilteredRegion {
            id: "1".into(),
            geometry: square(1.0),
            counts: TenureCounts { owner: 100.0, renter: 44.0, owner_with_mortgage: 60.0, renter_in_subsidized_housing: 0.0 },
        };
        let mut rng = StdRng::seed_from_u64(1);

        let (dots, summary) = generate_dots(&[region.clone()], HOUSEHOLDS_PER_DOT, 1000, &mut rng);
        assert_eq!(summary.dots[&TenureCategory::OwnerWithMortgage], 6);
        assert_eq!(summary.dots[&TenureCategory::OwnerNoMortgage], 4);
        assert_eq!(summary.dots[&TenureCategory::RenterNotInSubsidizedHousing], 4);
        assert_eq!(summary.dots[&TenureCategory::RenterInSubsidizedHousing], 0);
        assert_eq!(summary.total_dots(), dots.len());
        assert!(dots.iter().all(|dot| region.geometry.intersects(&dot.point)));
    }

    #[test]
    fn negative_and_degenerate_pairs_are_skipped() {
        let negative = FilteredRegion {
            id: "neg".into(),
            geometry: square(1.0),
            counts: TenureCounts { owner: 10.0, owner_with_mortgage: 30.0, ..Default::default() },
        };
        let flat = FilteredRegion {
            id: "flat".into(),
            geometry: square(0.0),
            counts: TenureCounts { owner: 20.0, owner_with_mortgage: 20.0, ..Default::default() },
        };
        let mut rng = StdRng::seed_from_u64(2);

        let (dots, summary) = generate_dots(&[negative, flat], HOUSEHOLDS_PER_DOT, 1000, &mut rng);
        // "neg": 3 mortgage dots placed, owner_no_mortgage = -20 rejected
        assert_eq!(dots.len(), 3);
        assert_eq!(summary.negative_counts, 1);
        // "flat": the 2 mortgage dots cannot be placed
        assert_eq!(summary.skipped, 1);
    }
}
