use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, ensure};
use geo::MultiPolygon;
use serde::Serialize;

use crate::bivariate::{
    BivariateClass, BivariateConfig, ContextLayers, IndicatorRow, TERTILES, load_indicators, quantile_classes,
    write_map,
};

/// A region with its combined class and fill colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRegion {
    pub id: String,
    pub geometry: MultiPolygon<f64>,
    pub class: BivariateClass,
    pub color: &'static str,
}

/// What a bivariate run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BivariateSummary {
    /// Regions drawn on the map.
    pub regions: usize,
    /// Regions per combined label, e.g. `"1-2"`.
    pub class_counts: BTreeMap<String, usize>,
}

/// Run the bivariate pipeline end to end: load, join, classify, colour, render.
pub fn run(config: &BivariateConfig) -> Result<BivariateSummary> {
    ensure!(
        (1..=TERTILES).contains(&config.classes),
        "[bivariate] classes must be between 1 and {}, got {}", TERTILES, config.classes
    );
    ensure!(
        config.width > 2.0 * config.margin && config.margin >= 0.0,
        "[bivariate] width {} leaves no room inside margin {}", config.width, config.margin
    );

    let rows = load_indicators(config)?;
    let regions = classify_rows(rows, config.classes)?;
    let context = ContextLayers::read(&config.boundary, &config.rivers, &config.streets)?;

    write_map(&config.output, &context, &regions, config.width, config.margin)?;

    let mut summary = BivariateSummary { regions: regions.len(), ..Default::default() };
    for region in &regions {
        *summary.class_counts.entry(region.class.label()).or_default() += 1;
    }
    Ok(summary)
}

/// Classify both indicators into `k` quantile classes over all rows and colour each region.
pub fn classify_rows(rows: Vec<IndicatorRow>, k: usize) -> Result<Vec<ClassifiedRegion>> {
    let xs = rows.iter().map(|row| row.x).collect::<Vec<_>>();
    let ys = rows.iter().map(|row| row.y).collect::<Vec<_>>();

    let x_classes = quantile_classes(&xs, k).context("[bivariate] Failed to classify x indicator")?;
    let y_classes = quantile_classes(&ys, k).context("[bivariate] Failed to classify y indicator")?;

    rows.into_iter()
        .zip(x_classes.into_iter().zip(y_classes))
        .map(|(row, (x, y))| {
            let class = BivariateClass::new(x, y);
            let color = class.color()
                .ok_or_else(|| anyhow!("[bivariate] no colour for class {}", class))?;
            log::debug!("[bivariate] region {}: {}", row.id, class);
            Ok(ClassifiedRegion { id: row.id, geometry: row.geometry, class, color })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{LineString, Polygon};

    use super::*;

    fn row(id: &str, x: f64, y: f64) -> IndicatorRow {
        IndicatorRow {
            id: id.to_string(),
            geometry: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
                vec![],
            )]),
            x,
            y,
        }
    }

    #[test]
    fn indicators_are_classified_independently() {
        let rows = (1..=9)
            .map(|i| row(&i.to_string(), f64::from(i), f64::from(10 - i)))
            .collect::<Vec<_>>();

        let regions = classify_rows(rows, TERTILES).unwrap();
        let labels = regions.iter().map(|r| r.class.label()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["0-2", "0-2", "0-2", "1-1", "1-1", "1-1", "2-0", "2-0", "2-0"]);
        assert_eq!(regions[0].color, "#f73593");
        assert_eq!(regions[8].color, "#40dba7");
    }

    #[test]
    fn constant_indicator_lands_in_lowest_class() {
        let rows = vec![row("a", 1.0, 0.0), row("b", 2.0, 0.0), row("c", 3.0, 0.0)];
        let regions = classify_rows(rows, TERTILES).unwrap();
        assert!(regions.iter().all(|r| r.class.y == 0));
    }

    #[test]
    fn no_rows_cannot_be_classified() {
        assert!(classify_rows(vec![], TERTILES).is_err());
    }
}
