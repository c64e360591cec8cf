//! Bivariate choropleth: two indicators are binned into tertiles and each region is
//! coloured by the pair of classes it falls in.

mod classify;
mod color;
mod config;
mod load;
mod pipeline;
mod render;

pub use classify::{BivariateClass, ClassifyError, TERTILES, classify, quantile_breaks, quantile_classes};
pub use color::{BIVARIATE_COLORS, color_for_label};
pub use config::BivariateConfig;
pub use load::{IndicatorRow, IndicatorSource, join_indicators, load_indicators};
pub use pipeline::{BivariateSummary, ClassifiedRegion, classify_rows, run};
pub use render::{ContextLayers, render_map, write_map};
