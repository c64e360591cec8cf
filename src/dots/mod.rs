//! Dot-density generation: tenure counts per region become category-tagged points
//! scattered over the residential part of each region.

mod config;
mod export;
mod filter;
mod load;
mod pipeline;
mod tenure;

pub use config::DotDensityConfig;
pub use export::{dots_to_geojson, write_dots};
pub use filter::{FilteredRegion, RESIDENTIAL_CLASSES, filter_regions, residential_parcels};
pub use load::{Region, join_regions, load_regions};
pub use pipeline::{Dot, DotSummary, generate_dots, run};
pub use tenure::{HOUSEHOLDS_PER_DOT, TenureCategory, TenureCounts, dots_needed};
