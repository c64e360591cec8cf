#![doc = "Dot-density and bivariate choropleth pipelines"]
mod common;
mod config;
mod geom;
mod io;
mod layer;

pub mod bivariate;
pub mod dots;

#[doc(inline)]
pub use config::load_config;

#[doc(inline)]
pub use layer::FeatureLayer;

#[doc(inline)]
pub use geom::{DEFAULT_MAX_ATTEMPTS, SampleError, dissolve, overlay_intersection, sample_points};
