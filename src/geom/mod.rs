mod bbox;
mod overlay;
mod sample;

use bbox::BoundingBox;
pub(crate) use bbox::merge_bounds;
pub use overlay::{dissolve, overlay_intersection};
pub use sample::{DEFAULT_MAX_ATTEMPTS, SampleError, sample_points};
