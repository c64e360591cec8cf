//! SVG format writing operations for map rendering.

mod path;
mod writer;

pub(crate) use path::*;
pub(crate) use writer::*;
