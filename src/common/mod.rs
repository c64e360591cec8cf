mod data;
mod fs;

pub(crate) use data::*;
pub(crate) use fs::*;
