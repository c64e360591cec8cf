use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::common;

/// Read a pipeline config from a JSON file. Fields left out keep their defaults.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    common::require_file_exists(path)?;
    let file = File::open(path)
        .with_context(|| format!("[config] Failed to open {}", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[config] Failed to parse {}", path.display()))
}
