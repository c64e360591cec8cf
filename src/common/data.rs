use std::{fs::File, path::Path, sync::Arc};

use anyhow::{Context, Result, bail, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::*};

/// Row index column used to restore layer order after a join.
const ROW_INDEX: &str = "idx";

/// Reads a CSV file from `path` into a Polars DataFrame, forcing `id_col` to be read as a string.
pub(crate) fn read_csv(path: &Path, id_col: &str) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv] Failed to open CSV file: {}", path.display()))?;

    let schema = Arc::new(Schema::from_iter([Field::new(id_col.into(), DataType::String)]));
    let options = CsvReadOptions::default()
        .with_schema_overwrite(Some(schema));

    let df = CsvReader::new(file)
        .with_options(options)
        .finish()
        .with_context(|| format!("[io::csv] Failed to read CSV from {:?}", path))?;

    ensure!(df.column(id_col).is_ok(), "[io::csv] {:?} has no id column {:?}", path, id_col);
    Ok(df)
}

/// Left-join `table` onto an ordered list of ids, returning one row per id in the same order.
/// Ids absent from `table` get null values; duplicate ids in `table` are rejected.
pub(crate) fn left_join_on_ids(ids: &[String], table: &DataFrame, table_id: &str) -> Result<DataFrame> {
    let left = DataFrame::new(vec![Column::new("id".into(), ids)])?
        .with_row_index(ROW_INDEX.into(), None)?;

    let joined = left.left_join(table, ["id"], [table_id])
        .with_context(|| format!("[common::data] Failed to join on {:?}", table_id))?
        .sort([ROW_INDEX], SortMultipleOptions::default())?;

    ensure!(
        joined.height() == ids.len(),
        "[common::data] join on {:?} produced {} rows for {} ids; table ids must be unique",
        table_id, joined.height(), ids.len(),
    );

    Ok(joined)
}

/// Get a numeric column as f64 values, treating nulls and NaN as zero.
/// Present values that do not parse as numbers are an error.
pub(crate) fn column_f64_or_zero(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let raw = df.column(name)
        .with_context(|| format!("[common::data] missing column {:?}", name))?
        .as_materialized_series();
    let column = raw.cast(&DataType::Float64)
        .with_context(|| format!("[common::data] column {:?} is not numeric", name))?;

    // non-strict casts turn unparsable cells into nulls
    let malformed = &raw.is_not_null() & &column.is_null();
    if let Some(row) = (&malformed).into_iter().position(|flag| flag == Some(true)) {
        bail!("[common::data] column {:?} has a non-numeric value at row {}", name, row);
    }

    Ok(column.f64()?.into_iter()
        .map(|value| value.filter(|v| !v.is_nan()).unwrap_or(0.0))
        .collect())
}

/// Get a column as optional strings.
pub(crate) fn column_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)
        .with_context(|| format!("[common::data] missing column {:?}", name))?
        .cast(&DataType::String)?;

    Ok(column.str()?.into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}
