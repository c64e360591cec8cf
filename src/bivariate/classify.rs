use std::fmt;

/// Number of classes per indicator.
pub const TERTILES: usize = 3;

/// Reasons a column cannot be classified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    #[error("cannot classify an empty column")]
    Empty,

    #[error("number of classes must be positive")]
    NoClasses,

    #[error("non-finite value {value} at row {row}")]
    NonFinite { row: usize, value: f64 },
}

/// Quantile breakpoints for `k` classes over the whole column.
///
/// Break `i` (1-based) is the value at percentile `100 * i / k`, linearly interpolated
/// between order statistics; the last break is the column maximum. Repeated breaks collapse,
/// so heavily tied columns produce fewer than `k` classes.
pub fn quantile_breaks(values: &[f64], k: usize) -> Result<Vec<f64>, ClassifyError> {
    if k == 0 { return Err(ClassifyError::NoClasses) }
    if values.is_empty() { return Err(ClassifyError::Empty) }
    if let Some((row, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ClassifyError::NonFinite { row, value });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut breaks = (1..=k)
        .map(|i| percentile(&sorted, i, k))
        .collect::<Vec<_>>();
    breaks.dedup();
    Ok(breaks)
}

/// Linear-interpolated value at fraction `num / den` of a sorted, non-empty slice.
fn percentile(sorted: &[f64], num: usize, den: usize) -> f64 {
    // exact when the rank is integral
    let pos = (num * (sorted.len() - 1)) as f64 / den as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi { return sorted[lo] }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Assign each value the smallest class whose break is at least the value.
/// Values exactly at a break fall in the lower class; values above the last break get the top class.
pub fn classify(values: &[f64], breaks: &[f64]) -> Vec<usize> {
    let top = breaks.len().saturating_sub(1);
    values.iter()
        .map(|&v| breaks.iter().position(|&b| v <= b).unwrap_or(top))
        .collect()
}

/// Compute quantile breaks over `values` and classify them in one batch.
pub fn quantile_classes(values: &[f64], k: usize) -> Result<Vec<usize>, ClassifyError> {
    let breaks = quantile_breaks(values, k)?;
    Ok(classify(values, &breaks))
}

/// The pair of per-indicator classes of a region; displays as `"x-y"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BivariateClass {
    pub x: usize,
    pub y: usize,
}

impl BivariateClass {
    pub fn new(x: usize, y: usize) -> Self { Self { x, y } }

    /// Combined label, e.g. `"1-2"`.
    pub fn label(&self) -> String { self.to_string() }
}

impl fmt::Display for BivariateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}
