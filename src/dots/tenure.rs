use std::fmt;

use serde::{Deserialize, Serialize};

/// Households represented by one dot.
pub const HOUSEHOLDS_PER_DOT: f64 = 10.0;

/// Housing-tenure categories, each drawn as its own dot colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenureCategory {
    #[serde(rename = "Owner_with_mortgage")]
    OwnerWithMortgage,
    #[serde(rename = "Owner_no_mortgage")]
    OwnerNoMortgage,
    #[serde(rename = "Renter_not_in_subsidized_housing")]
    RenterNotInSubsidizedHousing,
    #[serde(rename = "Renter_in_subsidized_housing")]
    RenterInSubsidizedHousing,
}

impl TenureCategory {
    /// All categories, in sampling order.
    pub const ALL: [Self; 4] = [
        Self::OwnerWithMortgage,
        Self::OwnerNoMortgage,
        Self::RenterNotInSubsidizedHousing,
        Self::RenterInSubsidizedHousing,
    ];

    /// Name written to the `type` field of the output layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OwnerWithMortgage => "Owner_with_mortgage",
            Self::OwnerNoMortgage => "Owner_no_mortgage",
            Self::RenterNotInSubsidizedHousing => "Renter_not_in_subsidized_housing",
            Self::RenterInSubsidizedHousing => "Renter_in_subsidized_housing",
        }
    }
}

impl fmt::Display for TenureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Household counts for one region, as read from the tenure table (missing values are zero).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TenureCounts {
    pub owner: f64,
    pub renter: f64,
    pub owner_with_mortgage: f64,
    pub renter_in_subsidized_housing: f64,
}

impl TenureCounts {
    /// Source column names in the tenure table.
    pub const OWNER: &'static str = "Owner";
    pub const RENTER: &'static str = "Renter";
    pub const OWNER_WITH_MORTGAGE: &'static str = "Owner_with_mortgage";
    pub const RENTER_IN_SUBSIDIZED_HOUSING: &'static str = "Renter_in_subsidized_housing";

    #[inline] pub fn total(&self) -> f64 { self.owner + self.renter }

    #[inline] pub fn owner_no_mortgage(&self) -> f64 { self.owner - self.owner_with_mortgage }

    #[inline]
    pub fn renter_not_in_subsidized_housing(&self) -> f64 {
        self.renter - self.renter_in_subsidized_housing
    }

    /// Household count for a category. Derived categories may be negative on inconsistent input.
    pub fn count(&self, category: TenureCategory) -> f64 {
        match category {
            TenureCategory::OwnerWithMortgage => self.owner_with_mortgage,
            TenureCategory::OwnerNoMortgage => self.owner_no_mortgage(),
            TenureCategory::RenterNotInSubsidizedHousing => self.renter_not_in_subsidized_housing(),
            TenureCategory::RenterInSubsidizedHousing => self.renter_in_subsidized_housing,
        }
    }

    /// Fractional dots for a category (`count / households_per_dot`), before rounding.
    pub fn dots(&self, category: TenureCategory, households_per_dot: f64) -> f64 {
        self.count(category) / households_per_dot
    }
}

/// Number of dots to place for `count` households.
///
/// Rounds half to even (9.5 -> 10, 2.5 -> 2) and clamps negative or non-finite results to zero.
pub fn dots_needed(count: f64, households_per_dot: f64) -> usize {
    let n = (count / households_per_dot).round_ties_even();
    if n.is_finite() && n > 0.0 { n as usize } else { 0 }
}
