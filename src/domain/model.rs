use crate::utils::error::{Result, SandwichError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of sandwich categories tracked in every dataset.
pub const CATEGORY_COUNT: usize = 6;

pub const DEFAULT_CATEGORIES: [&str; CATEGORY_COUNT] =
    ["bacon", "chicken", "ham", "tuna", "egg mayo", "turkey"];

/// One integer per category, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow([i64; CATEGORY_COUNT]);

pub type SalesRow = CategoryRow;
pub type StockRow = CategoryRow;
pub type SurplusRow = CategoryRow;
pub type ForecastRow = CategoryRow;

impl CategoryRow {
    pub fn new(values: [i64; CATEGORY_COUNT]) -> Self {
        Self(values)
    }

    /// Checks the shape of a row read back from `dataset`.
    pub fn from_cells(dataset: Dataset, cells: &[i64]) -> Result<Self> {
        let values: [i64; CATEGORY_COUNT] = cells.try_into().map_err(|_| {
            SandwichError::data_shape(
                dataset.name(),
                format!("expected {} cells, found {}", CATEGORY_COUNT, cells.len()),
            )
        })?;
        Ok(Self(values))
    }

    pub fn values(&self) -> &[i64; CATEGORY_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.0.to_vec()
    }
}

impl fmt::Display for CategoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", cells.join(", "))
    }
}

/// The three append-only tables the tool maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Sales,
    Stock,
    Surplus,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Sales, Dataset::Stock, Dataset::Surplus];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Sales => "sales",
            Dataset::Stock => "stock",
            Dataset::Surplus => "surplus",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tie-breaking rule applied when a forecast lands exactly between two integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// 2.5 -> 2, 3.5 -> 4
    #[default]
    HalfEven,
    /// 2.5 -> 3, -2.5 -> -3
    HalfAwayFromZero,
}

impl RoundingPolicy {
    /// Rounds to a whole number, or `None` when the result is not finite
    /// or falls outside the `i64` range.
    pub fn apply(&self, value: f64) -> Option<i64> {
        let rounded = match self {
            RoundingPolicy::HalfEven => value.round_ties_even(),
            RoundingPolicy::HalfAwayFromZero => value.round(),
        };
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
            Some(rounded as i64)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// Trailing sales entries averaged per category.
    pub window: usize,
    pub safety_margin: f64,
    pub rounding: RoundingPolicy,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            window: 5,
            safety_margin: 1.1,
            rounding: RoundingPolicy::HalfEven,
        }
    }
}

/// Everything one market cycle produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub sales: SalesRow,
    pub surplus: SurplusRow,
    pub forecast: ForecastRow,
}

impl CycleReport {
    /// Pairs each forecast value with its category label.
    pub fn forecast_by_category<'a>(&self, categories: &'a [String]) -> Vec<(&'a str, i64)> {
        categories
            .iter()
            .map(String::as_str)
            .zip(self.forecast.iter())
            .collect()
    }

    pub fn to_json(&self, categories: &[String]) -> serde_json::Value {
        let keyed = |row: &CategoryRow| -> BTreeMap<String, i64> {
            categories.iter().cloned().zip(row.iter()).collect()
        };
        serde_json::json!({
            "sales": keyed(&self.sales),
            "surplus": keyed(&self.surplus),
            "forecast": keyed(&self.forecast),
        })
    }
}
