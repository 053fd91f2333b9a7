#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{ForecastSettings, CATEGORY_COUNT, DEFAULT_CATEGORIES};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SandwichError};
use crate::utils::validation::{
    validate_category_names, validate_path, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

/// Fully resolved configuration: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    pub categories: Vec<String>,
    pub forecast: ForecastSettings,
    pub max_attempts: Option<u32>,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            forecast: ForecastSettings::default(),
            max_attempts: None,
            log_json: false,
        }
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn forecast_settings(&self) -> ForecastSettings {
        self.forecast
    }

    fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("store.data_dir", &self.data_dir)?;
        validate_category_names("categories.names", &self.categories, CATEGORY_COUNT)?;
        validate_positive_number("forecast.window", self.forecast.window, 1)?;
        if !self.forecast.safety_margin.is_finite() {
            return Err(SandwichError::InvalidConfigValueError {
                field: "forecast.safety_margin".to_string(),
                value: self.forecast.safety_margin.to_string(),
                reason: "Value must be a finite number".to_string(),
            });
        }
        validate_range(
            "forecast.safety_margin",
            self.forecast.safety_margin,
            f64::MIN_POSITIVE,
            100.0,
        )?;
        if let Some(max) = self.max_attempts {
            validate_positive_number("input.max_attempts", max as usize, 1)?;
        }
        Ok(())
    }
}
