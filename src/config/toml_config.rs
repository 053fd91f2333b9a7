use crate::config::Settings;
use crate::domain::model::RoundingPolicy;
use crate::utils::error::{Result, SandwichError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: Option<StoreConfig>,
    pub categories: Option<CategoriesConfig>,
    pub forecast: Option<ForecastConfig>,
    pub input: Option<InputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub window: Option<usize>,
    pub safety_margin: Option<f64>,
    pub rounding: Option<RoundingPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SandwichError::ConfigError {
            message: format!("cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SandwichError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SANDWICH_DATA_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SandwichError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用到預設值之上
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();

        if let Some(store) = self.store {
            settings.data_dir = store.data_dir;
        }
        if let Some(categories) = self.categories {
            settings.categories = categories.names;
        }
        if let Some(forecast) = self.forecast {
            if let Some(window) = forecast.window {
                settings.forecast.window = window;
            }
            if let Some(margin) = forecast.safety_margin {
                settings.forecast.safety_margin = margin;
            }
            if let Some(rounding) = forecast.rounding {
                settings.forecast.rounding = rounding;
            }
        }
        if let Some(input) = self.input {
            settings.max_attempts = input.max_attempts;
        }
        if let Some(logging) = self.logging {
            settings.log_json = logging.json.unwrap_or(false);
        }

        settings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_settings().validate()
    }
}
