use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "sandwich-etl")]
#[command(about = "Record market sandwich sales and forecast stock for the next market")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding sales.csv, stock.csv and surplus.csv
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Sales line to use instead of prompting, e.g. "10,20,30,40,50,60"
    #[arg(long)]
    pub sales: Option<String>,

    /// Initial stock row written when the stock dataset is empty
    #[arg(long)]
    pub seed_stock: Option<String>,

    /// Give up after this many invalid sales entries
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Run the whole cycle without writing any rows
    #[arg(long)]
    pub dry_run: bool,

    /// Print the cycle report as JSON on completion
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併設定：預設值 < TOML 檔案 < 命令列參數
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => Settings::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if self.max_attempts.is_some() {
            settings.max_attempts = self.max_attempts;
        }
        if self.log_json {
            settings.log_json = true;
        }

        Ok(settings)
    }
}
