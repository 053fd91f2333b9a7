pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{
    console::{ScriptedConsole, StdConsole},
    csv_store::CsvDataStore,
    dry_run::DryRunStore,
    memory_store::InMemoryStore,
};
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::orchestrator::{prompt_until_valid, seed_stock, Orchestrator};
pub use domain::model::{CategoryRow, CycleReport, Dataset, ForecastSettings, RoundingPolicy};
pub use domain::ports::{ConfigProvider, DataStore, OperatorConsole};
pub use utils::error::{Result, SandwichError};
