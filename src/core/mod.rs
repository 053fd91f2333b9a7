pub mod forecast;
pub mod orchestrator;
pub mod surplus;
pub mod validator;

pub use crate::domain::model::{CycleReport, Dataset, ForecastSettings};
pub use crate::domain::ports::{ConfigProvider, DataStore, OperatorConsole};
pub use crate::utils::error::Result;
