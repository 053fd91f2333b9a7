use crate::domain::model::{Dataset, ForecastSettings};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Append-only tabular storage holding the sales, stock and surplus datasets.
///
/// Rows come back as raw cells; callers check the shape they need.
pub trait DataStore: Send + Sync {
    /// Most recent row of `dataset`, or `None` when it has no data rows.
    fn latest_row(
        &self,
        dataset: Dataset,
    ) -> impl std::future::Future<Output = Result<Option<Vec<i64>>>> + Send;

    /// Cells of zero-based `column` from the last `n` rows, oldest first.
    fn last_n_rows(
        &self,
        dataset: Dataset,
        n: usize,
        column: usize,
    ) -> impl std::future::Future<Output = Result<Vec<i64>>> + Send;

    fn append_row(
        &self,
        dataset: Dataset,
        row: &[i64],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The operator's terminal: blocking line prompts plus progress messages.
#[async_trait]
pub trait OperatorConsole: Send {
    /// Shows `message` and waits for one line. `None` means input was closed.
    async fn prompt(&mut self, message: &str) -> Result<Option<String>>;

    fn say(&mut self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn categories(&self) -> &[String];
    fn forecast_settings(&self) -> ForecastSettings;
    /// `None` keeps prompting until the input is valid.
    fn max_attempts(&self) -> Option<u32>;
}
