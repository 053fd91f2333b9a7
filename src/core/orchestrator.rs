use crate::core::forecast::forecast_stock;
use crate::core::surplus::calculate_surplus;
use crate::core::validator::validate;
use crate::domain::model::{
    CategoryRow, CycleReport, Dataset, ForecastRow, ForecastSettings, SalesRow, StockRow,
    SurplusRow, CATEGORY_COUNT, DEFAULT_CATEGORIES,
};
use crate::domain::ports::{ConfigProvider, DataStore, OperatorConsole};
use crate::utils::error::{Result, SandwichError};

pub const WELCOME: &str = "Welcome to LOVE SANDWICHES DATA AUTOMATION.\n";
pub const INSTRUCTIONS: [&str; 3] = [
    "Please enter sales data from the last market.",
    "Data should be six numbers, separated by commas.",
    "Example: 10,20,30,40,50,60\n",
];
pub const PROMPT: &str = "Enter your data here: ";

/// Runs one market cycle: sales in, then surplus and next stock out.
///
/// Steps run once each in a fixed order. Only the sales prompt retries;
/// any other failure ends the run and rows appended before it stay put.
pub struct Orchestrator<S: DataStore, C: OperatorConsole> {
    store: S,
    console: C,
    categories: Vec<String>,
    settings: ForecastSettings,
    max_attempts: Option<u32>,
}

impl<S: DataStore, C: OperatorConsole> Orchestrator<S, C> {
    pub fn new(store: S, console: C) -> Self {
        Self {
            store,
            console,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            settings: ForecastSettings::default(),
            max_attempts: None,
        }
    }

    pub fn from_config<P: ConfigProvider>(store: S, console: C, config: &P) -> Self {
        Self::new(store, console)
            .with_categories(config.categories().to_vec())
            .with_forecast_settings(config.forecast_settings())
            .with_max_attempts(config.max_attempts())
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_forecast_settings(mut self, settings: ForecastSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn into_parts(self) -> (S, C) {
        (self.store, self.console)
    }

    pub async fn run(&mut self) -> Result<CycleReport> {
        tracing::info!("Starting market cycle");
        self.console.say(WELCOME);

        let sales = prompt_until_valid(&mut self.console, self.max_attempts).await?;
        self.persist(Dataset::Sales, &sales).await?;

        let surplus = self.compute_surplus(&sales).await?;
        self.persist(Dataset::Surplus, &surplus).await?;

        let forecast = self.compute_forecast().await?;
        self.persist(Dataset::Stock, &forecast).await?;

        let report = CycleReport {
            sales,
            surplus,
            forecast,
        };
        self.announce(&report);

        tracing::info!(%sales, %surplus, %forecast, "Market cycle completed");
        Ok(report)
    }

    async fn persist(&mut self, dataset: Dataset, row: &CategoryRow) -> Result<()> {
        self.console
            .say(&format!("Updating {} worksheet...\n", dataset.name()));
        self.store.append_row(dataset, &row.to_vec()).await?;
        tracing::debug!(%dataset, %row, "Row appended");
        self.console
            .say(&format!("{} data updated successfully.\n", title(dataset)));
        Ok(())
    }

    async fn compute_surplus(&mut self, sales: &SalesRow) -> Result<SurplusRow> {
        self.console.say("Calculating surplus data...\n");
        let stock = self
            .store
            .latest_row(Dataset::Stock)
            .await?
            .ok_or_else(|| SandwichError::EmptyDatasetError {
                dataset: Dataset::Stock.name().to_string(),
            })?;

        let surplus = calculate_surplus(sales, &stock)?;
        self.console.say(&surplus.to_string());
        Ok(surplus)
    }

    async fn compute_forecast(&mut self) -> Result<ForecastRow> {
        self.console.say("Calculating stock data...\n");
        let mut history = Vec::with_capacity(CATEGORY_COUNT);
        for column in 0..CATEGORY_COUNT {
            let entries = self
                .store
                .last_n_rows(Dataset::Sales, self.settings.window, column)
                .await?;
            history.push(entries);
        }
        forecast_stock(&history, &self.settings)
    }

    fn announce(&mut self, report: &CycleReport) {
        self.console
            .say("Make the following numbers of sandwiches for next market:\n");
        for (name, amount) in report.forecast_by_category(&self.categories) {
            self.console.say(&format!("  {}: {}", name, amount));
        }
    }
}

/// Prompts until the operator enters a valid sales line.
///
/// Parse and count errors are shown and retried; `max_attempts` of `None`
/// retries forever. Closed input and console failures end the loop.
pub async fn prompt_until_valid<C: OperatorConsole + ?Sized>(
    console: &mut C,
    max_attempts: Option<u32>,
) -> Result<SalesRow> {
    let mut attempts = 0u32;
    loop {
        for line in INSTRUCTIONS {
            console.say(line);
        }

        let Some(raw) = console.prompt(PROMPT).await? else {
            return Err(SandwichError::InputClosedError);
        };
        attempts += 1;

        match validate(&raw) {
            Ok(sales) => {
                console.say("Data valid");
                tracing::debug!(attempts, %sales, "Sales data accepted");
                return Ok(sales);
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(attempts, error = %e, "Rejected sales input");
                console.say(&format!("Invalid data: {}, please try again.\n", e));
                if max_attempts.is_some_and(|max| attempts >= max) {
                    return Err(SandwichError::RetriesExhaustedError { attempts });
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Appends `row` to the stock dataset only when it has no rows yet.
/// Returns whether a row was written.
pub async fn seed_stock<S: DataStore>(store: &S, row: &StockRow) -> Result<bool> {
    if store.latest_row(Dataset::Stock).await?.is_some() {
        tracing::info!("Stock dataset already has data, seed skipped");
        return Ok(false);
    }
    store.append_row(Dataset::Stock, &row.to_vec()).await?;
    tracing::info!(%row, "Stock dataset seeded");
    Ok(true)
}

fn title(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::Sales => "Sales",
        Dataset::Stock => "Stock",
        Dataset::Surplus => "Surplus",
    }
}
