use clap::Parser;
use sandwich_etl::core::validator::validate;
use sandwich_etl::utils::error::ErrorSeverity;
use sandwich_etl::utils::{logger, validation::Validate};
use sandwich_etl::{
    seed_stock, CliConfig, CsvDataStore, CycleReport, DataStore, DryRunStore, Orchestrator,
    SandwichError, ScriptedConsole, Settings, StdConsole,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let store = CsvDataStore::new(&settings.data_dir, settings.categories.clone());

    let outcome = if cli.dry_run {
        tracing::info!("Dry run: no rows will be written");
        run_cycle(DryRunStore::new(store), &cli, &settings).await
    } else {
        match store.initialize() {
            Ok(()) => run_cycle(store, &cli, &settings).await,
            Err(e) => Err(e),
        }
    };

    match outcome {
        Ok(report) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report.to_json(&settings.categories))?
                );
            }
            if cli.dry_run {
                println!("Dry run complete, nothing was written.");
            }
        }
        Err(e) => {
            tracing::error!(
                "Market cycle failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e);
        }
    }

    Ok(())
}

async fn run_cycle<S: DataStore>(
    store: S,
    cli: &CliConfig,
    settings: &Settings,
) -> Result<CycleReport, SandwichError> {
    if let Some(raw) = &cli.seed_stock {
        let row = validate(raw).map_err(|e| SandwichError::ConfigValidationError {
            field: "seed_stock".to_string(),
            message: e.to_string(),
        })?;
        if seed_stock(&store, &row).await? {
            println!("Stock seeded with {}", row);
        }
    }

    match &cli.sales {
        Some(line) => {
            let console = ScriptedConsole::new([line.clone()]).echoing();
            let mut orchestrator = Orchestrator::from_config(store, console, settings);
            orchestrator.run().await
        }
        None => {
            let mut orchestrator = Orchestrator::from_config(store, StdConsole::new(), settings);
            orchestrator.run().await
        }
    }
}

fn exit_with(e: &SandwichError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
