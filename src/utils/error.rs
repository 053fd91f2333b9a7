use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandwichError {
    #[error("'{token}' (value {position}) is not a whole number")]
    ParseError { token: String, position: usize },

    #[error("Exactly {expected} values required, you provided {actual}")]
    CountError { expected: usize, actual: usize },

    #[error("Dataset '{dataset}' has unexpected shape: {message}")]
    DataShapeError { dataset: String, message: String },

    #[error("Dataset '{dataset}' has no data rows")]
    EmptyDatasetError { dataset: String },

    #[error("No sales history available for category {category}")]
    InsufficientHistoryError { category: usize },

    #[error("Failed to append to dataset '{dataset}': {message}")]
    PersistenceError { dataset: String, message: String },

    #[error("No valid sales data after {attempts} attempts")]
    RetriesExhaustedError { attempts: u32 },

    #[error("Input closed before valid sales data was entered")]
    InputClosedError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SandwichError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ParseError { .. }
            | Self::CountError { .. }
            | Self::RetriesExhaustedError { .. }
            | Self::InputClosedError => ErrorCategory::Input,
            Self::DataShapeError { .. }
            | Self::EmptyDatasetError { .. }
            | Self::InsufficientHistoryError { .. } => ErrorCategory::Data,
            Self::PersistenceError { .. } => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ParseError { .. } | Self::CountError { .. } => ErrorSeverity::Low,
            Self::RetriesExhaustedError { .. } | Self::InputClosedError => ErrorSeverity::Medium,
            Self::DataShapeError { .. }
            | Self::EmptyDatasetError { .. }
            | Self::InsufficientHistoryError { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::PersistenceError { .. } | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 只有輸入格式錯誤可以透過重新輸入修正
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ParseError { .. } | Self::CountError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ParseError { .. } | Self::CountError { .. } => {
                "Enter six whole numbers separated by commas, e.g. 10,20,30,40,50,60"
            }
            Self::RetriesExhaustedError { .. } => {
                "Run again, or raise the attempt limit with --max-attempts"
            }
            Self::InputClosedError => "Provide sales data on standard input or with --sales",
            Self::DataShapeError { .. } => {
                "Check that every row in the dataset file has six integer cells"
            }
            Self::EmptyDatasetError { .. } => {
                "Seed the stock dataset with --seed-stock before the first run"
            }
            Self::InsufficientHistoryError { .. } => {
                "Record at least one market's sales before forecasting stock"
            }
            Self::PersistenceError { .. } | Self::IoError(_) => {
                "Check that the data directory exists and is writable; earlier rows may already be saved"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration file and CLI flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid data: {}", self),
            ErrorCategory::Data => format!("Stored data problem: {}", self),
            ErrorCategory::Storage => format!("Could not save data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn data_shape(dataset: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataShapeError {
            dataset: dataset.into(),
            message: message.into(),
        }
    }

    pub fn persistence(dataset: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PersistenceError {
            dataset: dataset.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SandwichError>;
