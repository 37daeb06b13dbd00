use shared::models::PriceField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    // Raised while sanitizing the raw series. Messages are shown to the end user as-is.
    #[error("No data fetched. Please check the stock symbol or time period.")]
    EmptySeries,

    #[error("'{0}' column not found in data.")]
    MissingField(PriceField),

    #[error("All 'Close' values are missing. Cannot proceed.")]
    AllValuesMissing,

    #[error("Timestamps are not strictly increasing at row {index}.")]
    UnorderedTimestamps { index: usize },

    #[error("Insufficient history: at least {required} prices are needed, got {actual}.")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

impl EngineError {
    /// Stable short name of the error, for callers that branch on the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::EmptySeries => "EmptySeries",
            EngineError::MissingField(_) => "MissingField",
            EngineError::AllValuesMissing => "AllValuesMissing",
            EngineError::UnorderedTimestamps { .. } => "UnorderedTimestamps",
            EngineError::InsufficientHistory { .. } => "InsufficientHistory",
            EngineError::ConfigError(_) => "ConfigError",
            EngineError::CsvSystemError { .. } => "CsvSystemError",
            EngineError::IoError { .. } => "IoError",
            EngineError::CsvDataFormatError(_) => "CsvDataFormatError",
            EngineError::SerializationError { .. } => "SerializationError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            EngineError::MissingField(PriceField::Close).to_string(),
            "'Close' column not found in data."
        );
        assert_eq!(
            EngineError::AllValuesMissing.to_string(),
            "All 'Close' values are missing. Cannot proceed."
        );
        assert!(EngineError::EmptySeries.to_string().starts_with("No data fetched"));
    }

    #[test]
    fn test_kind() {
        let err = EngineError::InsufficientHistory { required: 2, actual: 1 };
        assert_eq!(err.kind(), "InsufficientHistory");
        assert_eq!(EngineError::ConfigError("bad".into()).kind(), "ConfigError");
    }
}
