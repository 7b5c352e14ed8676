use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinteseError {
    #[error("Synthesis directory (./{0}) not found")]
    DirectoryNotFound(String),

    #[error("Invalid reference period: {0}")]
    InvalidPeriod(String),

    #[error("Scenario {0} not recognized")]
    UnrecognizedScenario(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Configuration: {0}")]
    Config(String),

    #[error("Failed to enrich file {file}: {source}")]
    Enrich {
        file: String,
        #[source]
        source: Box<SinteseError>,
    },

    #[error("Failed to upload file {file}: {message}")]
    Upload { file: String, message: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, SinteseError>;
