use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to parse JSON document: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request error: {0}")]
    ApiRequestError(reqwest::Error),

    #[error("API returned an error status: {status} for {endpoint}: {message}")]
    ApiStatusError {
        status: reqwest::StatusCode,
        endpoint: String,
        message: String,
    },

    #[error("Failed to decode API JSON response from {endpoint}: {source}")]
    ApiJsonDecodeError {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("API reported failure for {endpoint}: {message}")]
    ApiUnsuccessful { endpoint: String, message: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid value for '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Taxon ID {0} is already in use")]
    TaxonIdTaken(u64),

    #[error("Portal ID {0} is already in use")]
    PortalIdTaken(u64),

    #[error("No record found for {0}")]
    RecordNotFound(String),

    // Caller-contract violation: a term document must be a JSON object.
    #[error("Term document must be a JSON object, found {found}")]
    NotAMapping { found: &'static str },
}

pub type Result<T> = std::result::Result<T, CrateError>;
