use query_filter::FilterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the filter file: {0}")]
    FilterFileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the filter tree: {0}")]
    FilterDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid dialect provided: {0}")]
    InvalidDialect(String),

    #[error("Failed to compile the filter: {0}")]
    Compile(#[from] FilterError),
}
