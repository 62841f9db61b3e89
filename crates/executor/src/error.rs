use thiserror::Error;

use common::error::Error as NetworkError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to parse network {source_name}: {reason}")]
    ParseError { source_name: String, reason: String },

    #[error("Channel sender failed: Receiver has been dropped.")]
    ChannelSendFailed,

    #[error("Solver task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Network error: {0}")]
    NetworkError(#[from] NetworkError),
}
