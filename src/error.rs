use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced while framing transport stream packets.
#[derive(Error, Debug)]
pub enum TsError {
    /// The underlying byte source failed to read, seek or close.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A source was built without a required option.
    #[error("misconfigured: {0}")]
    Misconfigured(String),

    /// Bytes that do not form a valid packet.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A numeric configuration value could not be parsed.
    #[error("parse int error: {0}")]
    ParseInt(#[from] ParseIntError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TsError>;
