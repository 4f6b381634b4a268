use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DummyError {
    // Config errors
    #[error("CONFIG_READ_ERROR: failed to read '{}': {reason}", path.display())]
    ConfigRead { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID: failed to parse '{}': {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    // Data errors
    #[error("DATA_READ_ERROR: failed to read '{}': {reason}", path.display())]
    DataRead { path: PathBuf, reason: String },

    #[error("DATA_UNSUPPORTED_FORMAT: '{}' must end in .toml or .json", path.display())]
    DataUnsupportedFormat { path: PathBuf },

    #[error("DATA_INVALID: {0}")]
    DataInvalid(String),

    // Template errors
    #[error("TEMPLATE_ERROR: {0}")]
    Template(#[from] crate::template::error::TemplateError),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for DummyError {
    fn from(err: serde_json::Error) -> Self {
        DummyError::DataInvalid(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for DummyError {
    fn from(err: toml::de::Error) -> Self {
        DummyError::DataInvalid(format!("TOML error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DummyError>;
