use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FcError {
    #[error("File not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FcError>;
