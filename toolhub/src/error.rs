//! # Errores
//! src/error.rs

use thiserror::Error;

/// Errores de las herramientas de transformación
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("input cannot be empty")]
    EmptyInput,

    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errores de configuración
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("workers must be >= 1")]
    NoWorkers,

    #[error("at least one input file is required")]
    NoFiles,
}
