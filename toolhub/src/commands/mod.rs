//! # Comandos (Transformaciones)
//!
//! Este módulo contiene las funciones puras que se aplican a cada archivo
//! del lote. Ninguna conoce al pool: `Tool::transform` las adapta a la firma
//! `&[u8] -> Result<Vec<u8>, BoxError>` que consumen los workers.
//!
//! ## Categorías de comandos
//!
//! - **basic**: texto (uppercase, slugify)
//! - **encoding**: hash SHA256 y base64
//! - **json**: pretty-print y minify

pub mod basic;
pub mod encoding;
pub mod json;

pub use basic::*;
pub use encoding::*;
pub use json::*;

use crate::error::ToolError;
use serde::Serialize;
use std::fmt;
use workerpool::{transform, Transform};

/// Función que se aplica a cada archivo del lote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Hash,
    Uppercase,
    Base64Encode,
    Base64Decode,
    JsonFormat,
    JsonMinify,
    Slugify,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Hash => "hash",
            Tool::Uppercase => "uppercase",
            Tool::Base64Encode => "base64encode",
            Tool::Base64Decode => "base64decode",
            Tool::JsonFormat => "jsonformat",
            Tool::JsonMinify => "jsonminify",
            Tool::Slugify => "slugify",
        }
    }

    /// Aplica la herramienta a un payload
    pub fn apply(&self, input: &[u8]) -> Result<Vec<u8>, ToolError> {
        let output = match self {
            Tool::Hash => hash(input).into_bytes(),
            Tool::Uppercase => uppercase(input),
            Tool::Base64Encode => base64_encode(input).into_bytes(),
            Tool::Base64Decode => base64_decode(as_text(input)?)?,
            Tool::JsonFormat => json_pretty(as_text(input)?)?.into_bytes(),
            Tool::JsonMinify => json_minify(as_text(input)?)?.into_bytes(),
            Tool::Slugify => slugify(as_text(input)?).into_bytes(),
        };
        Ok(output)
    }

    /// Adapta la herramienta a una transformación del pool
    pub fn transform(self) -> Transform {
        transform(move |input| self.apply(input).map_err(Into::into))
    }
}

fn as_text(input: &[u8]) -> Result<&str, ToolError> {
    Ok(std::str::from_utf8(input)?)
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
