//! # Configuración del Procesador de Lotes
//! src/config.rs
//!
//! Este módulo define la configuración de `toolhub` con soporte completo
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./toolhub --workers 4 --function slugify --timeout-ms 2000 a.txt b.txt
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! TOOLHUB_WORKERS=8 TOOLHUB_FORMAT=json ./toolhub data/*.json
//! ```

use crate::commands::Tool;
use crate::error::ConfigError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Formato del reporte en stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuración de un lote
#[derive(Debug, Clone, Parser)]
#[command(name = "toolhub")]
#[command(about = "Aplica una transformación a varios archivos con un pool de workers acotado")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Archivos a procesar
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    // === Pool ===

    /// Número de workers del pool
    #[arg(short, long, default_value = "3", env = "TOOLHUB_WORKERS")]
    pub workers: usize,

    /// Capacidad de las colas de jobs y resultados (por defecto, un lugar por archivo)
    #[arg(long, env = "TOOLHUB_BUFFER")]
    pub buffer: Option<usize>,

    // === Transformación ===

    /// Función que se aplica a cada archivo
    #[arg(short, long, value_enum, default_value_t = Tool::Hash, env = "TOOLHUB_FUNCTION")]
    pub function: Tool,

    /// Plazo para todo el lote en milisegundos (0 = sin límite)
    #[arg(long = "timeout-ms", default_value = "0", env = "TOOLHUB_TIMEOUT_MS")]
    pub timeout_ms: u64,

    // === Salida ===

    /// Formato del reporte
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "TOOLHUB_FORMAT")]
    pub format: OutputFormat,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Plazo del lote, si hay uno
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.files.is_empty() {
            return Err(ConfigError::NoFiles);
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración (stderr, stdout es el reporte)
    pub fn print_summary(&self) {
        eprintln!("⚙️  Configuración:");
        eprintln!("   Function:  {}", self.function);
        eprintln!("   Files:     {}", self.files.len());
        eprintln!("   Workers:   {}", self.workers);
        match self.buffer {
            Some(buffer) => eprintln!("   Buffer:    {}", buffer),
            None => eprintln!("   Buffer:    {} (one per file)", self.files.len()),
        }
        match self.timeout() {
            Some(timeout) => eprintln!("   Timeout:   {} ms", timeout.as_millis()),
            None => eprintln!("   Timeout:   disabled"),
        }
        eprintln!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            files: Vec::new(),
            workers: 3,
            buffer: None,
            function: Tool::Hash,
            timeout_ms: 0,
            format: OutputFormat::Text,
        }
    }
}
