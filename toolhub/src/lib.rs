//! # Toolhub
//! src/lib.rs
//!
//! Procesador de archivos por lotes sobre un pool de workers acotado
//! (`workerpool`). Cada archivo se transforma en paralelo y el lote termina
//! con un reporte por archivo más métricas de latencia.
//!
//! ## Arquitectura
//!
//! - `commands`: transformaciones puras (hash, base64, json, texto)
//! - `jobs`: orquestación del lote y correlación de resultados
//! - `metrics`: contadores por estado y percentiles de latencia
//! - `config`: argumentos CLI y variables de entorno
//! - `error`: errores de herramientas y de configuración
//!
//! ## Ejemplo de uso
//!
//! ```
//! use toolhub::commands::Tool;
//! use toolhub::jobs::{BatchInput, JobManager, JobManagerConfig};
//! use workerpool::CancelToken;
//!
//! let manager = JobManager::new(JobManagerConfig::default());
//! let inputs = vec![BatchInput::new("a.txt", "Hola Mundo")];
//! let report = manager.run(inputs, Tool::Slugify, &CancelToken::new()).unwrap();
//! assert_eq!(report.outcomes[0].output, "hola-mundo");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod jobs;
pub mod metrics;
