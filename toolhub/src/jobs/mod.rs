//! # Sistema de Jobs
//!
//! Ejecuta un lote de archivos sobre el pool de workers y arma el reporte.
//!
//! ## Flujo
//!
//! 1. `load_inputs` lee los archivos (los ilegibles se omiten)
//! 2. `JobManager::run` envía un job por archivo y drena los resultados
//! 3. `BatchReport` correlaciona cada resultado con su archivo por `job_id`

pub mod manager;
pub mod types;

pub use manager::{load_inputs, JobManager, JobManagerConfig};
pub use types::{BatchInput, BatchReport, FileOutcome, JobStatus};
