//! # Jobs y Resultados
//! src/job.rs
//!
//! Un `Job` es la unidad de trabajo que se envía al pool: un id asignado
//! por quien llama, el payload y la transformación a aplicar.
//! Un `JobResult` es el resultado de procesar exactamente un job.

use crate::error::{BoxError, TransformFailure};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Transformación de bytes a bytes compartida entre jobs
pub type Transform = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>, BoxError> + Send + Sync>;

/// Construye un `Transform` a partir de una closure
pub fn transform<F>(f: F) -> Transform
where
    F: Fn(&[u8]) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub struct Job {
    /// Id para correlacionar el resultado (el pool no verifica unicidad)
    pub id: u64,
    pub payload: Vec<u8>,
    pub transform: Transform,
}

impl Job {
    pub fn new(id: u64, payload: impl Into<Vec<u8>>, transform: Transform) -> Self {
        Job {
            id,
            payload: payload.into(),
            transform,
        }
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("payload_len", &self.payload.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    pub job_id: u64,
    /// Vacío cuando `failure` es `Some`
    pub output: Vec<u8>,
    pub failure: Option<TransformFailure>,
    /// Tiempo dentro de la transformación
    pub elapsed: Duration,
}

impl JobResult {
    pub(crate) fn success(job_id: u64, output: Vec<u8>, elapsed: Duration) -> Self {
        JobResult {
            job_id,
            output,
            failure: None,
            elapsed,
        }
    }

    pub(crate) fn failed(job_id: u64, failure: TransformFailure, elapsed: Duration) -> Self {
        JobResult {
            job_id,
            output: Vec::new(),
            failure: Some(failure),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}
