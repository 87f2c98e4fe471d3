//! # Errores del Pool
//! src/error.rs

use thiserror::Error;

/// Error opaco que devuelve una transformación del usuario
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errores de contrato del pool (nunca de un job individual)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("worker count must be >= 1")]
    NoWorkers,

    #[error("pool already started")]
    AlreadyStarted,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(String),

    /// Submit después de que empezó el shutdown
    #[error("pool is closed, no more jobs accepted")]
    Closed,

    /// Todos los workers salieron (cancelación) y nadie recibirá el job
    #[error("all workers exited, job {0} was not accepted")]
    Disconnected(u64),
}

/// Falla de un job, registrada en su `JobResult`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformFailure {
    #[error("{0}")]
    Error(String),

    #[error("transform panicked: {0}")]
    Panicked(String),
}

impl TransformFailure {
    pub(crate) fn from_error(err: BoxError) -> Self {
        TransformFailure::Error(err.to_string())
    }

    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        TransformFailure::Panicked(message)
    }
}
