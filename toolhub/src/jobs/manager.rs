//! # Gestor Central de Jobs
//! src/jobs/manager.rs
//!
//! Coordina un lote: crea el pool, envía un job por archivo, drena los
//! resultados desde un único consumidor y los correlaciona con cada archivo
//! por `job_id`. Los archivos sin resultado (cancelación, timeout) se
//! reportan como `canceled`.

use crate::commands::Tool;
use crate::jobs::types::{BatchInput, BatchReport, FileOutcome, JobStatus};
use crate::metrics::MetricsCollector;
use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use workerpool::{CancelToken, Job, JobResult, Pool, PoolError, RecvTimeoutError, ResultStream};

/// Configuración del Job Manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobManagerConfig {
    /// Número de workers del pool
    pub workers: usize,

    /// Capacidad de las colas; `None` = un lugar por archivo
    pub buffer: Option<usize>,

    /// Plazo para todo el lote; al vencer se cancela el pool
    pub timeout: Option<Duration>,
}

impl Default for JobManagerConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            buffer: None,
            timeout: None,
        }
    }
}

impl JobManagerConfig {
    /// Crea una configuración desde el Config principal
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            workers: config.workers,
            buffer: config.buffer,
            timeout: config.timeout(),
        }
    }
}

/// Gestor de lotes sobre un `workerpool::Pool`
#[derive(Debug, Clone)]
pub struct JobManager {
    config: JobManagerConfig,
}

impl JobManager {
    pub fn new(config: JobManagerConfig) -> Self {
        Self { config }
    }

    /// Procesa todos los inputs con `tool` y arma el reporte
    ///
    /// Cada lote usa un pool nuevo. `cancel` permite abortar desde afuera.
    /// El timeout configurado cancela un token hijo propio del lote, así que
    /// el token de quien llama nunca queda cancelado por un timeout.
    pub fn run(
        &self,
        inputs: Vec<BatchInput>,
        tool: Tool,
        cancel: &CancelToken,
    ) -> Result<BatchReport, PoolError> {
        let metrics = MetricsCollector::new();
        let buffer = self.config.buffer.unwrap_or(inputs.len());
        let deadline = self.config.timeout.map(|t| Instant::now() + t);

        let batch_cancel = cancel.child();

        let mut pool = Pool::new(self.config.workers, buffer)?;
        let stream = pool.start(&batch_cancel)?;

        tracing::info!(
            files = inputs.len(),
            workers = pool.worker_count(),
            buffer = pool.buffer_capacity(),
            tool = %tool,
            "📦 batch started"
        );

        let names: Vec<String> = inputs.iter().map(|i| i.name.clone()).collect();
        let work = tool.transform();

        let mut results = thread::scope(|s| {
            let consumer = s.spawn(|| collect_results(stream, deadline, &batch_cancel));

            for (id, input) in inputs.into_iter().enumerate() {
                let job = Job::new(id as u64, input.content, work.clone());
                if let Err(e) = pool.submit(job) {
                    // Solo ocurre si todos los workers ya salieron por cancelación
                    tracing::warn!(file = %input.name, error = %e, "stopped submitting");
                    break;
                }
            }

            pool.shutdown();
            consumer
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        });

        let outcomes: Vec<FileOutcome> = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| {
                let outcome = to_outcome(id as u64, name, results.remove(&(id as u64)));
                metrics.record(
                    outcome.status,
                    outcome.elapsed_us.map(Duration::from_micros),
                );
                outcome
            })
            .collect();

        let summary = metrics.snapshot();
        tracing::info!(
            done = summary.done,
            errors = summary.errors,
            canceled = summary.canceled,
            wall_time_ms = summary.wall_time_ms,
            "✅ batch finished"
        );

        Ok(BatchReport {
            tool,
            worker_count: pool.worker_count(),
            outcomes,
            summary,
        })
    }
}

/// Único consumidor del stream: drena hasta que el pool lo cierre
///
/// Si vence `deadline`, cancela el token y sigue drenando lo que los
/// workers alcancen a emitir.
fn collect_results(
    stream: ResultStream,
    deadline: Option<Instant>,
    cancel: &CancelToken,
) -> HashMap<u64, JobResult> {
    let mut results = HashMap::new();

    loop {
        // Con resultados siempre listos `recv_deadline` nunca llega al
        // Timeout, por eso el plazo se revisa antes de cada recepción
        if let Some(deadline) = deadline {
            if !cancel.is_cancelled() && Instant::now() >= deadline {
                tracing::warn!("⏱️  batch deadline reached, canceling pool");
                cancel.cancel();
            }
        }

        let next = match deadline {
            Some(deadline) if !cancel.is_cancelled() => match stream.recv_deadline(deadline) {
                Ok(result) => Some(result),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => None,
            },
            _ => stream.recv(),
        };

        let Some(result) = next else {
            break;
        };
        if let Some(failure) = &result.failure {
            tracing::debug!(job_id = result.job_id, error = %failure, "job failed");
        }
        results.insert(result.job_id, result);
    }

    results
}

fn to_outcome(job_id: u64, name: String, result: Option<JobResult>) -> FileOutcome {
    match result {
        Some(result) => {
            let elapsed_us = Some(result.elapsed.as_micros() as u64);
            match result.failure {
                None => FileOutcome {
                    job_id,
                    name,
                    status: JobStatus::Done,
                    output: String::from_utf8_lossy(&result.output).into_owned(),
                    error: None,
                    elapsed_us,
                },
                Some(failure) => FileOutcome {
                    job_id,
                    name,
                    status: JobStatus::Error,
                    output: String::new(),
                    error: Some(failure.to_string()),
                    elapsed_us,
                },
            }
        }
        None => FileOutcome {
            job_id,
            name,
            status: JobStatus::Canceled,
            output: String::new(),
            error: None,
            elapsed_us: None,
        },
    }
}

/// Lee los archivos del lote; los que no se pueden leer se registran y se
/// omiten
pub fn load_inputs(paths: &[PathBuf]) -> Vec<BatchInput> {
    paths
        .iter()
        .filter_map(|path| match BatchInput::from_path(path) {
            Ok(input) => Some(input),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read file");
                None
            }
        })
        .collect()
}
