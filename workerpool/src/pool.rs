//! # Pool de Workers
//! src/pool.rs
//!
//! Pool con un número fijo de workers que comparten una cola de entrada
//! acotada y una cola de salida acotada.
//!
//! ## Ciclo de vida
//!
//! ```text
//! new() → start() → submit()* → shutdown()
//! ```
//!
//! - `start` lanza exactamente `worker_count` threads y devuelve el stream
//!   de resultados, que quien llama debe drenar (si no, los workers se
//!   bloquean con la cola de salida llena).
//! - `shutdown` cierra la cola de entrada, espera a que salgan todos los
//!   workers y recién entonces cierra el stream de resultados.
//!
//! El backpressure se propaga consumidor → workers → cola de entrada →
//! submitter. No hay orden global entre workers; la correlación es solo por
//! `job_id`.

use crate::cancel::CancelToken;
use crate::error::{PoolError, TransformFailure};
use crate::job::{Job, JobResult};
use crossbeam_channel::{bounded, select, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub struct Pool {
    worker_count: usize,
    buffer_capacity: usize,

    /// `None` una vez iniciado el shutdown
    jobs_tx: Mutex<Option<Sender<Job>>>,
    /// Se entrega a los workers en `start`
    jobs_rx: Option<Receiver<Job>>,

    /// El pool conserva su propio sender para que el stream siga abierto
    /// hasta que `shutdown` termine de unir los workers
    results_tx: Mutex<Option<Sender<JobResult>>>,
    results_rx: Option<Receiver<JobResult>>,

    handles: Mutex<Vec<JoinHandle<()>>>,
    running: Arc<AtomicUsize>,
}

impl Pool {
    /// Crea un pool sin iniciar
    ///
    /// `buffer_capacity` acota ambas colas; con 0 son canales de rendezvous.
    pub fn new(worker_count: usize, buffer_capacity: usize) -> Result<Self, PoolError> {
        if worker_count == 0 {
            return Err(PoolError::NoWorkers);
        }

        let (jobs_tx, jobs_rx) = bounded(buffer_capacity);
        let (results_tx, results_rx) = bounded(buffer_capacity);

        Ok(Self {
            worker_count,
            buffer_capacity,
            jobs_tx: Mutex::new(Some(jobs_tx)),
            jobs_rx: Some(jobs_rx),
            results_tx: Mutex::new(Some(results_tx)),
            results_rx: Some(results_rx),
            handles: Mutex::new(Vec::with_capacity(worker_count)),
            running: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Workers cuyo loop sigue vivo
    pub fn running_workers(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Lanza los workers y devuelve el stream de resultados
    pub fn start(&mut self, cancel: &CancelToken) -> Result<ResultStream, PoolError> {
        if self.jobs_rx.is_none() {
            return Err(PoolError::AlreadyStarted);
        }
        let Some(results_tx) = self.results_tx.lock().clone() else {
            return Err(PoolError::Closed);
        };
        let (Some(jobs_rx), Some(results_rx)) = (self.jobs_rx.take(), self.results_rx.take())
        else {
            return Err(PoolError::AlreadyStarted);
        };

        let mut handles = self.handles.lock();
        for id in 0..self.worker_count {
            let worker = Worker {
                name: format!("pool-worker-{}", id),
                jobs: jobs_rx.clone(),
                results: results_tx.clone(),
                cancel: cancel.clone(),
                running: Arc::clone(&self.running),
            };

            self.running.fetch_add(1, Ordering::SeqCst);
            let spawned = thread::Builder::new()
                .name(worker.name.clone())
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    self.running.fetch_sub(1, Ordering::SeqCst);
                    return Err(PoolError::Spawn(e.to_string()));
                }
            }
        }

        tracing::info!(
            workers = self.worker_count,
            buffer = self.buffer_capacity,
            "🚀 pool started"
        );

        Ok(ResultStream { rx: results_rx })
    }

    /// Encola un job, bloqueando mientras la cola de entrada esté llena
    ///
    /// Antes de `start` los jobs quedan en el buffer; con capacidad 0 esto
    /// bloquea hasta que un worker los tome.
    pub fn submit(&self, job: Job) -> Result<(), PoolError> {
        // Clonar el sender y soltar el lock antes de bloquear en send
        let tx = self.jobs_tx.lock().clone().ok_or(PoolError::Closed)?;
        let id = job.id;

        tx.send(job).map_err(|_| {
            tracing::warn!(job_id = id, "job rejected, no workers left");
            PoolError::Disconnected(id)
        })
    }

    /// Cierra la entrada, une todos los workers y cierra el stream
    ///
    /// Es idempotente; llamadas concurrentes esperan a la primera.
    pub fn shutdown(&self) {
        if self.jobs_tx.lock().take().is_some() {
            tracing::debug!("input queue closed");
        }

        // El lock de handles se mantiene hasta cerrar el stream
        let mut handles = self.handles.lock();
        for handle in handles.drain(..) {
            let name = handle.thread().name().unwrap_or("pool-worker").to_string();
            if let Err(e) = handle.join() {
                tracing::error!(worker = %name, "worker thread panicked: {:?}", e);
            }
        }

        if self.results_tx.lock().take().is_some() {
            tracing::info!("🛑 pool shut down");
        }
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("worker_count", &self.worker_count)
            .field("buffer_capacity", &self.buffer_capacity)
            .field("running", &self.running_workers())
            .finish()
    }
}

/// Handle de solo lectura sobre la cola de salida
///
/// Se cierra cuando `Pool::shutdown` termina; iterarlo drena hasta el cierre.
#[derive(Debug)]
pub struct ResultStream {
    rx: Receiver<JobResult>,
}

impl ResultStream {
    /// Bloquea hasta el próximo resultado; `None` cuando el stream se cerró
    pub fn recv(&self) -> Option<JobResult> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<JobResult, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn recv_deadline(&self, deadline: Instant) -> Result<JobResult, RecvTimeoutError> {
        self.rx.recv_deadline(deadline)
    }
}

impl Iterator for ResultStream {
    type Item = JobResult;

    fn next(&mut self) -> Option<JobResult> {
        self.recv()
    }
}

struct Worker {
    name: String,
    jobs: Receiver<Job>,
    results: Sender<JobResult>,
    cancel: CancelToken,
    running: Arc<AtomicUsize>,
}

/// Decrementa el contador de workers también si el thread hace panic
struct RunningGuard(Arc<AtomicUsize>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Worker {
    fn run(self) {
        let _guard = RunningGuard(Arc::clone(&self.running));
        tracing::debug!(worker = %self.name, "🔧 worker started");

        loop {
            if self.cancel.is_cancelled() {
                tracing::debug!(worker = %self.name, "worker canceled");
                return;
            }

            let job = select! {
                recv(self.jobs) -> msg => match msg {
                    Ok(job) => job,
                    Err(_) => {
                        tracing::debug!(worker = %self.name, "input closed, worker exiting");
                        return;
                    }
                },
                recv(self.cancel.signal()) -> _ => {
                    tracing::debug!(worker = %self.name, "worker canceled while idle");
                    return;
                }
            };

            tracing::trace!(worker = %self.name, job_id = job.id, "🔨 picked up job");
            let result = execute(job);

            if self.results.send(result).is_err() {
                tracing::warn!(worker = %self.name, "result stream dropped, worker exiting");
                return;
            }
        }
    }
}

/// Ejecuta la transformación de un job y arma su resultado
///
/// Un panic dentro de la transformación se reporta como falla del job.
fn execute(job: Job) -> JobResult {
    let Job {
        id,
        payload,
        transform,
    } = job;

    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| transform(payload.as_slice())));
    let elapsed = start.elapsed();

    match outcome {
        Ok(Ok(output)) => JobResult::success(id, output, elapsed),
        Ok(Err(err)) => {
            tracing::debug!(job_id = id, error = %err, "❌ transform failed");
            JobResult::failed(id, TransformFailure::from_error(err), elapsed)
        }
        Err(payload) => {
            let failure = TransformFailure::from_panic(payload);
            tracing::warn!(job_id = id, error = %failure, "transform panicked");
            JobResult::failed(id, failure, elapsed)
        }
    }
}
