//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta y agrega métricas de un lote en tiempo real: cuántos jobs
//! terminaron en cada estado y la latencia de cada transformación.

use crate::jobs::types::JobStatus;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Collector de métricas thread-safe
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

/// Datos internos de métricas
struct MetricsData {
    done: u64,
    errors: u64,
    canceled: u64,

    /// Latencias registradas (en microsegundos)
    latencies: Vec<u64>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData {
                done: 0,
                errors: 0,
                canceled: 0,
                latencies: Vec::new(),
            })),
            start_time: Instant::now(),
        }
    }

    /// Registra el resultado de un job
    ///
    /// Los jobs cancelados no tienen latencia (nunca se ejecutaron).
    pub fn record(&self, status: JobStatus, latency: Option<Duration>) {
        let mut data = self.inner.lock();

        match status {
            JobStatus::Done => data.done += 1,
            JobStatus::Error => data.errors += 1,
            JobStatus::Canceled => data.canceled += 1,
        }

        if let Some(latency) = latency {
            data.latencies.push(latency.as_micros() as u64);
        }
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.inner.lock();
        let (p50, p95, p99, avg) = calculate_percentiles(&data.latencies);

        MetricsSnapshot {
            total: data.done + data.errors + data.canceled,
            done: data.done,
            errors: data.errors,
            canceled: data.canceled,
            wall_time_ms: self.start_time.elapsed().as_millis() as u64,
            latency_p50_us: p50,
            latency_p95_us: p95,
            latency_p99_us: p99,
            latency_avg_us: avg,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Calcula percentiles de latencia: (p50, p95, p99, avg)
fn calculate_percentiles(latencies: &[u64]) -> (u64, u64, u64, u64) {
    if latencies.is_empty() {
        return (0, 0, 0, 0);
    }

    let mut sorted = latencies.to_vec();
    sorted.sort_unstable();

    let len = sorted.len();
    let p50 = sorted[len * 50 / 100];
    let p95 = sorted[len * 95 / 100];
    let p99 = sorted[len * 99 / 100];

    let sum: u64 = sorted.iter().sum();
    let avg = sum / len as u64;

    (p50, p95, p99, avg)
}

/// Snapshot de métricas (para uso externo)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub done: u64,
    pub errors: u64,
    pub canceled: u64,
    pub wall_time_ms: u64,
    pub latency_p50_us: u64,
    pub latency_p95_us: u64,
    pub latency_p99_us: u64,
    pub latency_avg_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector() {
        let collector = MetricsCollector::new();

        collector.record(JobStatus::Done, Some(Duration::from_millis(10)));
        collector.record(JobStatus::Done, Some(Duration::from_millis(20)));
        collector.record(JobStatus::Error, Some(Duration::from_millis(5)));

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.done, 2);
        assert_eq!(snapshot.errors, 1);
        assert_eq!(snapshot.canceled, 0);
    }

    #[test]
    fn test_percentiles() {
        let collector = MetricsCollector::new();

        for i in 1..=100 {
            collector.record(JobStatus::Done, Some(Duration::from_micros(i)));
        }

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.latency_p50_us, 51);
        assert_eq!(snapshot.latency_p95_us, 96);
        assert_eq!(snapshot.latency_p99_us, 100);
        assert_eq!(snapshot.latency_avg_us, 50);
    }

    #[test]
    fn test_canceled_jobs_have_no_latency() {
        let collector = MetricsCollector::new();

        collector.record(JobStatus::Canceled, None);
        collector.record(JobStatus::Done, Some(Duration::from_micros(40)));

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.canceled, 1);
        assert_eq!(snapshot.latency_avg_us, 40);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = MetricsCollector::new().snapshot();
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.latency_p99_us, 0);
    }

    #[test]
    fn test_shared_between_threads() {
        let collector = MetricsCollector::new();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = collector.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        c.record(JobStatus::Done, Some(Duration::from_micros(1)));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(collector.snapshot().done, 100);
    }
}
