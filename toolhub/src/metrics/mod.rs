//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Este módulo implementa la recolección y agregación de métricas del lote:
//! - Contadores por estado (done, error, canceled)
//! - Latencias de transformación (p50, p95, p99)

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
