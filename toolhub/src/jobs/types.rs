//! # Tipos del Sistema de Jobs
//! src/jobs/types.rs
//!
//! Entradas y salidas de un lote: qué archivos se procesan y qué pasó con
//! cada uno.

use crate::commands::Tool;
use crate::metrics::MetricsSnapshot;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Estado final de un job del lote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job completado exitosamente
    Done,

    /// La transformación falló
    Error,

    /// Enviado pero sin resultado (cancelación o timeout)
    Canceled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Done => "done",
            JobStatus::Error => "error",
            JobStatus::Canceled => "canceled",
        }
    }
}

/// Un archivo (o cualquier blob con nombre) a procesar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInput {
    pub name: String,
    pub content: Vec<u8>,
}

impl BatchInput {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Lee un archivo completo; el nombre es el último componente del path
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let content = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { name, content })
    }
}

/// Resultado de un archivo, correlacionado por `job_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub job_id: u64,
    pub name: String,
    pub status: JobStatus,
    /// Salida como texto (lossy si no es UTF-8); vacía si hubo error
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

/// Reporte completo de un lote
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub tool: Tool,
    pub worker_count: usize,
    /// Ordenado por `job_id`
    pub outcomes: Vec<FileOutcome>,
    pub summary: MetricsSnapshot,
}

impl BatchReport {
    pub fn outcome(&self, job_id: u64) -> Option<&FileOutcome> {
        self.outcomes.iter().find(|o| o.job_id == job_id)
    }

    pub fn count(&self, status: JobStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn is_complete(&self) -> bool {
        self.count(JobStatus::Canceled) == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Reporte legible para la terminal
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "Function: {} | Workers: {} | Files: {}\n",
            self.tool,
            self.worker_count,
            self.outcomes.len()
        ));

        for outcome in &self.outcomes {
            out.push_str(&format!(
                "\n[{}] {} ({})\n",
                outcome.job_id,
                outcome.name,
                outcome.status.as_str()
            ));
            match &outcome.error {
                Some(error) => out.push_str(&format!("  error: {}\n", error)),
                None if outcome.status == JobStatus::Done => {
                    out.push_str(&outcome.output);
                    if !outcome.output.ends_with('\n') {
                        out.push('\n');
                    }
                }
                None => {}
            }
        }

        out.push_str(&format!(
            "\nDone: {}  Errors: {}  Canceled: {}  ({} ms, p50 {} us, p99 {} us)\n",
            self.summary.done,
            self.summary.errors,
            self.summary.canceled,
            self.summary.wall_time_ms,
            self.summary.latency_p50_us,
            self.summary.latency_p99_us
        ));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsCollector;
    use std::io::Write;

    fn sample_report() -> BatchReport {
        BatchReport {
            tool: Tool::Uppercase,
            worker_count: 2,
            outcomes: vec![
                FileOutcome {
                    job_id: 0,
                    name: "a.txt".to_string(),
                    status: JobStatus::Done,
                    output: "HELLO".to_string(),
                    error: None,
                    elapsed_us: Some(12),
                },
                FileOutcome {
                    job_id: 1,
                    name: "b.txt".to_string(),
                    status: JobStatus::Canceled,
                    output: String::new(),
                    error: None,
                    elapsed_us: None,
                },
            ],
            summary: MetricsCollector::new().snapshot(),
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&JobStatus::Canceled).unwrap(), "\"canceled\"");
        assert_eq!(JobStatus::Done.as_str(), "done");
    }

    #[test]
    fn test_from_path_uses_file_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"contents").unwrap();

        let input = BatchInput::from_path(file.path()).unwrap();
        assert_eq!(input.content, b"contents");
        assert_eq!(
            input.name,
            file.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(BatchInput::from_path(Path::new("/definitely/not/here.txt")).is_err());
    }

    #[test]
    fn test_report_counts() {
        let report = sample_report();
        assert_eq!(report.count(JobStatus::Done), 1);
        assert_eq!(report.count(JobStatus::Canceled), 1);
        assert!(!report.is_complete());
        assert_eq!(report.outcome(1).unwrap().name, "b.txt");
    }

    #[test]
    fn test_report_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_report().to_json().unwrap()).unwrap();

        assert_eq!(json["tool"], "uppercase");
        assert_eq!(json["outcomes"][0]["status"], "done");
        assert_eq!(json["outcomes"][0]["elapsed_us"], 12);
        assert!(json["outcomes"][1].get("error").is_none());
        assert!(json["summary"]["total"].is_number());
    }

    #[test]
    fn test_report_text() {
        let text = sample_report().to_text();
        assert!(text.contains("Function: uppercase"));
        assert!(text.contains("[0] a.txt (done)"));
        assert!(text.contains("HELLO"));
        assert!(text.contains("[1] b.txt (canceled)"));
    }
}
