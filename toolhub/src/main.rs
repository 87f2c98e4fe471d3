//! # Toolhub - Entry Point
//! src/main.rs
//!
//! Lee la configuración, carga los archivos, corre el lote y escribe el
//! reporte en stdout. Los logs van a stderr.

use anyhow::{bail, Context};
use toolhub::config::{Config, OutputFormat};
use toolhub::jobs::{load_inputs, JobManager, JobManagerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use workerpool::CancelToken;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolhub=info,workerpool=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::new();
    config.validate().context("invalid configuration")?;
    config.print_summary();

    let inputs = load_inputs(&config.files);
    if inputs.is_empty() {
        bail!("none of the {} input files could be read", config.files.len());
    }

    let manager = JobManager::new(JobManagerConfig::from_config(&config));
    let report = manager
        .run(inputs, config.function, &CancelToken::new())
        .context("failed to run batch")?;

    match config.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json().context("failed to encode report")?),
    }

    Ok(())
}
