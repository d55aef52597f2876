mod bootstrap;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use triage_core::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::parse();

    let log_level = if settings.debug {
        "DEBUG"
    } else {
        settings.log_level.as_str()
    };
    bootstrap::setup_logging(log_level)?;
    bootstrap::ensure_output_dir(&settings.output_dir)?;

    tracing::info!("cowrie-triage v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Log dir: {}, baseline: {} commands, threshold: {}, linkage: {}",
        settings.log_dir.display(),
        settings.baseline.len(),
        settings.threshold,
        settings.linkage
    );

    let summary = pipeline::run(&settings)?;

    tracing::info!(
        "Done: {} records, {} pairs, {} sessions, {} anomalies{}",
        summary.records,
        summary.pairs,
        summary.sessions,
        summary.anomalies,
        if summary.dendrogram_rendered {
            ", dendrogram rendered"
        } else {
            ""
        }
    );

    Ok(())
}
