//! salesReport - sales ranking reports
//!
//! Reads `salesmen_info.txt`, `products_info.txt` and every `ventas_*` file
//! from the data directory and writes `salesmen_report.csv` and
//! `products_report.csv`.

use sales_report::{generate_reports, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging on stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;

    tracing::info!(dir = %config.data_dir.display(), "Generating reports");

    let summary = match generate_reports(&config) {
        Ok(summary) => summary,
        Err(e) => {
            if e.is_fatal_input() {
                tracing::error!("Required reference data missing, no reports written: {}", e);
            } else {
                tracing::error!("Report generation failed: {}", e);
            }
            return Err(e.into());
        }
    };

    if !summary.diagnostics.is_empty() {
        tracing::warn!(
            warnings = summary.diagnostics.len(),
            "Some input was skipped, see warnings above"
        );
    }

    tracing::info!(
        files_processed = summary.stats.files_processed,
        files_skipped = summary.stats.files_skipped,
        "Reports generated successfully"
    );
    tracing::info!("1. {} - salespeople by revenue", summary.salesmen_report_path.display());
    tracing::info!("2. {} - products by units sold", summary.products_report_path.display());

    Ok(())
}
