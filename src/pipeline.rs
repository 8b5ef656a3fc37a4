//! Report pipeline
//!
//! One full run: load reference data, aggregate the sales files, render and
//! write both reports.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::engine::{AggregationEngine, AggregationStats, EmptySalesPolicy};
use crate::error::{ReportError, ReportResult};
use crate::reference::{Catalog, SalespersonRegistry};
use crate::report::{emit_product_report, emit_salesperson_report};
use crate::source::{DirectorySource, SalesSource};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub salesmen_report_path: PathBuf,
    pub products_report_path: PathBuf,
    pub stats: AggregationStats,
    pub diagnostics: Diagnostics,
}

/// Rendered report text, before anything touches the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReports {
    pub salesmen: String,
    pub products: String,
    pub stats: AggregationStats,
}

impl From<&Config> for EmptySalesPolicy {
    fn from(config: &Config) -> Self {
        if config.allow_empty_sales {
            EmptySalesPolicy::ZeroFill
        } else {
            EmptySalesPolicy::Fail
        }
    }
}

/// Run against the files named by `config`
pub fn generate_reports(config: &Config) -> ReportResult<RunSummary> {
    let source = DirectorySource::new(&config.data_dir, &config.sales_file_prefix);
    generate_reports_from(config, &source)
}

/// Run with reference files from `config` and sales files from `source`.
///
/// Nothing is written unless both reference files load and aggregation
/// succeeds.
pub fn generate_reports_from(config: &Config, source: &dyn SalesSource) -> ReportResult<RunSummary> {
    let mut diagnostics = Diagnostics::new();

    let registry = SalespersonRegistry::load(&config.salesmen_path(), &mut diagnostics)?;
    let catalog = Catalog::load(&config.products_path(), &mut diagnostics)?;

    let reports = render_reports(&registry, &catalog, source, config.into(), &mut diagnostics)?;

    let salesmen_report_path = config.salesmen_report_path();
    let products_report_path = config.products_report_path();
    write_reports(&[
        (salesmen_report_path.as_path(), reports.salesmen.as_str()),
        (products_report_path.as_path(), reports.products.as_str()),
    ])?;

    Ok(RunSummary {
        salesmen_report_path,
        products_report_path,
        stats: reports.stats,
        diagnostics,
    })
}

/// Aggregate `source` and render both reports in memory
pub fn render_reports(
    registry: &SalespersonRegistry,
    catalog: &Catalog,
    source: &dyn SalesSource,
    policy: EmptySalesPolicy,
    diagnostics: &mut Diagnostics,
) -> ReportResult<RenderedReports> {
    let totals = AggregationEngine::new(registry, catalog).run(source, policy, diagnostics)?;

    Ok(RenderedReports {
        salesmen: emit_salesperson_report(&totals.salespeople, registry),
        products: emit_product_report(&totals.products, catalog),
        stats: totals.stats,
    })
}

/// Write every report or none.
///
/// Each report is staged as `<target>.tmp` first; targets are only replaced
/// once all of them are staged.
fn write_reports(reports: &[(&Path, &str)]) -> ReportResult<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(reports.len());

    for &(path, contents) in reports {
        let staging = staging_path(path);
        if let Err(source) = fs::write(&staging, contents) {
            discard(staged.iter().map(|(staging, _)| staging.as_path()).chain([staging.as_path()]));
            return Err(write_error(path, source));
        }
        staged.push((staging, path));
    }

    for (index, (staging, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(staging, path) {
            discard(staged[index..].iter().map(|(staging, _)| staging.as_path()));
            return Err(write_error(path, source));
        }
        tracing::info!(path = %path.display(), "Report written");
    }

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard<'p>(paths: impl Iterator<Item = &'p Path>) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            tracing::debug!(path = %path.display(), error = %e, "Could not remove staged report");
        }
    }
}

fn write_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::WriteReport {
        path: path.to_path_buf(),
        source,
    }
}
