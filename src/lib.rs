//! salesReport Library
//!
//! Joins the salespeople file, the product catalog and per-salesperson
//! sales files into two ranked reports. Re-exports modules for the binaries
//! and for integration testing.

pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod fixtures;
pub mod parser;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod source;

mod error;

pub use config::Config;
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use domain::{DocumentType, Price, Revenue, SalespersonKey};
pub use engine::{AggregationEngine, EmptySalesPolicy, SalesTotals};
pub use error::{ReferenceKind, ReportError, ReportResult};
pub use pipeline::{generate_reports, RunSummary};
