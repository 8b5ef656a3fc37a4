//! Error handling module
//!
//! Run-level errors. Anything here stops the run before a report is written;
//! per-line problems are [`crate::diagnostics::Warning`]s instead.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Application-wide Result type
pub type ReportResult<T> = Result<T, ReportError>;

/// Which reference file a fatal error is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Salesmen,
    Products,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Salesmen => f.write_str("salesmen"),
            Self::Products => f.write_str("products"),
        }
    }
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Required reference file missing or unreadable
    #[error("cannot read {kind} file {}: {source}", .path.display())]
    MissingReferenceFile {
        kind: ReferenceKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Discovery found nothing to aggregate
    #[error("no sales files found in {location}")]
    NoSalesFiles { location: String },

    /// The sales directory itself could not be listed
    #[error("cannot list sales directory {}: {source}", .dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report {}: {source}", .path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    pub fn missing_reference(kind: ReferenceKind, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::MissingReferenceFile {
            kind,
            path: path.into(),
            source,
        }
    }

    /// Check if a required reference file could not be loaded
    pub fn is_fatal_input(&self) -> bool {
        matches!(self, Self::MissingReferenceFile { .. })
    }

    /// Check if the run stopped because there was nothing to aggregate
    pub fn is_configuration_empty(&self) -> bool {
        matches!(self, Self::NoSalesFiles { .. })
    }
}
