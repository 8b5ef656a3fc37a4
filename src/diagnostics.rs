//! Run diagnostics
//!
//! Non-fatal problems met while reading input. Each one is logged at WARN
//! when recorded and kept so the caller can inspect what was skipped.

use std::fmt;

use crate::domain::{MoneyError, RecordError, SalespersonKey};

/// What went wrong with a line or a file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarningKind {
    #[error("malformed record: {0}")]
    Malformed(RecordError),

    #[error("sales file has no header line")]
    MissingHeader,

    #[error("salesperson {0} is not registered")]
    UnknownSalesperson(SalespersonKey),

    #[error("product {0} is not in the catalog")]
    UnknownProduct(u32),

    #[error("salesperson {0} listed more than once, keeping the last entry")]
    DuplicateSalesperson(SalespersonKey),

    #[error("product {0} listed more than once, keeping the last entry")]
    DuplicateProduct(u32),

    #[error("line total overflows: {0}")]
    Overflow(MoneyError),

    #[error("cannot read input: {0}")]
    Unreadable(String),
}

/// A skipped line or file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// File (or in-memory batch) name
    pub source: String,
    /// 1-based line number, `None` when the whole file is affected
    pub line: Option<usize>,
    pub kind: WarningKind,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.source, line, self.kind),
            None => write!(f, "{}: {}", self.source, self.kind),
        }
    }
}

/// Accumulated warnings of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem on one line
    pub fn line(&mut self, source: &str, line: usize, kind: WarningKind) {
        self.push(Warning {
            source: source.to_string(),
            line: Some(line),
            kind,
        });
    }

    /// Record a problem affecting a whole file
    pub fn file(&mut self, source: &str, kind: WarningKind) {
        self.push(Warning {
            source: source.to_string(),
            line: None,
            kind,
        });
    }

    fn push(&mut self, warning: Warning) {
        tracing::warn!(
            source = %warning.source,
            line = warning.line,
            "{}",
            warning.kind
        );
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
