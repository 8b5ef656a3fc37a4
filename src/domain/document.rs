//! Document identity
//!
//! Salespeople are identified by the pair (document type, document number).

use std::fmt;
use std::str::FromStr;

use super::RecordError;

/// Kind of identity document a salesperson is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentType {
    /// Cédula de ciudadanía ("CC")
    NationalId,
    /// Tarjeta de identidad ("TI")
    MinorId,
}

impl DocumentType {
    /// Short code used in every file format
    pub fn code(&self) -> &'static str {
        match self {
            Self::NationalId => "CC",
            Self::MinorId => "TI",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocumentType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CC" => Ok(Self::NationalId),
            "TI" => Ok(Self::MinorId),
            other => Err(RecordError::UnknownDocumentType(other.to_string())),
        }
    }
}

/// Registry key: (document type, document number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SalespersonKey {
    pub document_type: DocumentType,
    pub document_number: u64,
}

impl SalespersonKey {
    pub fn new(document_type: DocumentType, document_number: u64) -> Self {
        Self {
            document_type,
            document_number,
        }
    }

    /// Parse the two leading fields of a record into a key
    pub(crate) fn from_fields(document_type: &str, document_number: &str) -> Result<Self, RecordError> {
        let document_type = document_type.parse()?;
        let document_number = document_number
            .parse()
            .map_err(|_| RecordError::invalid_number("document_number", document_number))?;
        Ok(Self::new(document_type, document_number))
    }
}

impl fmt::Display for SalespersonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.document_type, self.document_number)
    }
}
