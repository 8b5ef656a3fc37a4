//! Salesperson Registry
//!
//! (document type, document number) -> identity, built from the salesmen file.
//! Used to check who owns a sales file and to render report rows.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::domain::{SalespersonKey, SalespersonRecord};
use crate::error::{ReferenceKind, ReportError, ReportResult};

use super::{read_records, LookupError, OrderedTable};

/// Registered salespeople for one run
#[derive(Debug, Clone, Default)]
pub struct SalespersonRegistry {
    salespeople: OrderedTable<SalespersonKey, SalespersonRecord>,
}

impl SalespersonRegistry {
    /// Load the registry from `path`.
    ///
    /// # Errors
    /// `ReportError::MissingReferenceFile` if the file cannot be opened or read.
    pub fn load(path: &Path, diagnostics: &mut Diagnostics) -> ReportResult<Self> {
        let source = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| ReportError::missing_reference(ReferenceKind::Salesmen, path, e))?;

        let registry = Self::from_reader(BufReader::new(file), &source, diagnostics)
            .map_err(|e| ReportError::missing_reference(ReferenceKind::Salesmen, path, e))?;

        tracing::info!(path = %source, salespeople = registry.len(), "Loaded salesperson registry");
        Ok(registry)
    }

    pub fn from_reader<R: BufRead>(
        reader: R,
        source: &str,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<Self> {
        let mut registry = Self::default();
        for (line, record) in read_records::<_, SalespersonRecord>(reader, source, diagnostics)? {
            let key = record.key;
            if registry.salespeople.insert(key, record) {
                diagnostics.line(source, line, WarningKind::DuplicateSalesperson(key));
            }
        }
        Ok(registry)
    }

    pub fn from_records(records: impl IntoIterator<Item = SalespersonRecord>) -> Self {
        let mut registry = Self::default();
        for record in records {
            registry.salespeople.insert(record.key, record);
        }
        registry
    }

    pub fn contains(&self, key: &SalespersonKey) -> bool {
        self.salespeople.contains_key(key)
    }

    pub fn get(&self, key: &SalespersonKey) -> Option<&SalespersonRecord> {
        self.salespeople.get(key)
    }

    /// "firstName lastName" of a registered salesperson
    pub fn full_name(&self, key: &SalespersonKey) -> Result<String, LookupError> {
        self.get(key)
            .map(SalespersonRecord::full_name)
            .ok_or(LookupError::SalespersonNotFound(*key))
    }

    /// Salespeople in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = &SalespersonRecord> {
        self.salespeople.iter()
    }

    pub fn len(&self) -> usize {
        self.salespeople.len()
    }

    pub fn is_empty(&self) -> bool {
        self.salespeople.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentType;
    use std::io::Cursor;

    fn registry_from(text: &str) -> (SalespersonRegistry, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let registry =
            SalespersonRegistry::from_reader(Cursor::new(text.to_string()), "salesmen_info.txt", &mut diagnostics)
                .unwrap();
        (registry, diagnostics)
    }

    #[test]
    fn test_contains_and_full_name() {
        let (registry, diagnostics) = registry_from("CC;1000;Juan;Gomez\nTI;1001;Ana;Perez\n");
        let key = SalespersonKey::new(DocumentType::MinorId, 1001);

        assert!(diagnostics.is_empty());
        assert!(registry.contains(&key));
        assert_eq!(registry.full_name(&key).unwrap(), "Ana Perez");
    }

    #[test]
    fn test_same_number_different_type_are_distinct() {
        let (registry, diagnostics) = registry_from("CC;1000;Juan;Gomez\nTI;1000;Ana;Perez\n");

        assert_eq!(registry.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_key() {
        let (registry, _) = registry_from("CC;1000;Juan;Gomez\n");
        let key = SalespersonKey::new(DocumentType::MinorId, 9999);

        assert!(!registry.contains(&key));
        assert_eq!(
            registry.full_name(&key),
            Err(LookupError::SalespersonNotFound(key))
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let (registry, diagnostics) = registry_from("CC;1000;Juan;Gomez\nCC;1000;Luis;Lopez\n");
        let key = SalespersonKey::new(DocumentType::NationalId, 1000);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.full_name(&key).unwrap(), "Luis Lopez");
        assert_eq!(
            diagnostics.warnings()[0].kind,
            WarningKind::DuplicateSalesperson(key)
        );
    }

    #[test]
    fn test_short_line_skipped() {
        let (registry, diagnostics) = registry_from("CC;1000;Juan\nCC;1001;Maria;Lopez\n");

        assert_eq!(registry.len(), 1);
        assert_eq!(diagnostics.len(), 1);
    }
}
