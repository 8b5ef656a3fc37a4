//! Catalog Index
//!
//! Product id -> (name, unit price), built from the products file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::domain::{Price, ProductRecord};
use crate::error::{ReferenceKind, ReportError, ReportResult};

use super::{read_records, LookupError, OrderedTable};

/// Product catalog for one run
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: OrderedTable<u32, ProductRecord>,
}

impl Catalog {
    /// Load the catalog from `path`.
    ///
    /// # Errors
    /// `ReportError::MissingReferenceFile` if the file cannot be opened or read.
    pub fn load(path: &Path, diagnostics: &mut Diagnostics) -> ReportResult<Self> {
        let source = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| ReportError::missing_reference(ReferenceKind::Products, path, e))?;

        let catalog = Self::from_reader(BufReader::new(file), &source, diagnostics)
            .map_err(|e| ReportError::missing_reference(ReferenceKind::Products, path, e))?;

        tracing::info!(path = %source, products = catalog.len(), "Loaded product catalog");
        Ok(catalog)
    }

    /// Build from any line source; `source` names it in warnings
    pub fn from_reader<R: BufRead>(
        reader: R,
        source: &str,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<Self> {
        let mut catalog = Self::default();
        for (line, record) in read_records::<_, ProductRecord>(reader, source, diagnostics)? {
            let id = record.id;
            if catalog.products.insert(id, record) {
                diagnostics.line(source, line, WarningKind::DuplicateProduct(id));
            }
        }
        Ok(catalog)
    }

    /// Build from records already in memory, last duplicate wins
    pub fn from_records(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            catalog.products.insert(record.id, record);
        }
        catalog
    }

    /// Unit price of `id`
    pub fn price_of(&self, id: u32) -> Result<Price, LookupError> {
        self.products
            .get(&id)
            .map(|product| product.price)
            .ok_or(LookupError::ProductNotFound(id))
    }

    pub fn get(&self, id: u32) -> Option<&ProductRecord> {
        self.products.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.products.contains_key(&id)
    }

    /// Products in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
