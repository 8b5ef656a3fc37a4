//! Reference data module
//!
//! The salesperson registry and the product catalog, both built once per run
//! before any sales file is read.

pub mod catalog;
pub mod registry;

pub use catalog::Catalog;
pub use registry::SalespersonRegistry;

use std::collections::HashMap;
use std::hash::Hash;
use std::io::{self, BufRead};

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::domain::SalespersonKey;
use crate::parser::{parse_record, record_lines, FromRecord};

/// Failed lookup against reference data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("product {0} not found")]
    ProductNotFound(u32),

    #[error("salesperson {0} not found")]
    SalespersonNotFound(SalespersonKey),
}

/// Keyed table preserving first-insertion order.
///
/// Re-inserting a key replaces its value in place, so iteration order is
/// the order in which keys first appeared.
#[derive(Debug, Clone)]
pub struct OrderedTable<K, V> {
    entries: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> OrderedTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns `true` if an entry was replaced
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.index.get(&key) {
            Some(&position) => {
                self.entries[position] = value;
                true
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(value);
                false
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse every non-blank line of a reference file.
///
/// Rejected lines are recorded in `diagnostics` and left out. Only an I/O
/// failure aborts.
pub(crate) fn read_records<R: BufRead, T: FromRecord>(
    reader: R,
    source: &str,
    diagnostics: &mut Diagnostics,
) -> io::Result<Vec<(usize, T)>> {
    let mut records = Vec::new();

    for (index, line) in record_lines(reader).enumerate() {
        let line_number = index + 1;
        let line = match line? {
            Ok(line) if line.is_empty() => continue,
            Ok(line) => line,
            Err(e) => {
                diagnostics.line(source, line_number, WarningKind::Malformed(e));
                continue;
            }
        };

        match parse_record::<T>(&line) {
            Ok(record) => records.push((line_number, record)),
            Err(e) => diagnostics.line(source, line_number, WarningKind::Malformed(e)),
        }
    }

    Ok(records)
}
