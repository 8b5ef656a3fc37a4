//! Aggregation Engine
//!
//! Streams every sales file, resolves each line item against the registry
//! and the catalog, and accumulates revenue per salesperson and units per
//! product. Malformed or unresolvable input is skipped with a warning; only
//! discovery problems stop the run.

use std::io::BufRead;

use crate::aggregate::{AggregateSet, ProductAggregate, Sale, SalespersonAggregate};
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::domain::{LineItem, SalespersonKey};
use crate::error::{ReportError, ReportResult};
use crate::parser::{parse_record, record_lines};
use crate::reference::{Catalog, SalespersonRegistry};
use crate::source::SalesSource;

/// What to do when discovery finds no sales file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySalesPolicy {
    /// Stop with `ReportError::NoSalesFiles`
    #[default]
    Fail,
    /// Carry on and report every member at zero
    ZeroFill,
}

/// Counters for one aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub line_items_applied: usize,
    pub line_items_skipped: usize,
}

/// Final totals handed to the report emitter
#[derive(Debug, Clone)]
pub struct SalesTotals {
    pub salespeople: AggregateSet<SalespersonAggregate>,
    pub products: AggregateSet<ProductAggregate>,
    pub stats: AggregationStats,
}

/// How a single sales file ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Header resolved; `applied` line items counted
    Processed { owner: SalespersonKey, applied: usize },
    /// Header missing, malformed, unknown or unreadable
    Skipped,
}

/// Accumulates sales against one registry and one catalog
pub struct AggregationEngine<'a> {
    registry: &'a SalespersonRegistry,
    catalog: &'a Catalog,
    salespeople: AggregateSet<SalespersonAggregate>,
    products: AggregateSet<ProductAggregate>,
    stats: AggregationStats,
}

impl<'a> AggregationEngine<'a> {
    /// Start with a zero aggregate for every salesperson and every product
    pub fn new(registry: &'a SalespersonRegistry, catalog: &'a Catalog) -> Self {
        Self {
            registry,
            catalog,
            salespeople: AggregateSet::seeded(
                registry.iter().map(|record| SalespersonAggregate::new(record.key)),
            ),
            products: AggregateSet::seeded(catalog.iter().map(|record| ProductAggregate::new(record.id))),
            stats: AggregationStats::default(),
        }
    }

    /// Aggregate every file of `source`
    pub fn run(
        mut self,
        source: &dyn SalesSource,
        policy: EmptySalesPolicy,
        diagnostics: &mut Diagnostics,
    ) -> ReportResult<SalesTotals> {
        let names = source.discover()?;

        if names.is_empty() {
            match policy {
                EmptySalesPolicy::Fail => {
                    return Err(ReportError::NoSalesFiles {
                        location: source.describe(),
                    })
                }
                EmptySalesPolicy::ZeroFill => {
                    tracing::warn!(location = %source.describe(), "No sales files found, reporting zero totals");
                }
            }
        }

        tracing::info!(files = names.len(), "Aggregating sales files");

        for name in &names {
            match source.open(name) {
                Ok(reader) => {
                    self.process_file(name, reader, diagnostics);
                }
                Err(e) => {
                    diagnostics.file(name, WarningKind::Unreadable(e.to_string()));
                    self.stats.files_skipped += 1;
                }
            }
        }

        Ok(self.finish())
    }

    /// Apply one sales file: a `docType;docNumber` header, then `productId;quantity` lines
    pub fn process_file<R: BufRead>(
        &mut self,
        name: &str,
        reader: R,
        diagnostics: &mut Diagnostics,
    ) -> FileOutcome {
        let mut lines = record_lines(reader);

        let owner = match lines.next() {
            None => {
                diagnostics.file(name, WarningKind::MissingHeader);
                return self.skip_file();
            }
            Some(Err(e)) => {
                diagnostics.file(name, WarningKind::Unreadable(e.to_string()));
                return self.skip_file();
            }
            Some(Ok(header)) => match header.and_then(|header| parse_record::<SalespersonKey>(&header)) {
                Ok(key) if self.registry.contains(&key) => key,
                Ok(key) => {
                    diagnostics.file(name, WarningKind::UnknownSalesperson(key));
                    return self.skip_file();
                }
                Err(e) => {
                    diagnostics.line(name, 1, WarningKind::Malformed(e));
                    return self.skip_file();
                }
            },
        };

        let mut applied = 0;
        for (index, line) in lines.enumerate() {
            let line_number = index + 2;
            let line = match line {
                Ok(Ok(line)) => line,
                Ok(Err(e)) => {
                    diagnostics.line(name, line_number, WarningKind::Malformed(e));
                    self.stats.line_items_skipped += 1;
                    continue;
                }
                Err(e) => {
                    // keep what was already counted from this file
                    diagnostics.line(name, line_number, WarningKind::Unreadable(e.to_string()));
                    break;
                }
            };
            if line.is_empty() {
                continue;
            }

            match self.apply_line(owner, &line) {
                Ok(()) => {
                    applied += 1;
                    self.stats.line_items_applied += 1;
                }
                Err(kind) => {
                    diagnostics.line(name, line_number, kind);
                    self.stats.line_items_skipped += 1;
                }
            }
        }

        tracing::debug!(file = name, owner = %owner, applied, "Processed sales file");
        self.stats.files_processed += 1;
        FileOutcome::Processed { owner, applied }
    }

    fn apply_line(&mut self, owner: SalespersonKey, line: &str) -> Result<(), WarningKind> {
        let item: LineItem = parse_record(line).map_err(WarningKind::Malformed)?;
        let unit_price = self
            .catalog
            .price_of(item.product_id)
            .map_err(|_| WarningKind::UnknownProduct(item.product_id))?;

        let sale = Sale {
            seller: owner,
            product_id: item.product_id,
            unit_price,
            quantity: item.quantity,
        };

        // both totals are computed before either is stored
        let seller = self
            .salespeople
            .preview(&sale)
            .ok_or(WarningKind::UnknownSalesperson(owner))?
            .map_err(WarningKind::Overflow)?;
        let product = self
            .products
            .preview(&sale)
            .ok_or(WarningKind::UnknownProduct(item.product_id))?
            .map_err(WarningKind::Overflow)?;

        self.salespeople.commit(seller);
        self.products.commit(product);
        Ok(())
    }

    fn skip_file(&mut self) -> FileOutcome {
        self.stats.files_skipped += 1;
        FileOutcome::Skipped
    }

    pub fn stats(&self) -> AggregationStats {
        self.stats
    }

    pub fn finish(self) -> SalesTotals {
        tracing::info!(
            files_processed = self.stats.files_processed,
            files_skipped = self.stats.files_skipped,
            line_items_applied = self.stats.line_items_applied,
            line_items_skipped = self.stats.line_items_skipped,
            "Aggregation finished"
        );
        SalesTotals {
            salespeople: self.salespeople,
            products: self.products,
            stats: self.stats,
        }
    }
}

/// Aggregate all of `source` against the given reference data
pub fn aggregate(
    registry: &SalespersonRegistry,
    catalog: &Catalog,
    source: &dyn SalesSource,
    policy: EmptySalesPolicy,
    diagnostics: &mut Diagnostics,
) -> ReportResult<SalesTotals> {
    AggregationEngine::new(registry, catalog).run(source, policy, diagnostics)
}
