//! Ranking & Report Emitter
//!
//! Orders the aggregated totals (highest first) and renders them as
//! `;`-delimited report text. Sorting is stable, so equal totals keep the
//! order in which members appear in the reference files.

use std::fmt::Write as _;

use crate::aggregate::{AggregateSet, ProductAggregate, SalespersonAggregate};
use crate::domain::{ProductRecord, Revenue, SalespersonRecord};
use crate::parser::FIELD_DELIMITER;
use crate::reference::{Catalog, SalespersonRegistry};

pub const SALESMEN_REPORT_HEADER: &str = "TipoDocumento;NumeroDocumento;NombreCompleto;TotalRecaudado";
pub const PRODUCTS_REPORT_HEADER: &str = "NombreProducto;Precio;TotalVendido";

/// One ranked line of the salesperson report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalespersonRow<'a> {
    pub salesperson: &'a SalespersonRecord,
    pub revenue: Revenue,
}

impl SalespersonRow<'_> {
    fn render(&self) -> String {
        let key = self.salesperson.key;
        format!(
            "{}{d}{}{d}{}{d}{}",
            key.document_type.code(),
            key.document_number,
            self.salesperson.full_name(),
            self.revenue,
            d = FIELD_DELIMITER
        )
    }
}

/// One ranked line of the product report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow<'a> {
    pub product: &'a ProductRecord,
    pub quantity: u64,
}

impl ProductRow<'_> {
    fn render(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            self.product.name,
            self.product.price,
            self.quantity,
            d = FIELD_DELIMITER
        )
    }
}

/// Every registered salesperson, by revenue descending
pub fn rank_salespeople<'a>(
    totals: &AggregateSet<SalespersonAggregate>,
    registry: &'a SalespersonRegistry,
) -> Vec<SalespersonRow<'a>> {
    let mut rows: Vec<SalespersonRow<'a>> = registry
        .iter()
        .map(|salesperson| SalespersonRow {
            salesperson,
            revenue: totals
                .get(&salesperson.key)
                .map(|aggregate| *aggregate.revenue())
                .unwrap_or_default(),
        })
        .collect();

    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows
}

/// Every catalog product, by units sold descending
pub fn rank_products<'a>(totals: &AggregateSet<ProductAggregate>, catalog: &'a Catalog) -> Vec<ProductRow<'a>> {
    let mut rows: Vec<ProductRow<'a>> = catalog
        .iter()
        .map(|product| ProductRow {
            product,
            quantity: totals.get(&product.id).map_or(0, ProductAggregate::quantity),
        })
        .collect();

    rows.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    rows
}

/// Header line plus one line per salesperson
pub fn emit_salesperson_report(
    totals: &AggregateSet<SalespersonAggregate>,
    registry: &SalespersonRegistry,
) -> String {
    render(
        SALESMEN_REPORT_HEADER,
        rank_salespeople(totals, registry).iter().map(SalespersonRow::render),
    )
}

/// Header line plus one line per product
pub fn emit_product_report(totals: &AggregateSet<ProductAggregate>, catalog: &Catalog) -> String {
    render(
        PRODUCTS_REPORT_HEADER,
        rank_products(totals, catalog).iter().map(ProductRow::render),
    )
}

fn render(header: &str, rows: impl Iterator<Item = String>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{header}");
    for row in rows {
        let _ = writeln!(out, "{row}");
    }
    out
}
