//! Salesperson Aggregate
//!
//! Revenue collected by one registered salesperson.

use crate::domain::{MoneyError, Revenue, SalespersonKey};

use super::{Aggregate, Sale};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalespersonAggregate {
    key: SalespersonKey,

    /// Sum of `price * quantity` over applied sales
    revenue: Revenue,

    line_items: u64,
}

impl SalespersonAggregate {
    /// Zero revenue for `key`
    pub fn new(key: SalespersonKey) -> Self {
        Self {
            key,
            revenue: Revenue::zero(),
            line_items: 0,
        }
    }

    pub fn revenue(&self) -> &Revenue {
        &self.revenue
    }
}

impl Aggregate for SalespersonAggregate {
    type Key = SalespersonKey;

    fn key(&self) -> SalespersonKey {
        self.key
    }

    fn key_of(sale: &Sale) -> SalespersonKey {
        sale.seller
    }

    fn line_items(&self) -> u64 {
        self.line_items
    }

    fn apply(&self, sale: &Sale) -> Result<Self, MoneyError> {
        let mut next = *self;
        next.revenue.credit(&sale.unit_price, sale.quantity)?;
        next.line_items += 1;
        Ok(next)
    }
}
