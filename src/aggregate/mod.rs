//! Aggregate module
//!
//! Running totals keyed by reference-data identity. Every registry member and
//! every catalog product gets an aggregate at zero before any sale is read.

pub mod product;
pub mod salesperson;

pub use product::ProductAggregate;
pub use salesperson::SalespersonAggregate;

use std::fmt;
use std::hash::Hash;

use crate::domain::{MoneyError, Price, SalespersonKey};
use crate::reference::OrderedTable;

/// A line item that resolved against both reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sale {
    pub seller: SalespersonKey,
    pub product_id: u32,
    pub unit_price: Price,
    pub quantity: u64,
}

/// Aggregate trait that all running totals implement
pub trait Aggregate: Sized {
    /// Identity this total is kept for
    type Key: Copy + Eq + Hash + fmt::Debug;

    fn key(&self) -> Self::Key;

    /// Key of the aggregate a sale contributes to
    fn key_of(sale: &Sale) -> Self::Key;

    /// Number of sales applied so far
    fn line_items(&self) -> u64;

    /// Return the state after `sale`, leaving `self` untouched on overflow
    fn apply(&self, sale: &Sale) -> Result<Self, MoneyError>;
}

/// All aggregates of one kind, in reference-data order
#[derive(Debug, Clone)]
pub struct AggregateSet<A: Aggregate> {
    aggregates: OrderedTable<A::Key, A>,
}

impl<A: Aggregate> AggregateSet<A> {
    /// Seed one zero aggregate per key
    pub fn seeded(aggregates: impl IntoIterator<Item = A>) -> Self {
        let mut table = OrderedTable::new();
        for aggregate in aggregates {
            table.insert(aggregate.key(), aggregate);
        }
        Self { aggregates: table }
    }

    pub fn get(&self, key: &A::Key) -> Option<&A> {
        self.aggregates.get(key)
    }

    /// Compute the state `sale` would produce without storing it
    pub fn preview(&self, sale: &Sale) -> Option<Result<A, MoneyError>> {
        self.get(&A::key_of(sale)).map(|aggregate| aggregate.apply(sale))
    }

    /// Store a state obtained from [`AggregateSet::preview`]
    pub fn commit(&mut self, aggregate: A) {
        self.aggregates.insert(aggregate.key(), aggregate);
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.aggregates.iter()
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }
}
