//! Product Aggregate
//!
//! Units sold of one catalog product.

use crate::domain::MoneyError;

use super::{Aggregate, Sale};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductAggregate {
    id: u32,
    quantity: u64,
    line_items: u64,
}

impl ProductAggregate {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            quantity: 0,
            line_items: 0,
        }
    }

    /// Total units sold
    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

impl Aggregate for ProductAggregate {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }

    fn key_of(sale: &Sale) -> u32 {
        sale.product_id
    }

    fn line_items(&self) -> u64 {
        self.line_items
    }

    fn apply(&self, sale: &Sale) -> Result<Self, MoneyError> {
        let quantity = self
            .quantity
            .checked_add(sale.quantity)
            .ok_or(MoneyError::Overflow)?;

        Ok(Self {
            id: self.id,
            quantity,
            line_items: self.line_items + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateSet;
    use crate::domain::{DocumentType, Price, SalespersonKey};
    use rust_decimal::Decimal;

    fn sale(product_id: u32, quantity: u64) -> Sale {
        Sale {
            seller: SalespersonKey::new(DocumentType::MinorId, 1001),
            product_id,
            unit_price: Price::new(Decimal::ONE).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_apply_adds_quantity() {
        let aggregate = ProductAggregate::new(1);
        let aggregate = aggregate.apply(&sale(1, 3)).unwrap();
        let aggregate = aggregate.apply(&sale(1, 2)).unwrap();

        assert_eq!(aggregate.quantity(), 5);
        assert_eq!(aggregate.line_items(), 2);
    }

    #[test]
    fn test_apply_overflow() {
        let aggregate = ProductAggregate::new(1).apply(&sale(1, u64::MAX)).unwrap();
        assert!(matches!(aggregate.apply(&sale(1, 1)), Err(MoneyError::Overflow)));
    }

    #[test]
    fn test_set_preview_then_commit() {
        let mut set = AggregateSet::seeded([ProductAggregate::new(1), ProductAggregate::new(2)]);

        let next = set.preview(&sale(2, 4)).unwrap().unwrap();
        assert_eq!(set.get(&2).unwrap().quantity(), 0);

        set.commit(next);
        assert_eq!(set.get(&2).unwrap().quantity(), 4);
        assert!(set.preview(&sale(3, 1)).is_none());

        let ids: Vec<u32> = set.iter().map(|a| a.key()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
