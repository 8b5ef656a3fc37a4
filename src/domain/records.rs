//! Reference and transaction records
//!
//! Typed forms of the lines found in the input files. Records are immutable
//! once parsed.

use super::{Price, SalespersonKey};

/// One line of the salespeople file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalespersonRecord {
    pub key: SalespersonKey,
    pub first_name: String,
    pub last_name: String,
}

impl SalespersonRecord {
    pub fn new(key: SalespersonKey, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            key,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "firstName lastName"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One line of the product catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: u32,
    pub name: String,
    pub price: Price,
}

impl ProductRecord {
    pub fn new(id: u32, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// One sale line inside a sales file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: u32,
    pub quantity: u64,
}
