//! Domain module
//!
//! Core domain types: identities, money and parsed records.

pub mod document;
pub mod error;
pub mod money;
pub mod records;

pub use document::{DocumentType, SalespersonKey};
pub use error::RecordError;
pub use money::{MoneyError, Price, Revenue};
pub use records::{LineItem, ProductRecord, SalespersonRecord};
