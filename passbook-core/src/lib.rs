//! passbook-core: transaction types and the entity/category resolver

pub mod category;
pub mod transaction;

pub use category::{BusinessKeywords, CategoryResolver, Resolved, extract_entity};
pub use transaction::{Direction, Transaction, parse_date_token};
