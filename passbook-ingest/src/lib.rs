//! passbook-ingest: OCR statement text to transactions.
//!
//! Pipeline: segment on date anchors, strip identifier noise, pick the amount,
//! classify direction, tidy the description for the detected layout, resolve
//! the category.

pub mod amount;
pub mod assemble;
pub mod direction;
pub mod layout;
pub mod segment;

pub use assemble::{ParsedStatement, StatementParser, parse, parse_with_layout};
pub use layout::StatementLayout;
pub use segment::{Block, segment};
