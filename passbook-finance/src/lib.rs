//! passbook-finance: grouping, summaries and rendering of parsed statements

pub mod export;
pub mod report;
pub mod statement;

pub use export::write_csv;
pub use report::{
    CategorySummary, NO_TRANSACTIONS, SummaryRow, TransactionGroup, format_transactions,
    group_transactions, summarize,
};
pub use statement::StatementReport;

/// Render the full report for `transactions`.
pub fn format(transactions: &[passbook_core::Transaction]) -> String {
    format_transactions(transactions)
}
