//! Structured result handed to callers: transactions, summaries and the
//! rendered report.

use log::debug;
use passbook_core::{Direction, Transaction};
use passbook_ingest::{ParsedStatement, StatementLayout, StatementParser};
use serde::Serialize;

use crate::report::{CategorySummary, format_transactions, summarize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementReport {
    pub layout: StatementLayout,
    /// Numeric date order implied by the layout ("MM/DD/YYYY" / "DD/MM/YYYY")
    pub date_order: &'static str,
    pub transaction_count: usize,
    pub debit_summary: CategorySummary,
    pub credit_summary: CategorySummary,
    pub formatted_output: String,
    pub transactions: Vec<Transaction>,
}

impl StatementReport {
    pub fn from_parsed(parsed: ParsedStatement) -> Self {
        let ParsedStatement {
            layout,
            transactions,
        } = parsed;

        let debit_summary = summarize(&transactions, Direction::Debit);
        let credit_summary = summarize(&transactions, Direction::Credit);
        debug!(
            "summaries: debit {:.2} over {} categories, credit {:.2} over {} categories",
            debit_summary.grand_total,
            debit_summary.rows.len(),
            credit_summary.grand_total,
            credit_summary.rows.len()
        );

        Self {
            layout,
            date_order: layout.date_order(),
            transaction_count: transactions.len(),
            debit_summary,
            credit_summary,
            formatted_output: format_transactions(&transactions),
            transactions,
        }
    }

    /// Parse `text` and build the full report.
    pub fn build(parser: &StatementParser, text: &str) -> Self {
        Self::from_parsed(parser.parse(text))
    }

    /// Transactions with no direction cue
    pub fn unclassified(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.direction == Direction::Unknown)
    }

    /// Transactions whose amount could not be read
    pub fn missing_amounts(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.amount.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_report() {
        let text = "Oct 23, 2025\nPaid to RAKESH KUMAR DEBIT 740\nOct 01, 2025\nReceived from ANAM ANSARI CREDIT 7300\nSep 30, 2025\nCashback";
        let report = StatementReport::build(&StatementParser::default(), text);

        assert_eq!(report.layout, StatementLayout::AnchorStyle);
        assert_eq!(report.date_order, "MM/DD/YYYY");
        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.debit_summary.grand_total, 40.0);
        assert_eq!(report.credit_summary.grand_total, 300.0);
        assert_eq!(report.unclassified().count(), 1);
        assert_eq!(report.missing_amounts().count(), 1);
        assert!(report.formatted_output.contains("Credit Category Summary"));
    }

    #[test]
    fn test_serializes_for_callers() {
        let report = StatementReport::build(&StatementParser::default(), "");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["layout"], "semantic-style");
        assert_eq!(json["transaction_count"], 0);
        assert_eq!(json["formatted_output"], "No transactions found.");
        assert!(json["transactions"].as_array().unwrap().is_empty());
    }
}
