//! Grouped and summary views over parsed transactions, rendered as
//! fixed-width text tables.
//!
//! Groups and summaries are derived on every call and never cached.

use passbook_core::{Direction, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

/// Rendered when there is nothing to report
pub const NO_TRANSACTIONS: &str = "No transactions found.";

const DETAIL_WIDTH: usize = 38;
const LISTING_RULE: usize = 90;
const DETAIL_RULE: usize = 70;
const SUMMARY_RULE: usize = 65;

/// Transactions sharing a (category, direction) key
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionGroup<'a> {
    pub category: &'a str,
    pub direction: Direction,
    pub transactions: Vec<&'a Transaction>,
    pub total: f64,
}

/// One category line of a direction summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub category: String,
    pub total: f64,
    pub percentage: f64,
}

/// Per-category totals for one direction, largest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub direction: Direction,
    pub rows: Vec<SummaryRow>,
    pub grand_total: f64,
}

/// Group by direction (DEBIT, CREDIT, UNKNOWN) then category name.
/// Members keep their statement order.
pub fn group_transactions(txns: &[Transaction]) -> Vec<TransactionGroup<'_>> {
    let mut groups: BTreeMap<(Direction, &str), Vec<&Transaction>> = BTreeMap::new();
    for txn in txns {
        groups
            .entry((txn.direction, txn.category.as_str()))
            .or_default()
            .push(txn);
    }

    groups
        .into_iter()
        .map(|((direction, category), members)| TransactionGroup {
            category,
            direction,
            total: members.iter().map(|t| t.amount_value()).sum(),
            transactions: members,
        })
        .collect()
}

/// Category totals for `direction`, zero totals omitted.
///
/// Rows are sorted by total, descending; equal totals keep the order in
/// which the categories first appear in the statement.
pub fn summarize(txns: &[Transaction], direction: Direction) -> CategorySummary {
    let mut rows: Vec<SummaryRow> = Vec::new();
    for txn in txns {
        let idx = match rows.iter().position(|r| r.category == txn.category) {
            Some(i) => i,
            None => {
                rows.push(SummaryRow {
                    category: txn.category.clone(),
                    total: 0.0,
                    percentage: 0.0,
                });
                rows.len() - 1
            }
        };
        if txn.direction == direction {
            rows[idx].total += txn.amount_value();
        }
    }

    rows.retain(|r| r.total != 0.0);
    let grand_total: f64 = rows.iter().map(|r| r.total).sum();
    for row in &mut rows {
        row.percentage = if grand_total > 0.0 {
            row.total / grand_total * 100.0
        } else {
            0.0
        };
    }
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));

    CategorySummary {
        direction,
        rows,
        grand_total,
    }
}

/// Render the listing, per-group detail tables and direction summaries.
pub fn format_transactions(txns: &[Transaction]) -> String {
    if txns.is_empty() {
        return NO_TRANSACTIONS.to_string();
    }

    let mut lines = Vec::new();
    render_listing(&mut lines, txns);

    let groups = group_transactions(txns);
    for direction in Direction::ALL {
        let members: Vec<_> = groups.iter().filter(|g| g.direction == direction).collect();
        if members.is_empty() {
            continue;
        }
        lines.push(format!("{} Transactions by Category", direction_title(direction)));
        lines.push(String::new());
        for group in members {
            render_group(&mut lines, group);
        }
    }

    for direction in [Direction::Debit, Direction::Credit] {
        let summary = summarize(txns, direction);
        if summary.grand_total > 0.0 {
            render_summary(&mut lines, &summary);
        }
    }

    lines
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn direction_title(direction: Direction) -> &'static str {
    match direction {
        Direction::Debit => "Debit",
        Direction::Credit => "Credit",
        Direction::Unknown => "Unclassified",
    }
}

fn render_listing(lines: &mut Vec<String>, txns: &[Transaction]) {
    lines.push("All Transactions".to_string());
    lines.push(format!(
        "{:<15} | {:<8} | {:<12} | {:<15} | {}",
        "Date", "Type", "Amount (₹)", "Category", "Description"
    ));
    lines.push("-".repeat(LISTING_RULE));
    for t in txns {
        lines.push(format!(
            "{:<15} | {:<8} | {:<12.2} | {:<15} | {}",
            t.date,
            t.direction.as_str(),
            t.amount_value(),
            t.category,
            t.description
        ));
    }
    lines.push(String::new());
}

fn render_group(lines: &mut Vec<String>, group: &TransactionGroup<'_>) {
    lines.push(format!("{} ({})", group.category, group.direction));
    lines.push(format!("{:<15} | {:<40} | {}", "Date", "Details", "Amount (₹)"));
    lines.push("-".repeat(DETAIL_RULE));
    for t in &group.transactions {
        lines.push(format!(
            "{:<15} | {:<40} | {:.2}",
            t.date,
            truncate_description(&t.description),
            t.amount_value()
        ));
    }
    lines.push("-".repeat(DETAIL_RULE));
    lines.push(format!("{:<58} | ₹{:.2}", "Total", group.total));
    lines.push(String::new());
}

fn render_summary(lines: &mut Vec<String>, summary: &CategorySummary) {
    lines.push(format!("{} Category Summary", direction_title(summary.direction)));
    lines.push(format!("{:<30} | {:<15} | {}", "Category", "Total (₹)", "Percentage"));
    lines.push("-".repeat(SUMMARY_RULE));
    for row in &summary.rows {
        lines.push(format!(
            "{:<30} | {:<15.2} | {:<9.2}%",
            row.category, row.total, row.percentage
        ));
    }
    lines.push("-".repeat(SUMMARY_RULE));
    lines.push(format!(
        "{:<30} | {:<15.2} | 100.00%",
        "Grand Total", summary.grand_total
    ));
    lines.push(String::new());
}

/// Descriptions longer than the detail column are cut to 35 characters plus "...".
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DETAIL_WIDTH {
        let head: String = description.chars().take(DETAIL_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
