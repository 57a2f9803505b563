//! Turns statement text into transactions, one per date anchor.

use log::{debug, info};
use passbook_core::{CategoryResolver, Transaction};
use serde::Serialize;

use crate::amount::{extract_amount, strip_noise};
use crate::direction::{apply_sign_override, classify_with_cue};
use crate::layout::StatementLayout;
use crate::segment::{Block, segment};

/// Transactions plus the layout they were parsed with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedStatement {
    pub layout: StatementLayout,
    pub transactions: Vec<Transaction>,
}

/// Statement parser with an injected category resolver.
///
/// Holds no mutable state; one instance can parse any number of documents,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    resolver: CategoryResolver,
    layout: Option<StatementLayout>,
}

impl StatementParser {
    pub fn new(resolver: CategoryResolver) -> Self {
        Self {
            resolver,
            layout: None,
        }
    }

    /// Skip detection and always use `layout`.
    pub fn with_layout(mut self, layout: StatementLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn resolver(&self) -> &CategoryResolver {
        &self.resolver
    }

    pub fn parse(&self, text: &str) -> ParsedStatement {
        let text = text.replace('\r', "\n");
        let layout = self.layout.unwrap_or_else(|| StatementLayout::detect(&text));

        let transactions: Vec<Transaction> = segment(&text)
            .iter()
            .map(|block| self.assemble(layout, block))
            .collect();

        info!(
            "parsed {} transactions ({} layout)",
            transactions.len(),
            layout
        );

        ParsedStatement {
            layout,
            transactions,
        }
    }

    /// Build the transaction for one block.
    pub fn assemble(&self, layout: StatementLayout, block: &Block<'_>) -> Transaction {
        let cleaned = strip_noise(block.text);
        let extracted = extract_amount(&cleaned);

        let negative = extracted.as_ref().is_some_and(|a| a.negative);
        let (direction, cue) = apply_sign_override(classify_with_cue(block.text), negative);

        let raw_description = match &extracted {
            Some(a) => {
                if a.glyph_corrected {
                    debug!(
                        "{}: dropped leading currency glyph, amount {}",
                        block.date, a.amount
                    );
                } else if !a.has_currency {
                    debug!("{}: amount {} has no currency marker", block.date, a.amount);
                }
                &cleaned[..a.start]
            }
            None => {
                debug!("{}: no amount candidate", block.date);
                cleaned.as_str()
            }
        };
        let description = layout.tidy_description(raw_description);
        let resolved = self.resolver.resolve(&description);

        debug!(
            "{}: {} via {:?}, amount {:?}, entity {:?} -> {}",
            block.date,
            direction,
            cue,
            extracted.as_ref().map(|a| a.amount.as_str()),
            resolved.entity,
            resolved.category
        );

        Transaction::new(
            block.date,
            description,
            direction,
            extracted.map(|a| a.amount),
            resolved.category,
        )
    }
}

/// Parse with the built-in keyword dictionary and detected layout.
pub fn parse(text: &str) -> Vec<Transaction> {
    StatementParser::default().parse(text).transactions
}

/// Parse with the built-in keyword dictionary and a fixed layout.
pub fn parse_with_layout(text: &str, layout: StatementLayout) -> Vec<Transaction> {
    StatementParser::default()
        .with_layout(layout)
        .parse(text)
        .transactions
}
