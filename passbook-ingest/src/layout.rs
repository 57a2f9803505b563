//! Statement layout detection and layout-specific description clean-up.
//!
//! AnchorStyle: month-first dates ("Oct 23, 2025") with a DEBIT/CREDIT type
//! column between description and amount.
//! SemanticStyle: day-first dates ("14 Dec") where direction is only implied
//! by phrases, and rows carry a trailing "Tag: ..." label.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::segment::month_day_year_re;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementLayout {
    #[serde(rename = "anchor-style")]
    AnchorStyle,
    #[serde(rename = "semantic-style")]
    SemanticStyle,
}

fn numeric_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("numeric date regex"))
}

fn trailing_type_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s*\b(?:DEBIT|CREDIT)\b[^\w]*$").expect("type token regex"))
}

fn tag_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "Deepak Kumar O Tag: B} Bank Of -": the tag icon OCRs as O, 0, © or }.
    // Other single letters are real initials and stay.
    RE.get_or_init(|| {
        Regex::new(r"(?:\s+(?:[^\w\s]{1,2}|[Oo0]))?\s*\bTag:.*$").expect("tag suffix regex")
    })
}

impl StatementLayout {
    /// Pick a layout from the date shapes present in the text.
    ///
    /// Unambiguous numeric dates decide first (a first field above 12 means
    /// day-first); otherwise a month-day-year date means AnchorStyle.
    pub fn detect(text: &str) -> Self {
        for caps in numeric_date_re().captures_iter(text) {
            let first: u32 = caps[1].parse().unwrap_or(0);
            let second: u32 = caps[2].parse().unwrap_or(0);
            if first > 12 {
                return StatementLayout::SemanticStyle;
            }
            if second > 12 {
                return StatementLayout::AnchorStyle;
            }
        }

        if month_day_year_re().is_match(text) {
            StatementLayout::AnchorStyle
        } else {
            StatementLayout::SemanticStyle
        }
    }

    /// Field order of numeric dates in this layout
    pub fn date_order(&self) -> &'static str {
        match self {
            StatementLayout::AnchorStyle => "MM/DD/YYYY",
            StatementLayout::SemanticStyle => "DD/MM/YYYY",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementLayout::AnchorStyle => "anchor-style",
            StatementLayout::SemanticStyle => "semantic-style",
        }
    }

    /// Final clean-up of the text preceding the amount.
    pub fn tidy_description(&self, raw: &str) -> String {
        let normalized = normalize_whitespace(raw);
        let trimmed = match self {
            StatementLayout::AnchorStyle => trailing_type_token_re().replace(&normalized, ""),
            StatementLayout::SemanticStyle => tag_suffix_re().replace(&normalized, ""),
        };
        trimmed.trim().to_string()
    }
}

impl fmt::Display for StatementLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_layouts() {
        assert_eq!(
            StatementLayout::detect("Oct 23, 2025\nPaid to RAKESH KUMAR DEBIT 740"),
            StatementLayout::AnchorStyle
        );
        assert_eq!(
            StatementLayout::detect("14 Dec 10:20 PM Paid to Harendra Saw - Rs.20"),
            StatementLayout::SemanticStyle
        );
        assert_eq!(StatementLayout::detect(""), StatementLayout::SemanticStyle);
    }

    #[test]
    fn test_numeric_dates_take_priority() {
        // day-first period header outranks a month-name date further down
        let text = "Period 25/11/2025 - 24/12/2025\nOct 23, 2025 Paid to X DEBIT 40";
        assert_eq!(StatementLayout::detect(text), StatementLayout::SemanticStyle);

        let text = "Generated 11/25/2025\n14 Dec Paid to X - Rs.20";
        assert_eq!(StatementLayout::detect(text), StatementLayout::AnchorStyle);

        // ambiguous numeric dates fall through to the month-name check
        let text = "Generated 01/02/2025\n14 Dec Paid to X - Rs.20";
        assert_eq!(StatementLayout::detect(text), StatementLayout::SemanticStyle);
    }

    #[test]
    fn test_anchor_style_drops_type_column() {
        let layout = StatementLayout::AnchorStyle;
        assert_eq!(layout.tidy_description("Paid to RAKESH KUMAR DEBIT"), "Paid to RAKESH KUMAR");
        assert_eq!(layout.tidy_description("Paid to RAKESH KUMAR\n\nDEBIT\n"), "Paid to RAKESH KUMAR");
        assert_eq!(
            layout.tidy_description("Credit Card bill DEBIT"),
            "Credit Card bill"
        );
        assert_eq!(layout.tidy_description("DEBIT card fee"), "DEBIT card fee");
    }

    #[test]
    fn test_semantic_style_drops_tag_suffix() {
        let layout = StatementLayout::SemanticStyle;
        assert_eq!(
            layout.tidy_description("Paid to Harendra Saw Tag: BB Bank Of"),
            "Paid to Harendra Saw"
        );
        assert_eq!(
            layout.tidy_description("Paid to Deepak Kumar O Tag: B} Bank Of"),
            "Paid to Deepak Kumar"
        );
        assert_eq!(
            layout.tidy_description("Money sent to Suraj Kumar © Tag: 3 Bank Of"),
            "Money sent to Suraj Kumar"
        );
        assert_eq!(
            layout.tidy_description("Paytm Bus: Bhubaneswar-Sambalpur O Tag: Ae Axis Bank"),
            "Paytm Bus: Bhubaneswar-Sambalpur"
        );
    }

    #[test]
    fn test_semantic_style_keeps_name_initials() {
        let layout = StatementLayout::SemanticStyle;
        assert_eq!(
            layout.tidy_description("Paid to Rakesh K Tag: BB Bank Of"),
            "Paid to Rakesh K"
        );
        assert_eq!(
            layout.tidy_description("Received from A Sharma Tag: Ae Axis Bank"),
            "Received from A Sharma"
        );
    }
}
