//! Transaction records recovered from statement text

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money-flow direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    #[serde(rename = "DEBIT")]
    Debit,
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Direction {
    /// All directions in report order
    pub const ALL: [Direction; 3] = [Direction::Debit, Direction::Credit, Direction::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "DEBIT",
            Direction::Credit => "CREDIT",
            Direction::Unknown => "UNKNOWN",
        }
    }

    /// Map a standalone `DEBIT` / `CREDIT` token (any case) to a direction.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("debit") {
            Some(Direction::Debit)
        } else if token.eq_ignore_ascii_case("credit") {
            Some(Direction::Credit)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transaction recovered from a statement block.
///
/// Created once per date anchor and never mutated afterwards; reports only
/// read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Raw date token as matched in the source ("Oct 23, 2025" or "14 Dec")
    pub date: String,
    /// Cleaned, whitespace-normalized description
    pub description: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Digits with at most one decimal point; `None` when no amount was found
    pub amount: Option<String>,
    /// "Personal" or the title-cased first word of the counterparty
    pub category: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        direction: Direction,
        amount: Option<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            direction,
            amount,
            category: category.into(),
        }
    }

    /// Amount as a number for aggregation. Missing or malformed amounts count as 0.0.
    pub fn amount_value(&self) -> f64 {
        self.amount
            .as_deref()
            .and_then(|a| a.replace(',', "").trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Interpret the raw date token as a calendar date.
    ///
    /// Year-less tokens ("14 Dec") take `default_year`. Returns `None` for
    /// tokens that do not name a real day.
    pub fn calendar_date(&self, default_year: i32) -> Option<NaiveDate> {
        parse_date_token(&self.date, default_year)
    }
}

/// Parse "Oct 23, 2025", "Oct 23 2025", "14 Dec" or "14 December 2025".
pub fn parse_date_token(token: &str, default_year: i32) -> Option<NaiveDate> {
    let parts: Vec<&str> = token
        .split(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 2 {
        return None;
    }

    let (month, day) = match month_number(parts[0]) {
        Some(m) => (m, parts[1].parse::<u32>().ok()?),
        None => (month_number(parts[1])?, parts[0].parse::<u32>().ok()?),
    };

    let year = match parts.get(2) {
        Some(y) => y.parse::<i32>().ok()?,
        None => default_year,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(s: &str) -> Option<u32> {
    let prefix: String = s.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
