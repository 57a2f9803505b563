//! Block segmentation on date anchors.
//!
//! Two date shapes are recognised, both by one combined pattern:
//!   Oct 23, 2025      (month, day, year)
//!   14 Dec            (day, month, no year)
//!
//! Text before the first anchor is statement header and is dropped.

use regex::{Match, Regex};
use std::sync::OnceLock;

const MONTH: &str = concat!(
    r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?",
    r"|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)"
);

/// A date anchor and the text up to the next anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub date: &'a str,
    pub text: &'a str,
}

pub fn date_anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?i)(?:{m}\s+\d{{1,2}}[.,\s]+\d{{4}}|(?:3[01]|[12]\d|0?[1-9])[ \t]+{m}\b)",
            m = MONTH
        );
        Regex::new(&pattern).expect("date anchor regex")
    })
}

/// `"<Month> <Day>, <Year>"` only
pub fn month_day_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(?i)\b{m}\s+\d{{1,2}},\s+\d{{4}}\b", m = MONTH);
        Regex::new(&pattern).expect("month-day-year regex")
    })
}

/// A match that is part of a longer number ("112 Oct", "Oct 1, 20251").
fn extends_a_numeral(text: &str, m: &Match<'_>) -> bool {
    let digit_before = text[..m.start()]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit());
    let digit_after = text[m.end()..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());
    let starts_with_day = m.as_str().starts_with(|c: char| c.is_ascii_digit());
    (digit_before && starts_with_day) || digit_after
}

/// All date anchors in source order.
///
/// OCR often glues an anchor to its neighbours ("₹40Oct 18, 2025Paid"), so
/// only digits on either side disqualify a match.
pub fn date_anchors(text: &str) -> Vec<Match<'_>> {
    let re = date_anchor_re();
    let mut anchors = Vec::new();
    let mut at = 0;
    while let Some(m) = re.find_at(text, at) {
        if extends_a_numeral(text, &m) {
            at = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        at = m.end();
        anchors.push(m);
    }
    anchors
}

/// Split text into one block per date anchor, in source order.
pub fn segment(text: &str) -> Vec<Block<'_>> {
    let anchors = date_anchors(text);

    anchors
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = anchors.get(i + 1).map_or(text.len(), |next| next.start());
            Block {
                date: m.as_str(),
                text: text[m.end()..end].trim(),
            }
        })
        .collect()
}
