//! Debit/credit classification from phrase cues.
//!
//! Credit phrases are checked before debit phrases; the first hit wins. A
//! bare DEBIT/CREDIT token is only consulted when no phrase matched.

use passbook_core::Direction;
use regex::Regex;
use std::sync::OnceLock;

const CREDIT_PHRASES: &[&str] = &["received from", "credited", "deposit", "credit"];
const DEBIT_PHRASES: &[&str] = &[
    "paid to",
    "sent to",
    "money sent to",
    "withdraw",
    "withdrawn",
    "debit",
];

/// Which rule decided the direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Phrase(&'static str),
    TypeToken,
    NegativeAmount,
    None,
}

fn phrase_re(phrase: &str) -> Regex {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    Regex::new(&format!(r"(?i)\b{}\b", words.join(r"\s+"))).expect("direction phrase regex")
}

fn credit_res() -> &'static [(&'static str, Regex)] {
    static RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RES.get_or_init(|| CREDIT_PHRASES.iter().map(|p| (*p, phrase_re(p))).collect())
}

fn debit_res() -> &'static [(&'static str, Regex)] {
    static RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RES.get_or_init(|| DEBIT_PHRASES.iter().map(|p| (*p, phrase_re(p))).collect())
}

fn type_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(DEBIT|CREDIT)\b").expect("type token regex"))
}

/// Direction implied by a credit or debit phrase, if any.
pub fn semantic_direction(block: &str) -> Option<(Direction, &'static str)> {
    if let Some((phrase, _)) = credit_res().iter().find(|(_, re)| re.is_match(block)) {
        return Some((Direction::Credit, *phrase));
    }
    debit_res()
        .iter()
        .find(|(_, re)| re.is_match(block))
        .map(|(phrase, _)| (Direction::Debit, *phrase))
}

/// First standalone DEBIT/CREDIT token in the block.
pub fn explicit_direction(block: &str) -> Option<Direction> {
    type_token_re()
        .captures(block)
        .and_then(|caps| Direction::from_token(&caps[1]))
}

/// Classify a block, reporting which rule fired.
pub fn classify_with_cue(block: &str) -> (Direction, Cue) {
    if let Some((direction, phrase)) = semantic_direction(block) {
        return (direction, Cue::Phrase(phrase));
    }
    match explicit_direction(block) {
        Some(direction) => (direction, Cue::TypeToken),
        None => (Direction::Unknown, Cue::None),
    }
}

pub fn classify(block: &str) -> Direction {
    classify_with_cue(block).0
}

/// A minus sign on the chosen amount overrides any phrase ("Credit Card" in a payment row).
pub fn apply_sign_override(classified: (Direction, Cue), negative_amount: bool) -> (Direction, Cue) {
    if negative_amount {
        (Direction::Debit, Cue::NegativeAmount)
    } else {
        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_phrases_win_over_debit_phrases() {
        assert_eq!(classify("Received from ANAM ANSARI CREDIT 7300"), Direction::Credit);
        // credit phrase checked first even when a debit phrase appears earlier
        assert_eq!(classify("Paid to X, amount credited back 50"), Direction::Credit);
    }

    #[test]
    fn test_debit_phrases() {
        assert_eq!(classify("Paid to RAKESH KUMAR DEBIT 740"), Direction::Debit);
        assert_eq!(classify("Money sent to Suraj Kumar - Rs.170"), Direction::Debit);
        assert_eq!(classify("ATM cash withdrawn 500"), Direction::Debit);
        assert_eq!(classify("PAID   TO\nFlipkart 756"), Direction::Debit);
    }

    #[test]
    fn test_phrases_are_word_bounded() {
        // "debited" / "prepaid tokens" are not cues
        assert_eq!(classify("prepaid tokens 99"), Direction::Unknown);
        assert_eq!(classify("creditors 40"), Direction::Unknown);
    }

    #[test]
    fn test_cue_reporting() {
        assert_eq!(
            classify_with_cue("Received from A B 300"),
            (Direction::Credit, Cue::Phrase("received from"))
        );
        assert_eq!(classify_with_cue("Mobile recharged 150.14"), (Direction::Unknown, Cue::None));
    }

    #[test]
    fn test_explicit_token() {
        assert_eq!(explicit_direction("foo Debit bar"), Some(Direction::Debit));
        assert_eq!(explicit_direction("foo CREDIT"), Some(Direction::Credit));
        assert_eq!(explicit_direction("debited"), None);
    }

    #[test]
    fn test_negative_amount_forces_debit() {
        let classified = classify_with_cue("Credit Card bill payment Rs.500");
        assert_eq!(classified.0, Direction::Credit);
        assert_eq!(
            apply_sign_override(classified, true),
            (Direction::Debit, Cue::NegativeAmount)
        );
        assert_eq!(apply_sign_override(classified, false), classified);
    }
}
