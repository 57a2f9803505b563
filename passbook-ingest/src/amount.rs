//! Amount extraction from a transaction block.
//!
//! Every numeral in the block is a candidate. Candidates carrying a currency
//! marker or a decimal fraction are preferred, and later candidates beat
//! earlier ones, since the amount column trails the description.
//!
//! OCR frequently reads the rupee glyph as a leading `7` or `2` ("₹40" becomes
//! "740"). When the chosen numeral has no recognised marker, that leading
//! digit is dropped. This is a best-effort repair: a genuine unmarked amount
//! starting with 2 or 7 is shortened too.

use regex::Regex;
use std::sync::OnceLock;

/// Leading digits OCR substitutes for the rupee glyph
pub const CORRUPTED_CURRENCY_GLYPHS: &[char] = &['7', '2'];

const CURRENCY_BONUS: usize = 100;
const FRACTION_BONUS: usize = 50;
/// Integers this long are phone numbers or account ids, never amounts
const PHONE_DIGITS: usize = 10;

fn noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)\b(?:(?:transaction|tran|txn|order|upi)\s*id|utr\s*no",
            r"|(?:bank\s*|upi\s*)?ref\s*no|upi\s*ref|paid\s+by)\b.*"
        ))
        .expect("noise regex")
    })
}

fn time_of_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?(?:\s*[ap]m\b)?").expect("time regex")
    })
}

fn candidate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?P<sign>-\s*)?(?P<currency>\bRs\.?|₹)?\s*(?P<num>\d[\d,]*(?:\.\d+)?)")
            .expect("amount candidate regex")
    })
}

/// A numeral that may be the transaction amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCandidate {
    /// Byte offset where the match (sign and marker included) begins
    pub start: usize,
    /// Numeral with thousands separators removed
    pub numeral: String,
    pub has_currency: bool,
    pub negative: bool,
    /// Position among all numerals in the block, filtered ones included
    pub ordinal: usize,
}

impl AmountCandidate {
    pub fn has_fraction(&self) -> bool {
        self.numeral.contains('.')
    }

    pub fn score(&self) -> usize {
        let mut score = self.ordinal;
        if self.has_currency {
            score += CURRENCY_BONUS;
        }
        if self.has_fraction() {
            score += FRACTION_BONUS;
        }
        score
    }
}

/// The winning amount after sanitization and glyph correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAmount {
    /// Digits with at most one decimal point
    pub amount: String,
    pub negative: bool,
    pub has_currency: bool,
    pub glyph_corrected: bool,
    /// Byte offset in the cleaned block where the amount match begins
    pub start: usize,
}

/// Remove identifier lines (transaction / order / UPI ids, UTR and reference
/// numbers, "Paid by" account metadata) and clock times.
pub fn strip_noise(block: &str) -> String {
    let without_ids = noise_re().replace_all(block, "");
    time_of_day_re().replace_all(&without_ids, " ").into_owned()
}

/// All plausible amount candidates in source order.
pub fn candidates(cleaned: &str) -> Vec<AmountCandidate> {
    candidate_re()
        .captures_iter(cleaned)
        .enumerate()
        .filter_map(|(ordinal, caps)| {
            let whole = caps.get(0)?;
            let numeral = caps["num"].replace(',', "");
            if !numeral.contains('.') && numeral.len() >= PHONE_DIGITS {
                return None;
            }
            Some(AmountCandidate {
                start: whole.start(),
                numeral,
                has_currency: caps.name("currency").is_some(),
                negative: caps.name("sign").is_some(),
                ordinal,
            })
        })
        .collect()
}

/// Highest-scoring candidate; ties go to the later one.
pub fn best_candidate(cleaned: &str) -> Option<AmountCandidate> {
    candidates(cleaned)
        .into_iter()
        .fold(None, |best: Option<AmountCandidate>, c| match best {
            Some(b) if b.score() > c.score() => Some(b),
            _ => Some(c),
        })
}

/// Drop a leading `7`/`2` that is really a misread currency glyph.
///
/// Only applies when no marker was recognised and something numeric remains.
pub fn correct_currency_glyph(numeral: &str, has_currency: bool) -> Option<String> {
    if has_currency || numeral.len() <= 1 {
        return None;
    }
    let mut chars = numeral.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    if CORRUPTED_CURRENCY_GLYPHS.contains(&first) && rest.starts_with(|c: char| c.is_ascii_digit()) {
        Some(rest.to_string())
    } else {
        None
    }
}

/// Extract the amount from a block that has already been through [`strip_noise`].
pub fn extract_amount(cleaned: &str) -> Option<ExtractedAmount> {
    let best = best_candidate(cleaned)?;
    let corrected = correct_currency_glyph(&best.numeral, best.has_currency);
    let glyph_corrected = corrected.is_some();

    Some(ExtractedAmount {
        amount: corrected.unwrap_or(best.numeral),
        negative: best.negative,
        has_currency: best.has_currency,
        glyph_corrected,
        start: best.start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount_of(block: &str) -> Option<String> {
        extract_amount(&strip_noise(block)).map(|a| a.amount)
    }

    #[test]
    fn test_leading_glyph_digit_is_dropped_without_marker() {
        assert_eq!(amount_of("Paid to RAKESH KUMAR DEBIT 740").as_deref(), Some("40"));
        assert_eq!(amount_of("Paid to Flipkart DEBIT 2756").as_deref(), Some("756"));
        assert_eq!(amount_of("Mobile recharged DEBIT 2150.14").as_deref(), Some("150.14"));
    }

    #[test]
    fn test_marker_prevents_correction() {
        assert_eq!(amount_of("Paid to Flipkart DEBIT ₹756").as_deref(), Some("756"));
        assert_eq!(amount_of("Paid to X - Rs.2,000").as_deref(), Some("2000"));
        assert_eq!(amount_of("Paid to X Rs 740").as_deref(), Some("740"));
    }

    #[test]
    fn test_single_digit_and_non_glyph_leads_are_kept() {
        assert_eq!(amount_of("Fee DEBIT 7").as_deref(), Some("7"));
        assert_eq!(amount_of("Paid DEBIT 150.14").as_deref(), Some("150.14"));
        // nothing numeric would remain after the decimal point
        assert_eq!(amount_of("Fee DEBIT 7.50").as_deref(), Some("7.50"));
    }

    #[test]
    fn test_phone_numbers_are_not_candidates() {
        let cleaned = strip_noise("Mobile recharged 8986721145 DEBIT 150.14");
        let all = candidates(&cleaned);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].numeral, "150.14");
        assert_eq!(all[0].ordinal, 1);
    }

    #[test]
    fn test_scoring_prefers_marker_then_fraction_then_position() {
        let best = best_candidate("12 items 3.50 Rs 40 and 99").unwrap();
        assert_eq!(best.numeral, "40");
        assert!(best.has_currency);

        let best = best_candidate("12 items 3.50 then 99").unwrap();
        assert_eq!(best.numeral, "3.50");

        let best = best_candidate("12 then 99").unwrap();
        assert_eq!(best.numeral, "99");
    }

    #[test]
    fn test_noise_lines_are_removed() {
        let block = "Paid to RAKESH KUMAR\nTransaction ID T25102318\nUTR No 5512\nDEBIT\n₹40";
        let cleaned = strip_noise(block);
        assert!(!cleaned.contains("T25102318"));
        assert!(!cleaned.contains("5512"));
        assert_eq!(amount_of(block).as_deref(), Some("40"));

        let paytm = "Paid to Harendra Saw Tag: BB Bank Of - Rs.20\nUPI ID: q815477717@ybl on PhonePe\nUPI Ref No: 695568090142";
        assert_eq!(amount_of(paytm).as_deref(), Some("20"));
    }

    #[test]
    fn test_clock_times_are_not_amounts() {
        let cleaned = strip_noise("06:12 PM Paid to RAKESH KUMAR DEBIT 740");
        assert_eq!(candidates(&cleaned).len(), 1);
        assert_eq!(amount_of("06:12 PM Paid to A B DEBIT 740").as_deref(), Some("40"));
    }

    #[test]
    fn test_negative_sign_is_reported() {
        let got = extract_amount("Bhubaneswar-Sambalpur Axis Bank - Rs.690.64").unwrap();
        assert!(got.negative);
        assert!(got.has_currency);
        assert_eq!(got.amount, "690.64");
    }

    #[test]
    fn test_rs_inside_a_word_is_not_a_marker() {
        let best = best_candidate("Users 740").unwrap();
        assert!(!best.has_currency);
    }

    #[test]
    fn test_no_numeral_is_none() {
        assert_eq!(amount_of("Received from Mr Abhishek Kumar Jha CREDIT"), None);
        assert_eq!(amount_of(""), None);
        // a lone comma is not a numeral
        assert_eq!(amount_of("Paid to A, B"), None);
    }
}
