//! Counterparty extraction and category resolution.
//!
//! Peer-to-peer transfers ("Paid to RAKESH KUMAR") are grouped under a single
//! personal label; everything else is grouped by the first word of the
//! counterparty so that "Flipkart" and "Flipkart Internet Pvt Ltd" merge.

use std::collections::HashSet;

/// Label for transfers that look like they go to or come from a person
pub const PERSONAL: &str = "Personal";

/// Label used when a description has no counterparty text at all
pub const UNCATEGORIZED: &str = "Uncategorized";

const TRANSFER_PREFIXES: &[&str] = &["paid to", "received from"];

/// Company suffixes, trades, brands and platforms. A counterparty containing
/// any of these words is never treated as a person.
const BUILTIN_BUSINESS_KEYWORDS: &[&str] = &[
    // company forms and trades
    "PVT", "LTD", "LIMITED", "BANK", "FINANCE", "SERVICES", "TECHNOLOGIES", "TECH",
    "ENTERPRISES", "SOLUTIONS", "INFOTECH", "SYSTEMS", "NETWORK", "COMMUNICATIONS",
    "TRADERS", "AGENCIES", "ASSOCIATES", "CONSULTANTS", "ADVISORS", "PARTNERS",
    "BROTHERS", "SONS",
    // telecom and utilities
    "RECHARGE", "MOBILE", "INTERNET", "BROADBAND", "DTH", "BILL", "PAYMENT", "UPI",
    "WALLET", "PETRO", "GAS", "FUELS", "ELECTRIC",
    // retail and food
    "STORES", "MARKET", "BAZAR", "SHOP", "REST", "CAFE", "FOODS", "HOTEL", "BAKERY",
    "SWEETS", "DAIRY", "FARM", "AGRO", "SEEDS", "FERTILIZERS", "CHEMICALS", "JEWELLERS",
    "OPTICALS", "WATCHES", "GARMENTS", "TEXTILES", "FASHION", "BOUTIQUE", "TAILORS",
    "DRY", "CLEANERS",
    // logistics and media
    "TRAVELS", "LOGISTICS", "EXPRESS", "COURIER", "MEDIA", "STUDIO", "ENTERTAINMENT",
    // health and education
    "HOSPITAL", "CLINIC", "PHARMACY", "MEDICOS", "DIAGNOSTICS", "LABS", "SCHOOL",
    "COLLEGE", "ACADEMY", "INSTITUTE", "UNIVERSITY", "EDUCATION", "CENTRE", "CLASSES",
    "TUTORIALS", "COACHING",
    // vehicles
    "AUTOMOBILES", "MOTORS", "HONDA", "HERO", "BAJAJ", "TATA", "MARUTI", "TOYOTA",
    "HYUNDAI", "FORD", "NISSAN", "RENAULT", "MAHINDRA", "KIA", "MG", "VOLKSWAGEN",
    "SKODA", "BMW", "MERCEDES", "AUDI", "VOLVO", "JAGUAR", "LAND", "ROVER", "PORSCHE",
    "FERRARI", "LAMBORGHINI", "MASERATI", "ROLLS", "ROYCE", "BENTLEY", "ASTON",
    "MARTIN", "MCLAREN", "BUGATTI", "PAGANI", "KOENIGSEGG", "TESLA", "RIVIAN", "LUCID",
    "BYD", "XPENG", "NIO", "POLESTAR", "FISKER", "CANOO", "FARADAY", "FUTURE",
    "LORDSTOWN", "NIKOLA", "PROTERRA", "LION", "WORKHORSE", "HYLIION", "XL", "FLEET",
    // transport and stays
    "TRAIN", "BUS", "METRO", "FLIGHT", "AIR", "AIRLINES", "AIRWAYS", "AVIATION",
    "TRAVEL", "TRIP", "TOUR", "TOURISM", "RESORT", "INN", "STAY", "LODGE", "GUEST",
    "HOUSE", "HOME",
    // platforms
    "FLIPKART", "AMAZON", "MYNTRA", "AJIO", "MEESHO", "NYKAA", "ZOMATO", "SWIGGY",
    "UBER", "OLA", "NETFLIX", "PRIME", "HOTSTAR", "SPOTIFY", "YOUTUBE", "GOOGLE",
    "APPLE",
];

/// Case-insensitive dictionary of business / brand / institution words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessKeywords {
    words: HashSet<String>,
}

impl BusinessKeywords {
    /// The built-in dictionary
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_BUSINESS_KEYWORDS.iter().copied())
    }

    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Add words; blanks are ignored.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in words {
            let w = w.as_ref().trim();
            if !w.is_empty() {
                self.words.insert(w.to_uppercase());
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for BusinessKeywords {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Entity and category derived from a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub entity: String,
    pub category: String,
}

/// Maps cleaned descriptions to categories using an injected keyword dictionary.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    keywords: BusinessKeywords,
    personal_label: String,
}

impl CategoryResolver {
    pub fn new(keywords: BusinessKeywords) -> Self {
        Self {
            keywords,
            personal_label: PERSONAL.to_string(),
        }
    }

    /// Override the label used for person-to-person transfers.
    pub fn with_personal_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.personal_label = label;
        }
        self
    }

    pub fn keywords(&self) -> &BusinessKeywords {
        &self.keywords
    }

    pub fn personal_label(&self) -> &str {
        &self.personal_label
    }

    /// Derive the counterparty and category for a cleaned description.
    ///
    /// A "paid to" / "received from" description whose counterparty is two or
    /// three words with no business keyword is personal. Anything else is
    /// categorized by the counterparty's first word, title-cased.
    pub fn resolve(&self, description: &str) -> Resolved {
        let entity = extract_entity(description);
        let words: Vec<&str> = entity.split_whitespace().collect();

        let is_transfer = strip_transfer_prefix(description.trim_start()).is_some();
        let name_like = (2..=3).contains(&words.len());
        let has_business_word = words.iter().any(|w| self.keywords.contains(w));

        let category = if is_transfer && name_like && !has_business_word {
            self.personal_label.clone()
        } else if let Some(first) = words.first() {
            title_case(first)
        } else {
            UNCATEGORIZED.to_string()
        };

        Resolved { entity, category }
    }
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new(BusinessKeywords::builtin())
    }
}

/// Counterparty text: the description without a leading "Paid to " /
/// "Received from " (any case), whitespace-normalized.
pub fn extract_entity(description: &str) -> String {
    let normalized = description.split_whitespace().collect::<Vec<_>>().join(" ");
    match strip_transfer_prefix(&normalized) {
        Some(rest) => rest.trim().to_string(),
        None => normalized,
    }
}

fn strip_transfer_prefix(text: &str) -> Option<&str> {
    TRANSFER_PREFIXES.iter().find_map(|prefix| {
        let head = text.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }
        let rest = &text[prefix.len()..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            Some(rest)
        } else {
            None
        }
    })
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(description: &str) -> String {
        CategoryResolver::default().resolve(description).category
    }

    #[test]
    fn test_extract_entity_strips_transfer_prefix() {
        assert_eq!(extract_entity("Paid to  RAKESH   KUMAR"), "RAKESH KUMAR");
        assert_eq!(extract_entity("received from Anam Ansari"), "Anam Ansari");
        assert_eq!(extract_entity("Mobile recharged 8986721145"), "Mobile recharged 8986721145");
        assert_eq!(extract_entity("Paid tomorrow"), "Paid tomorrow");
    }

    #[test]
    fn test_two_or_three_word_names_are_personal() {
        assert_eq!(category("Paid to RAKESH KUMAR"), "Personal");
        assert_eq!(category("Received from ANAM ANSARI"), "Personal");
        assert_eq!(category("Paid to Ahsan Ali Ansari"), "Personal");
    }

    #[test]
    fn test_business_keyword_blocks_personal() {
        assert_eq!(category("Paid to Flipkart Internet"), "Flipkart");
        assert_eq!(category("Paid to Sharma Medicos"), "Sharma");
        // lowercase dictionary entries still match
        assert_eq!(category("Paid to uber india"), "Uber");
    }

    #[test]
    fn test_non_transfer_and_long_names_use_first_word() {
        assert_eq!(category("Mobile recharged 8986721145"), "Mobile");
        assert_eq!(category("Received from Mr Abhishek Kumar Jha"), "Mr");
        assert_eq!(category("Money sent to Suraj Kumar"), "Money");
        assert_eq!(category("Paid to Flipkart"), "Flipkart");
        assert_eq!(category("paid to ZOMATO"), "Zomato");
    }

    #[test]
    fn test_empty_description_is_never_blank() {
        assert_eq!(category(""), UNCATEGORIZED);
        assert_eq!(category("Paid to"), UNCATEGORIZED);
    }

    #[test]
    fn test_injected_dictionary() {
        let resolver = CategoryResolver::new(BusinessKeywords::from_words(["kumar"]));
        assert_eq!(resolver.resolve("Paid to RAKESH KUMAR").category, "Rakesh");
        assert_eq!(resolver.resolve("Paid to Flipkart Internet").category, "Personal");

        let relabeled = CategoryResolver::default().with_personal_label("P2P");
        assert_eq!(relabeled.resolve("Paid to RAKESH KUMAR").category, "P2P");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("FLIPKART"), "Flipkart");
        assert_eq!(title_case("mr."), "Mr.");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }
}
