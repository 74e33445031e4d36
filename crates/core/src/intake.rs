use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Quantity assumed when an RFP never states one.
pub const DEFAULT_FALLBACK_QUANTITY: u32 = 500;

/// Domain terms recognized during intake, in scan order. Matches are emitted
/// in this order, not in text order.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "exterior",
    "interior",
    "marine",
    "automotive",
    "industrial",
    "gloss",
    "matte",
    "coating",
    "paint",
    "resistant",
    "waterproof",
    "fire",
    "epoxy",
    "warehouse",
    "floor",
    "uv",
    "weather",
    "fast-dry",
    "chemical",
    "corrosion",
    "saltwater",
];

/// Structured requirements pulled out of free-form RFP text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRequirement {
    pub quantity: u32,
    pub keywords: Vec<String>,
    pub raw_text: String,
}

/// Parses RFP text into an `ExtractedRequirement`: the first quantity stated
/// in liters, plus vocabulary keywords found by substring containment.
#[derive(Clone, Debug)]
pub struct RequirementExtractor {
    vocabulary: Vec<String>,
    fallback_quantity: u32,
    quantity_pattern: Regex,
}

impl RequirementExtractor {
    pub fn new(
        vocabulary: Vec<String>,
        fallback_quantity: u32,
    ) -> Result<Self, DomainError> {
        if vocabulary.is_empty() {
            return Err(DomainError::InvariantViolation(
                "intake vocabulary must not be empty".to_owned(),
            ));
        }
        if fallback_quantity == 0 {
            return Err(DomainError::InvariantViolation(
                "fallback quantity must be positive".to_owned(),
            ));
        }

        // "500 liters", "1200L", "300 litres"; the unit may be abbreviated
        // and separated from the number by whitespace.
        let quantity_pattern = Regex::new(r"(?i)(\d+)\s*(?:liters?|litres?|l)\b")
            .map_err(|error| DomainError::InvariantViolation(error.to_string()))?;

        Ok(Self { vocabulary, fallback_quantity, quantity_pattern })
    }

    pub fn extract(&self, text: &str) -> ExtractedRequirement {
        ExtractedRequirement {
            quantity: self.extract_quantity(text),
            keywords: self.extract_keywords(text),
            raw_text: text.to_owned(),
        }
    }

    /// First liter-quantity mention wins; later mentions are never aggregated.
    /// Digit runs too large for `u32` fall through to the fallback.
    fn extract_quantity(&self, text: &str) -> u32 {
        self.quantity_pattern
            .captures(text)
            .and_then(|captures| captures[1].parse::<u32>().ok())
            .unwrap_or(self.fallback_quantity)
    }

    fn extract_keywords(&self, text: &str) -> Vec<String> {
        let text_lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|term| text_lower.contains(term.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for RequirementExtractor {
    fn default() -> Self {
        Self::new(
            DEFAULT_VOCABULARY.iter().map(|term| (*term).to_owned()).collect(),
            DEFAULT_FALLBACK_QUANTITY,
        )
        .expect("default extractor configuration is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::{RequirementExtractor, DEFAULT_FALLBACK_QUANTITY};

    #[test]
    fn extracts_written_out_liter_quantities() {
        let extractor = RequirementExtractor::default();
        assert_eq!(extractor.extract("We require 500 liters of paint").quantity, 500);
        assert_eq!(extractor.extract("approx. 300 litres on site").quantity, 300);
    }

    #[test]
    fn extracts_abbreviated_quantities_without_spacing() {
        let extractor = RequirementExtractor::default();
        assert_eq!(extractor.extract("Need 1200L of coating").quantity, 1200);
        assert_eq!(extractor.extract("need 750 L delivered").quantity, 750);
    }

    #[test]
    fn falls_back_when_no_quantity_pattern_exists() {
        let extractor = RequirementExtractor::default();
        let extracted = extractor.extract("Paint for a coastal warehouse, ASAP");
        assert_eq!(extracted.quantity, DEFAULT_FALLBACK_QUANTITY);
    }

    #[test]
    fn first_quantity_mention_wins() {
        let extractor = RequirementExtractor::default();
        assert_eq!(extractor.extract("600 liters now, 400 liters later").quantity, 600);
    }

    #[test]
    fn milliliter_mentions_do_not_match() {
        let extractor = RequirementExtractor::default();
        assert_eq!(
            extractor.extract("sample of 100ml for testing").quantity,
            DEFAULT_FALLBACK_QUANTITY
        );
    }

    #[test]
    fn overflowing_digit_runs_use_the_fallback() {
        let extractor = RequirementExtractor::default();
        assert_eq!(
            extractor.extract("99999999999999999999 liters").quantity,
            DEFAULT_FALLBACK_QUANTITY
        );
    }

    #[test]
    fn keywords_come_back_in_vocabulary_order() {
        let extractor = RequirementExtractor::default();
        let extracted = extractor
            .extract("Saltwater-resistant marine coating, must be waterproof");
        assert_eq!(extracted.keywords, vec!["marine", "coating", "resistant", "waterproof", "saltwater"]);
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let extractor = RequirementExtractor::default();
        let extracted = extractor.extract("EXTERIOR GLOSS PAINT");
        assert_eq!(extracted.keywords, vec!["exterior", "gloss", "paint"]);
    }
}
