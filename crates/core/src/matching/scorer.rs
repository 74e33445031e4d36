//! Relevance scoring for catalog items against RFP text.
//!
//! Deliberately a deterministic, explainable heuristic rather than an
//! embedding similarity: weighted keyword overlap plus a flat word-overlap
//! bonus. A real semantic backend can replace this behind the same interface
//! as long as zero scores stay excluded, confidence stays capped at 95, and
//! ordering stays stable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::errors::DomainError;

pub const DEFAULT_TOP_K: usize = 3;

/// Confidence percentages are display values, never probabilities; capping
/// below 100 keeps them honest about the heuristic behind them.
const MAX_CONFIDENCE: u64 = 95;

/// Domain keyword -> weight. Higher weight = more domain-specific term.
pub fn default_keyword_weights() -> Vec<(String, f64)> {
    [
        ("exterior", 2.5),
        ("interior", 2.5),
        ("marine", 3.0),
        ("automotive", 3.0),
        ("industrial", 2.0),
        ("gloss", 2.0),
        ("matte", 2.0),
        ("epoxy", 3.0),
        ("coating", 1.5),
        ("paint", 1.5),
        ("solvent", 2.5),
        ("thinner", 2.5),
        ("waterproof", 2.5),
        ("resistant", 2.0),
        ("fire", 3.0),
        ("flame", 3.0),
        ("uv", 2.0),
        ("saltwater", 2.5),
        ("chemical", 2.0),
        ("corrosion", 2.5),
        ("fast-dry", 2.0),
        ("quick-dry", 2.0),
        ("heavy-duty", 2.0),
        ("warehouse", 2.0),
        ("floor", 2.5),
        ("ship", 2.5),
        ("hull", 2.5),
        ("coastal", 2.0),
        ("weather", 2.0),
        ("high-temperature", 2.5),
    ]
    .into_iter()
    .map(|(keyword, weight)| (keyword.to_owned(), weight))
    .collect()
}

/// A catalog item that scored above zero against a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub product: Product,
    pub score: f64,
    pub confidence: u8,
}

#[derive(Clone, Debug)]
pub struct RelevanceScorer {
    keyword_weights: Vec<(String, f64)>,
}

impl RelevanceScorer {
    pub fn new(keyword_weights: Vec<(String, f64)>) -> Result<Self, DomainError> {
        if keyword_weights.is_empty() {
            return Err(DomainError::InvariantViolation(
                "scorer keyword weights must not be empty".to_owned(),
            ));
        }
        for (keyword, weight) in &keyword_weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(DomainError::InvariantViolation(format!(
                    "keyword `{keyword}` has a non-positive weight"
                )));
            }
        }
        Ok(Self { keyword_weights })
    }

    /// Raw relevance of one item: weighted keyword overlap (weight x 10 per
    /// keyword present in both texts) plus 3 per shared word.
    pub fn score(&self, query: &str, product: &Product) -> f64 {
        let query_lower = query.to_lowercase();
        let product_text = product.match_text();

        let mut score = 0.0;
        for (keyword, weight) in &self.keyword_weights {
            if query_lower.contains(keyword.as_str()) && product_text.contains(keyword.as_str()) {
                score += weight * 10.0;
            }
        }

        let query_words = tokenize(&query_lower);
        let product_words = tokenize(&product_text);
        let common = query_words.intersection(&product_words).count();
        score += common as f64 * 3.0;

        score
    }

    /// Rank the catalog against a query. Zero-score items never enter the
    /// list; ties keep catalog order; at most `top_k` entries come back.
    pub fn rank(&self, query: &str, catalog: &Catalog, top_k: usize) -> Vec<ScoredCandidate> {
        let mut candidates: Vec<ScoredCandidate> = catalog
            .products()
            .iter()
            .filter_map(|product| {
                let score = self.score(query, product);
                (score > 0.0).then(|| ScoredCandidate {
                    product: product.clone(),
                    score,
                    confidence: confidence_for(score),
                })
            })
            .collect();

        // sort_by is stable, so equal scores preserve catalog order.
        candidates.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(top_k);
        candidates
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(default_keyword_weights()).expect("default keyword weights are valid")
    }
}

fn confidence_for(score: f64) -> u8 {
    (score.floor() as u64).min(MAX_CONFIDENCE) as u8
}

/// Word = maximal run of alphanumeric or underscore characters.
fn tokenize(text: &str) -> HashSet<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .collect()
}
