use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sku(pub String);

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog item. Immutable for the duration of a pipeline run; relevance
/// scores are carried on `ScoredCandidate`, never attached here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub specs: String,
    pub unit_price: Decimal,
    pub stock: u32,
}

impl Product {
    /// Lowercased name + specs, the text the scorer matches against.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.name, self.specs).to_lowercase()
    }
}
