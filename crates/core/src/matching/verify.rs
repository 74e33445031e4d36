use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::errors::DomainError;

/// Critical-requirement keywords checked for presence in both the RFP text
/// and a candidate's specification text.
pub const DEFAULT_CRITICAL_KEYWORDS: &[&str] = &["resistant", "grade", "proof", "protection"];

/// Result of checking a candidate's specs against the RFP text. Advisory in
/// the current workflow: the coordinator records it but does not branch on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecVerification {
    pub matched_keywords: Vec<String>,
}

impl SpecVerification {
    pub fn passed(&self) -> bool {
        !self.matched_keywords.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct SpecVerifier {
    critical_keywords: Vec<String>,
}

impl SpecVerifier {
    pub fn new(critical_keywords: Vec<String>) -> Result<Self, DomainError> {
        if critical_keywords.is_empty() {
            return Err(DomainError::InvariantViolation(
                "verifier critical keywords must not be empty".to_owned(),
            ));
        }
        Ok(Self { critical_keywords })
    }

    pub fn verify(&self, product: &Product, requirement_text: &str) -> SpecVerification {
        let requirement_lower = requirement_text.to_lowercase();
        let specs_lower = product.specs.to_lowercase();

        let matched_keywords = self
            .critical_keywords
            .iter()
            .filter(|keyword| {
                requirement_lower.contains(keyword.as_str())
                    && specs_lower.contains(keyword.as_str())
            })
            .cloned()
            .collect();

        SpecVerification { matched_keywords }
    }
}

impl Default for SpecVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_KEYWORDS.iter().map(|kw| (*kw).to_owned()).collect())
            .expect("default critical keywords are valid")
    }
}
