pub mod scorer;
pub mod verify;

pub use scorer::{RelevanceScorer, ScoredCandidate, DEFAULT_TOP_K};
pub use verify::{SpecVerification, SpecVerifier};
