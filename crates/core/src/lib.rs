pub mod audit;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod intake;
pub mod matching;
pub mod pipeline;
pub mod pricing;

pub use audit::{AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink, PipelineStage};
pub use catalog::Catalog;
pub use domain::bid::Bid;
pub use domain::product::{Product, Sku};
pub use domain::rfp::{Rfp, RfpId, RfpStatus};
pub use errors::{ApplicationError, DomainError};
pub use intake::{ExtractedRequirement, RequirementExtractor};
pub use matching::{RelevanceScorer, ScoredCandidate, SpecVerification, SpecVerifier};
pub use pipeline::{BidOutcome, PipelineCoordinator};
pub use pricing::{DiscountTier, PricingBreakdown, PricingCalculator};
