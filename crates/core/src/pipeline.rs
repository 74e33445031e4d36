use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEvent, AuditOutcome, AuditSink, PipelineStage};
use crate::catalog::Catalog;
use crate::config::PipelineConfig;
use crate::domain::bid::Bid;
use crate::domain::rfp::{Rfp, RfpStatus};
use crate::errors::DomainError;
use crate::intake::RequirementExtractor;
use crate::matching::{RelevanceScorer, SpecVerifier, DEFAULT_TOP_K};
use crate::pricing::PricingCalculator;

/// Terminal result of one pipeline run. No-match and insufficient stock are
/// ordinary business outcomes, not errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BidOutcome {
    Bid(Bid),
    NoMatch,
    InsufficientStock { requested: u32, available: u32 },
}

impl BidOutcome {
    pub fn bid(&self) -> Option<&Bid> {
        match self {
            Self::Bid(bid) => Some(bid),
            _ => None,
        }
    }
}

/// Sequences intake, ranking, verification, stock check, and pricing into
/// the single end-to-end workflow. One invocation owns its working state;
/// the catalog is shared read-only data.
pub struct PipelineCoordinator {
    extractor: RequirementExtractor,
    scorer: RelevanceScorer,
    verifier: SpecVerifier,
    pricing: PricingCalculator,
    top_k: usize,
}

impl PipelineCoordinator {
    pub fn new(
        extractor: RequirementExtractor,
        scorer: RelevanceScorer,
        verifier: SpecVerifier,
        pricing: PricingCalculator,
        top_k: usize,
    ) -> Self {
        Self { extractor, scorer, verifier, pricing, top_k }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, DomainError> {
        Ok(Self::new(
            RequirementExtractor::new(config.vocabulary.clone(), config.fallback_quantity)?,
            RelevanceScorer::new(config.keyword_weights.clone())?,
            SpecVerifier::new(config.critical_keywords.clone())?,
            PricingCalculator::new(config.discount_tiers.clone())?,
            config.top_k,
        ))
    }

    /// Run the full workflow for one RFP. The RFP's status is written here
    /// and nowhere else, once the terminal outcome is known. Each executed
    /// stage appends one event to `sink`.
    pub fn process<S: AuditSink>(
        &self,
        catalog: &Catalog,
        rfp: &mut Rfp,
        sink: &S,
    ) -> Result<BidOutcome, DomainError> {
        if rfp.content.trim().is_empty() {
            return Err(DomainError::EmptyRequestText(rfp.id.clone()));
        }
        if catalog.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }

        let requirement = self.extractor.extract(&rfp.content);
        sink.emit(
            AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Intake,
                "intake.requirements_extracted",
                AuditOutcome::Success,
            )
            .with_metadata("quantity", requirement.quantity.to_string())
            .with_metadata("keywords", requirement.keywords.join(",")),
        );

        let candidates = self.scorer.rank(&rfp.content, catalog, self.top_k);
        sink.emit(
            AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Matching,
                "matching.candidates_ranked",
                AuditOutcome::Success,
            )
            .with_metadata("candidates", candidates.len().to_string()),
        );

        let Some(top) = candidates.first() else {
            rfp.status = RfpStatus::Rejected;
            sink.emit(AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Coordinator,
                "coordinator.no_match",
                AuditOutcome::Rejected,
            ));
            return Ok(BidOutcome::NoMatch);
        };

        // Advisory only: recorded in the trail, never branches.
        let verification = self.verifier.verify(&top.product, &requirement.raw_text);
        sink.emit(
            AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Verification,
                "verification.specs_checked",
                if verification.passed() { AuditOutcome::Success } else { AuditOutcome::Rejected },
            )
            .with_metadata("sku", top.product.sku.to_string())
            .with_metadata("matched_keywords", verification.matched_keywords.join(",")),
        );

        let in_stock = self.pricing.has_stock(&top.product, requirement.quantity);
        sink.emit(
            AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Pricing,
                "pricing.stock_checked",
                if in_stock { AuditOutcome::Success } else { AuditOutcome::Rejected },
            )
            .with_metadata("requested", requirement.quantity.to_string())
            .with_metadata("available", top.product.stock.to_string()),
        );
        if !in_stock {
            rfp.status = RfpStatus::Rejected;
            sink.emit(AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Coordinator,
                "coordinator.insufficient_stock",
                AuditOutcome::Rejected,
            ));
            return Ok(BidOutcome::InsufficientStock {
                requested: requirement.quantity,
                available: top.product.stock,
            });
        }

        let pricing = self.pricing.price(&top.product, requirement.quantity);
        sink.emit(
            AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Pricing,
                "pricing.breakdown_calculated",
                AuditOutcome::Success,
            )
            .with_metadata("total", pricing.total.to_string())
            .with_metadata("discount_fraction", pricing.discount_fraction.to_string()),
        );

        rfp.status = RfpStatus::Matched;
        let bid = Bid {
            rfp: rfp.clone(),
            product: top.product.clone(),
            quantity: requirement.quantity,
            pricing,
            confidence: top.confidence,
            generated_at: Utc::now(),
        };
        sink.emit(
            AuditEvent::new(
                Some(rfp.id.clone()),
                PipelineStage::Coordinator,
                "coordinator.bid_generated",
                AuditOutcome::Success,
            )
            .with_metadata("sku", bid.product.sku.to_string())
            .with_metadata("confidence", bid.confidence.to_string()),
        );

        Ok(BidOutcome::Bid(bid))
    }
}

impl Default for PipelineCoordinator {
    fn default() -> Self {
        Self::new(
            RequirementExtractor::default(),
            RelevanceScorer::default(),
            SpecVerifier::default(),
            PricingCalculator::default(),
            DEFAULT_TOP_K,
        )
    }
}
