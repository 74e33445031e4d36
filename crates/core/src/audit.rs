use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rfp::RfpId;

/// Which pipeline component produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Intake,
    Matching,
    Verification,
    Pricing,
    Coordinator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    Success,
    Rejected,
}

/// One timestamped, stage-tagged entry in the pipeline's log trail. Callers
/// may render these but must not parse them for control flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: String,
    pub rfp_id: Option<RfpId>,
    pub stage: PipelineStage,
    pub event_type: String,
    pub outcome: AuditOutcome,
    pub metadata: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        rfp_id: Option<RfpId>,
        stage: PipelineStage,
        event_type: impl Into<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            rfp_id,
            stage,
            event_type: event_type.into(),
            outcome,
            metadata: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Append-only sink the coordinator writes its trail into. Components hold no
/// log state of their own.
pub trait AuditSink {
    fn emit(&self, event: AuditEvent);
}

#[derive(Clone, Default)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl InMemoryAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, event: AuditEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::audit::{AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink, PipelineStage};
    use crate::domain::rfp::RfpId;

    #[test]
    fn in_memory_sink_records_stage_tagged_events_in_order() {
        let sink = InMemoryAuditSink::default();
        sink.emit(
            AuditEvent::new(
                Some(RfpId("RFP-2024-001".to_owned())),
                PipelineStage::Intake,
                "intake.requirements_extracted",
                AuditOutcome::Success,
            )
            .with_metadata("quantity", "500"),
        );
        sink.emit(AuditEvent::new(
            Some(RfpId("RFP-2024-001".to_owned())),
            PipelineStage::Matching,
            "matching.candidates_ranked",
            AuditOutcome::Success,
        ));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].stage, PipelineStage::Intake);
        assert_eq!(events[0].metadata.get("quantity").map(String::as_str), Some("500"));
        assert_eq!(events[1].event_type, "matching.candidates_ranked");
    }
}
