use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RfpId(pub String);

impl std::fmt::Display for RfpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfpStatus {
    Pending,
    Matched,
    Rejected,
}

/// An incoming request for proposal. `status` is written only by the
/// coordinator once the terminal outcome of a run is known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rfp {
    pub id: RfpId,
    pub client: String,
    pub content: String,
    pub submitted_on: NaiveDate,
    pub status: RfpStatus,
}

impl Rfp {
    pub fn new(
        id: impl Into<String>,
        client: impl Into<String>,
        content: impl Into<String>,
        submitted_on: NaiveDate,
    ) -> Self {
        Self {
            id: RfpId(id.into()),
            client: client.into(),
            content: content.into(),
            submitted_on,
            status: RfpStatus::Pending,
        }
    }
}
