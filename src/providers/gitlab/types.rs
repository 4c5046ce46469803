use serde::Deserialize;

/// A merge request authored by the token owner.
///
/// Decoded from `GET /merge_requests`. `approval` is not part of the API
/// payload; it is filled in by the task that enriches this record.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    /// Web link shown in the report
    #[serde(rename = "web_url")]
    pub url: String,
    /// Title, recolored by state in all-states mode
    pub title: String,
    /// Per-project sequence number, used to look up notes
    pub iid: u64,
    /// Owning project
    pub project_id: u64,
    pub state: MergeRequestState,
    /// ISO-8601 creation timestamp, only used for ordering
    pub created_at: String,
    /// Review status; `None` until enriched or when the notes fetch failed
    #[serde(skip)]
    pub approval: Option<Approval>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    Opened,
    Closed,
    Merged,
    Locked,
    #[serde(other)]
    Other,
}

/// A discussion note on a merge request. Only the body is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    Approved,
    Rejected,
}
