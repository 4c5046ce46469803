use super::types::{Approval, Note};

/// Text GitLab writes into the system note when a reviewer approves.
pub const APPROVAL_MARKER: &str = "approved this merge request";

/// Scans notes in API order and stops at the first approval note.
pub fn approval_from_notes(notes: &[Note]) -> Approval {
    if notes.iter().any(|note| note.body.contains(APPROVAL_MARKER)) {
        Approval::Approved
    } else {
        Approval::Rejected
    }
}
