mod approval;
mod client;
mod provider;
mod types;

pub use provider::{EnrichOptions, GitLabProvider};
pub use types::{Approval, MergeRequest, MergeRequestState};
