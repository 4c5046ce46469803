pub mod gitlab;

pub use gitlab::{EnrichOptions, GitLabProvider};
