use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::StageError,
    model::{CreatedIssue, IssueRequest},
};

pub mod github;

pub use github::GitHubIssues;

#[async_trait]
pub trait IssuePublisher: Send + Sync + Debug {
    /// File one issue. Not idempotent: every call creates a new issue.
    async fn publish(&self, issue: &IssueRequest) -> Result<CreatedIssue, StageError>;
}
