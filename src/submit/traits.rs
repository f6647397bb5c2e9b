//! Trait abstraction for the ingestion client to enable mocking in tests

use super::client::SubmitAck;
use super::{SubmissionError, SubmissionPayload};
use async_trait::async_trait;

/// One-shot submission to the ingestion endpoint. No retry and no progress
/// reporting; the app gates duplicate fire through its submitting state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngestApi: Send + Sync {
    /// Perform the single network round-trip for a submission.
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmitAck, SubmissionError>;
}
