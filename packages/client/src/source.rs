use async_trait::async_trait;
use common::Submission;

use crate::error::ClientError;

/// Anything that can produce the current judging snapshot for a submission.
///
/// The HTTP binding implements this; tests substitute scripted sources.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self, submission_id: &str) -> Result<Submission, ClientError>;
}
