use common::{Submission, Verdict};
use tracing::debug;

use crate::config::JudgeConfig;
use crate::error::ClientError;
use crate::source::SnapshotSource;

/// HTTP binding for the judge service.
///
/// The service is an opaque black box: form-encoded POSTs, JSON responses.
pub struct JudgeApi {
    http: reqwest::Client,
    base_url: String,
}

impl JudgeApi {
    pub fn new(config: &JudgeConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current snapshot for one submission.
    pub async fn fetch_submission(&self, submission_id: &str) -> Result<Submission, ClientError> {
        debug!(submission_id, "Fetching submission snapshot");
        self.post_form("/database/query", &[("id", submission_id.to_string())])
            .await
    }

    /// List submissions by position range with optional filters. Used by
    /// history views only, never by the poller.
    pub async fn list_submissions(
        &self,
        query: &HistoryQuery,
    ) -> Result<Vec<Submission>, ClientError> {
        debug!(start = query.start, end = query.end, "Listing submissions");
        self.post_form("/database/list_from_start_to_end", &query.to_form())
            .await
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl SnapshotSource for JudgeApi {
    async fn fetch(&self, submission_id: &str) -> Result<Submission, ClientError> {
        self.fetch_submission(submission_id).await
    }
}

/// Filters for [`JudgeApi::list_submissions`].
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// First list position (inclusive).
    pub start: u64,
    /// Last list position (exclusive).
    pub end: u64,
    /// Keep only submissions with this verdict.
    pub result: Option<Verdict>,
    /// Keep only submissions by this user.
    pub user: Option<String>,
    /// Keep only submissions to these problems.
    pub problems: Vec<String>,
}

impl HistoryQuery {
    pub fn range(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
        ];
        if let Some(result) = self.result {
            form.push(("result", result.as_str().to_string()));
        }
        if let Some(user) = &self.user {
            form.push(("user", user.clone()));
        }
        if !self.problems.is_empty() {
            form.push(("problems", self.problems.join(",")));
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_query_form_minimal() {
        let form = HistoryQuery::range(0, 20).to_form();
        assert_eq!(
            form,
            vec![("start", "0".to_string()), ("end", "20".to_string())]
        );
    }

    #[test]
    fn test_history_query_form_filters() {
        let query = HistoryQuery {
            start: 40,
            end: 60,
            result: Some(Verdict::WrongAnswer),
            user: Some("alice".into()),
            problems: vec!["p1".into(), "p2".into()],
        };
        let form = query.to_form();
        assert!(form.contains(&("result", "WA".to_string())));
        assert!(form.contains(&("user", "alice".to_string())));
        assert!(form.contains(&("problems", "p1,p2".to_string())));
    }
}
