use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::verdict::{JudgeMode, Verdict};

/// One judging snapshot for a submission, as returned by the judge service.
///
/// The client never creates or mutates these; it observes successive
/// snapshots until `result` turns terminal. While `result` is `IQ` the
/// `test_cases` list grows monotonically between snapshots and is never
/// longer than `test_count`.
///
/// Every field except `result` may be absent on the wire; absent optionals
/// decode to zero/empty rather than failing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    /// Opaque identifier assigned by the judge service.
    #[serde(default)]
    pub id: String,
    /// Current overall verdict. `IQ` means judging is still in progress.
    #[serde(default)]
    pub result: Verdict,
    /// Accept/reject or scoring judging.
    #[serde(rename = "type", default)]
    pub mode: JudgeMode,
    /// Results for the test cases completed so far, in execution order.
    #[serde(default)]
    pub test_cases: Vec<TestCaseResult>,
    /// Total number of test cases the submission would run if none aborted
    /// early. Fixed at submission creation; may exceed `test_cases.len()`
    /// when judging aborted after a failure or when the problem setter hides
    /// trailing cases.
    #[serde(default)]
    pub test_count: Option<u32>,
    /// Cumulative achieved score (scoring mode only).
    #[serde(default)]
    pub score: Option<i64>,
    /// Maximum possible score (scoring mode only).
    #[serde(default)]
    pub score_config: Option<i64>,
    /// Submitted source code.
    #[serde(default)]
    pub source: Option<String>,
    /// Programming language of the submission.
    #[serde(default)]
    pub language: Option<String>,
    /// When the submission was created.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Compiler output (only when `result` is `CE`).
    #[serde(default)]
    pub error_output: Option<String>,
}

impl Submission {
    /// Returns true if judging is complete and this snapshot is immutable.
    pub fn is_final(&self) -> bool {
        self.result.is_final()
    }
}

/// Result of a single executed test case.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// Verdict for this test case.
    #[serde(default)]
    pub result: Verdict,
    /// Time used in milliseconds.
    #[serde(default)]
    pub time_used: Option<u64>,
    /// Memory used in bytes.
    #[serde(default)]
    pub memory_used: Option<u64>,
    /// Points earned for this test case (scoring mode only).
    #[serde(default)]
    pub score: Option<i64>,
    /// Maximum points for this test case (scoring mode only).
    #[serde(default)]
    pub score_config: Option<i64>,
}
