pub mod submission;
pub mod verdict;
pub mod view;

pub use submission::{Submission, TestCaseResult};
pub use verdict::{JudgeMode, Verdict};
pub use view::{ScoreSummary, ScoreTier, SubmissionView};
