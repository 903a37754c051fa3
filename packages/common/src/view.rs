use serde::Serialize;

use crate::submission::Submission;
use crate::verdict::{JudgeMode, Verdict};

/// Display-ready facts derived from a [`Submission`] snapshot.
///
/// Aggregation never mutates the snapshot and never fails: absent optional
/// fields are treated as zero/empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubmissionView {
    /// Overall verdict of the snapshot.
    pub result: Verdict,
    /// Number of completed test cases with verdict `AC`.
    pub passed_count: u32,
    /// Total test cases the submission would run, falling back to the number
    /// of visible cases when the service omits `test_count`.
    pub total_count: u32,
    /// True only when every test case passed and there was at least one.
    pub all_passed: bool,
    /// Judging stopped after a failing case (fail-fast policy), leaving the
    /// remaining cases unexecuted.
    pub aborted_early: bool,
    /// Test cases skipped by an early abort. Zero unless `aborted_early`.
    pub skipped_count: u32,
    /// Some trailing cases are not visible because the problem setter
    /// restricts visibility. Never true together with `aborted_early`.
    pub hidden_tests: bool,
    /// Score summary, present only in scoring mode.
    pub score: Option<ScoreSummary>,
}

/// Scoring-mode totals and the UI color tier.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Sum of points earned on passed test cases.
    pub total_score: i64,
    /// Sum of the per-case maximums over all visible cases.
    pub total_possible_score: i64,
    /// `total_score` as a percentage of the submission-level maximum.
    /// Zero when the maximum is absent or zero.
    pub percent: f64,
    /// Color tier for display. Carries no pass/fail semantics.
    pub tier: ScoreTier,
}

/// UI color tiers for a score percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScoreTier {
    /// Exactly 100%.
    Full,
    /// Exactly 0%.
    Zero,
    /// At least 80%.
    High,
    /// At least 50%.
    Partial,
    /// Below 50%.
    Low,
}

impl ScoreTier {
    pub fn of(percent: f64) -> Self {
        if percent >= 100.0 {
            Self::Full
        } else if percent <= 0.0 {
            Self::Zero
        } else if percent >= 80.0 {
            Self::High
        } else if percent >= 50.0 {
            Self::Partial
        } else {
            Self::Low
        }
    }
}

impl SubmissionView {
    /// Aggregate a snapshot into display-ready facts.
    pub fn of(submission: &Submission) -> Self {
        let visible_count = submission.test_cases.len() as u32;
        let passed_count = submission
            .test_cases
            .iter()
            .filter(|tc| tc.result.is_accepted())
            .count() as u32;
        let total_count = submission.test_count.unwrap_or(visible_count);

        // Never vacuously true for zero tests.
        let all_passed = total_count > 0 && passed_count == total_count;

        // A short visible list on a failed terminal snapshot means the judge
        // stopped after the failing case. A short list on anything else
        // (still queued, accepted, or compile error) means the setter hides
        // trailing cases.
        let aborted_early = visible_count < total_count
            && !all_passed
            && submission.result.is_final()
            && submission.result != Verdict::CompilationError;
        let skipped_count = if aborted_early {
            total_count - visible_count
        } else {
            0
        };
        let hidden_tests = visible_count < total_count && !aborted_early;

        let score = match submission.mode {
            JudgeMode::AcceptReject => None,
            JudgeMode::Scoring => Some(Self::score_summary(submission)),
        };

        Self {
            result: submission.result,
            passed_count,
            total_count,
            all_passed,
            aborted_early,
            skipped_count,
            hidden_tests,
            score,
        }
    }

    fn score_summary(submission: &Submission) -> ScoreSummary {
        let total_score: i64 = submission
            .test_cases
            .iter()
            .filter(|tc| tc.result.is_accepted())
            .map(|tc| tc.score.unwrap_or(0))
            .sum();
        let total_possible_score: i64 = submission
            .test_cases
            .iter()
            .map(|tc| tc.score_config.unwrap_or(0))
            .sum();

        let max = submission.score_config.unwrap_or(0);
        let percent = if max > 0 {
            total_score as f64 / max as f64 * 100.0
        } else {
            0.0
        };

        ScoreSummary {
            total_score,
            total_possible_score,
            percent,
            tier: ScoreTier::of(percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::TestCaseResult;

    fn case(result: Verdict) -> TestCaseResult {
        TestCaseResult {
            result,
            time_used: Some(10),
            memory_used: Some(1 << 20),
            score: None,
            score_config: None,
        }
    }

    fn scored_case(result: Verdict, score: i64, max: i64) -> TestCaseResult {
        TestCaseResult {
            result,
            time_used: Some(10),
            memory_used: Some(1 << 20),
            score: Some(score),
            score_config: Some(max),
        }
    }

    fn snapshot(result: Verdict, test_cases: Vec<TestCaseResult>, test_count: u32) -> Submission {
        Submission {
            id: "sub123".into(),
            result,
            mode: JudgeMode::AcceptReject,
            test_cases,
            test_count: Some(test_count),
            score: None,
            score_config: None,
            source: None,
            language: None,
            timestamp: None,
            error_output: None,
        }
    }

    #[test]
    fn test_all_passed() {
        let submission = snapshot(
            Verdict::Accepted,
            vec![case(Verdict::Accepted), case(Verdict::Accepted)],
            2,
        );
        let view = SubmissionView::of(&submission);
        assert_eq!(view.passed_count, 2);
        assert_eq!(view.total_count, 2);
        assert!(view.all_passed);
        assert!(!view.aborted_early);
        assert!(!view.hidden_tests);
        assert_eq!(view.score, None);
    }

    #[test]
    fn test_zero_tests_never_vacuously_passed() {
        let view = SubmissionView::of(&snapshot(Verdict::Accepted, vec![], 0));
        assert!(!view.all_passed);
    }

    #[test]
    fn test_aborted_early_vs_hidden() {
        // Terminal failure with 4 of 10 cases visible: judging aborted.
        let failed = snapshot(
            Verdict::WrongAnswer,
            vec![
                case(Verdict::Accepted),
                case(Verdict::Accepted),
                case(Verdict::Accepted),
                case(Verdict::WrongAnswer),
            ],
            10,
        );
        let view = SubmissionView::of(&failed);
        assert!(view.aborted_early);
        assert_eq!(view.skipped_count, 6);
        assert!(!view.hidden_tests);

        // Same shape while still in queue: nothing aborted yet.
        let queued = snapshot(
            Verdict::InQueue,
            vec![case(Verdict::Accepted), case(Verdict::Accepted)],
            10,
        );
        let view = SubmissionView::of(&queued);
        assert!(!view.aborted_early);
        assert_eq!(view.skipped_count, 0);
        assert!(view.hidden_tests);
    }

    #[test]
    fn test_compile_error_is_not_aborted_early() {
        let view = SubmissionView::of(&snapshot(Verdict::CompilationError, vec![], 10));
        assert!(!view.aborted_early);
        assert!(view.hidden_tests);
    }

    #[test]
    fn test_all_passed_requires_full_count() {
        // 4 passing cases out of 10 never count as accepted, whatever the
        // overall verdict claims.
        let submission = snapshot(
            Verdict::Accepted,
            vec![
                case(Verdict::Accepted),
                case(Verdict::Accepted),
                case(Verdict::Accepted),
                case(Verdict::Accepted),
            ],
            10,
        );
        let view = SubmissionView::of(&submission);
        assert_eq!(view.passed_count, 4);
        assert!(!view.all_passed);
    }

    #[test]
    fn test_total_count_falls_back_to_visible() {
        let mut submission = snapshot(
            Verdict::Accepted,
            vec![case(Verdict::Accepted), case(Verdict::Accepted)],
            0,
        );
        submission.test_count = None;
        let view = SubmissionView::of(&submission);
        assert_eq!(view.total_count, 2);
        assert!(view.all_passed);
    }

    #[test]
    fn test_scoring_summary() {
        let mut submission = snapshot(
            Verdict::WrongAnswer,
            vec![
                scored_case(Verdict::Accepted, 40, 40),
                scored_case(Verdict::WrongAnswer, 0, 60),
            ],
            2,
        );
        submission.mode = JudgeMode::Scoring;
        submission.score_config = Some(100);
        let view = SubmissionView::of(&submission);
        let score = view.score.unwrap();
        assert_eq!(score.total_score, 40);
        assert_eq!(score.total_possible_score, 100);
        assert!((score.percent - 40.0).abs() < f64::EPSILON);
        assert_eq!(score.tier, ScoreTier::Low);
    }

    #[test]
    fn test_zero_score_config_guards_division() {
        let mut submission = snapshot(Verdict::WrongAnswer, vec![], 0);
        submission.mode = JudgeMode::Scoring;
        submission.score_config = Some(0);
        let score = SubmissionView::of(&submission).score.unwrap();
        assert_eq!(score.percent, 0.0);
        assert_eq!(score.tier, ScoreTier::Zero);
    }

    #[test]
    fn test_score_tiers() {
        assert_eq!(ScoreTier::of(100.0), ScoreTier::Full);
        assert_eq!(ScoreTier::of(0.0), ScoreTier::Zero);
        assert_eq!(ScoreTier::of(93.5), ScoreTier::High);
        assert_eq!(ScoreTier::of(80.0), ScoreTier::High);
        assert_eq!(ScoreTier::of(62.0), ScoreTier::Partial);
        assert_eq!(ScoreTier::of(49.9), ScoreTier::Low);
    }

    #[test]
    fn test_aggregation_is_pure() {
        let submission = snapshot(
            Verdict::WrongAnswer,
            vec![case(Verdict::Accepted), case(Verdict::WrongAnswer)],
            10,
        );
        let before = format!("{submission:?}");
        let first = SubmissionView::of(&submission);
        let second = SubmissionView::of(&submission);
        assert_eq!(first, second);
        assert_eq!(format!("{submission:?}"), before);
    }
}
