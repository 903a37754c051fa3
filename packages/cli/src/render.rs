use common::{ScoreTier, Submission, SubmissionView, Verdict};
use console::{Style, style};

fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::Accepted => Style::new().green().bold(),
        Verdict::InQueue => Style::new().yellow(),
        Verdict::CompilationError => Style::new().yellow().bold(),
        _ => Style::new().red().bold(),
    }
}

fn tier_style(tier: ScoreTier) -> Style {
    match tier {
        ScoreTier::Full => Style::new().green().bold(),
        ScoreTier::High => Style::new().cyan(),
        ScoreTier::Partial => Style::new().yellow(),
        ScoreTier::Low | ScoreTier::Zero => Style::new().red(),
    }
}

/// One-line status while a submission is still queued.
pub fn progress_line(submission: &Submission) -> String {
    let done = submission.test_cases.len();
    match submission.test_count {
        Some(total) => format!("judging... {done}/{total} test cases done"),
        None => format!("judging... {done} test cases done"),
    }
}

/// Full report for a snapshot: verdict, pass counts, abort/hidden notes,
/// score, per-case details.
pub fn print_submission(submission: &Submission) {
    let view = SubmissionView::of(submission);

    let verdict = verdict_style(view.result).apply_to(view.result.as_str());
    if submission.id.is_empty() {
        println!("{verdict}");
    } else {
        println!("{} {verdict}", style(&submission.id).dim());
    }

    println!("  passed {}/{} test cases", view.passed_count, view.total_count);
    if view.aborted_early {
        println!(
            "  judging stopped after a failing case; {} skipped",
            view.skipped_count
        );
    } else if view.hidden_tests && view.result.is_final() {
        println!("  some test cases are hidden by the problem setter");
    }

    if let Some(score) = &view.score {
        let line = format!(
            "score {} ({:.0}%)",
            score.total_score, score.percent
        );
        println!("  {}", tier_style(score.tier).apply_to(line));
    }

    for (index, tc) in submission.test_cases.iter().enumerate() {
        let verdict = verdict_style(tc.result).apply_to(tc.result.as_str());
        let mut line = format!("  #{:<3} {verdict}", index + 1);
        if let Some(ms) = tc.time_used {
            line.push_str(&format!("  {ms} ms"));
        }
        if let Some(bytes) = tc.memory_used {
            line.push_str(&format!("  {}", human_bytes(bytes)));
        }
        if let Some(points) = tc.score {
            line.push_str(&format!("  {points} pts"));
        }
        println!("{line}");
    }

    if let Some(output) = &submission.error_output {
        println!("  compiler output:");
        for line in output.lines() {
            println!("    {line}");
        }
    }
}

/// One-line summary for history listings.
pub fn history_line(submission: &Submission) -> String {
    let view = SubmissionView::of(submission);
    let verdict = verdict_style(view.result).apply_to(format!("{:<3}", view.result.as_str()));
    let language = submission.language.as_deref().unwrap_or("-");
    let when = submission
        .timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "{:<24} {verdict} {:<8} {:>3}/{:<3} {when}",
        submission.id, language, view.passed_count, view.total_count
    )
}

fn human_bytes(bytes: u64) -> String {
    if bytes >= 1 << 20 {
        format!("{:.1} MiB", bytes as f64 / (1 << 20) as f64)
    } else if bytes >= 1 << 10 {
        format!("{:.1} KiB", bytes as f64 / (1 << 10) as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(512), "512 B");
        assert_eq!(human_bytes(2048), "2.0 KiB");
        assert_eq!(human_bytes(3 << 20), "3.0 MiB");
    }

    #[test]
    fn test_progress_line_with_and_without_total() {
        let mut submission: Submission = serde_json::from_str(
            r#"{"result": "IQ", "test_cases": [{"result": "AC"}], "test_count": 4}"#,
        )
        .unwrap();
        assert_eq!(progress_line(&submission), "judging... 1/4 test cases done");

        submission.test_count = None;
        assert_eq!(progress_line(&submission), "judging... 1 test cases done");
    }
}
