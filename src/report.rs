//! Human-readable rendering of sweep and suite results.
//!
//! Infrastructure errors render apart from classification mismatches so a
//! misconfigured corpus or registry is not mistaken for a parser regression.

use crate::classify::Verdict;
use crate::harness::{SuiteReport, SweepOutcome, SweepReport};

pub fn render_suite(suite: &SuiteReport) -> String {
    let mut out = String::new();
    for outcome in &suite.sweeps {
        match outcome {
            SweepOutcome::Completed(report) => render_sweep_into(&mut out, report),
            SweepOutcome::Infrastructure { sweep, error } => {
                push_line(&mut out, &format!("sweep {sweep}: ERROR {error}"));
            }
        }
    }
    push_line(
        &mut out,
        &format!("suite: {}", if suite.passed { "PASS" } else { "FAIL" }),
    );
    out
}

pub fn render_sweep(report: &SweepReport) -> String {
    let mut out = String::new();
    render_sweep_into(&mut out, report);
    out
}

fn render_sweep_into(out: &mut String, report: &SweepReport) {
    let total = report.records.len();
    if report.passed {
        push_line(out, &format!("sweep {}: PASS ({total} files)", report.sweep));
        return;
    }

    let mismatched = report.failures().count();
    push_line(
        out,
        &format!(
            "sweep {}: FAIL ({mismatched} of {total} files mismatched)",
            report.sweep
        ),
    );
    for record in report.failures() {
        let reason = match &record.verdict {
            Verdict::Fail { reason } => reason.as_str(),
            Verdict::Pass => continue,
        };
        push_line(
            out,
            &format!(
                "  {}: {}, observed {} ({reason})",
                record.file, record.expectation, record.outcome
            ),
        );
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Expectation, ParseOutcome, Verdict};
    use crate::corpus::Category;
    use crate::harness::{FileRecord, Sweep};

    fn record(file: &str, outcome: ParseOutcome, verdict: Verdict) -> FileRecord {
        FileRecord {
            file: file.to_string(),
            category: Category::Bad,
            expectation: Expectation::Failure,
            outcome,
            verdict,
        }
    }

    #[test]
    fn passing_sweep_renders_one_line() {
        let report = SweepReport {
            sweep: Sweep::DefaultGood,
            passed: true,
            records: Vec::new(),
        };
        assert_eq!(render_sweep(&report), "sweep default-good: PASS (0 files)\n");
    }

    #[test]
    fn failing_sweep_lists_each_mismatch() {
        let report = SweepReport {
            sweep: Sweep::DefaultBad,
            passed: false,
            records: vec![
                record("bad/ok.ion", ParseOutcome::GrammarFailure, Verdict::Pass),
                record(
                    "bad/malformed.ion",
                    ParseOutcome::CleanParse,
                    Verdict::Fail {
                        reason: "expected some failure, got clean parse with no issues"
                            .to_string(),
                    },
                ),
            ],
        };
        let rendered = render_sweep(&report);
        assert!(rendered.starts_with("sweep default-bad: FAIL (1 of 2 files mismatched)\n"));
        assert!(rendered.contains("bad/malformed.ion: expect-failure, observed clean parse"));
        assert!(!rendered.contains("bad/ok.ion"));
    }

    #[test]
    fn suite_renders_infrastructure_errors_distinctly() {
        let suite = SuiteReport {
            passed: false,
            sweeps: vec![SweepOutcome::Infrastructure {
                sweep: Sweep::DefaultBad,
                error: "corpus directory not found: /tmp/corpus/bad".to_string(),
            }],
        };
        let rendered = render_suite(&suite);
        assert!(rendered.contains("sweep default-bad: ERROR corpus directory not found"));
        assert!(rendered.ends_with("suite: FAIL\n"));
    }
}
