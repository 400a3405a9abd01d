//! Sweep orchestration and suite aggregation.
//!
//! Four independent sweeps: the default good/bad runs with exception-list
//! members excluded, and the two inverse runs that assert each listed gap
//! still reproduces. A sweep never stops at the first mismatch; every file is
//! attempted so the report names all discrepancies. Infrastructure errors
//! abort only their own sweep and are surfaced apart from mismatches.

use crate::classify::{classify, Expectation, ParseOutcome, Verdict};
use crate::corpus::{self, Category, CorpusFile};
use crate::error::HarnessError;
use crate::observer::OutcomeSource;
use crate::registry::ExceptionRegistry;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One category/expectation combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Sweep {
    /// Good corpus minus skipped-good entries; everything must parse.
    #[value(name = "default-good")]
    DefaultGood,
    /// Bad corpus minus skipped-bad entries; everything must fail somewhere.
    #[value(name = "default-bad")]
    DefaultBad,
    /// Exactly the skipped-good entries; each known gap must still reproduce.
    #[value(name = "skipped-good")]
    InverseSkippedGood,
    /// Exactly the skipped-bad entries; each known over-permissiveness must
    /// still reproduce.
    #[value(name = "skipped-bad")]
    InverseSkippedBad,
}

impl Sweep {
    pub const ALL: [Sweep; 4] = [
        Sweep::DefaultGood,
        Sweep::DefaultBad,
        Sweep::InverseSkippedGood,
        Sweep::InverseSkippedBad,
    ];

    pub fn category(self) -> Category {
        match self {
            Sweep::DefaultGood | Sweep::InverseSkippedGood => Category::Good,
            Sweep::DefaultBad | Sweep::InverseSkippedBad => Category::Bad,
        }
    }

    /// Expectation applied to every file the sweep includes. The inverse
    /// sweeps flip their category's default so stale registry entries fail.
    pub fn expectation(self) -> Expectation {
        match self {
            Sweep::DefaultGood | Sweep::InverseSkippedBad => Expectation::Success,
            Sweep::DefaultBad | Sweep::InverseSkippedGood => Expectation::Failure,
        }
    }
}

impl fmt::Display for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sweep::DefaultGood => "default-good",
            Sweep::DefaultBad => "default-bad",
            Sweep::InverseSkippedGood => "skipped-good",
            Sweep::InverseSkippedBad => "skipped-bad",
        };
        f.write_str(name)
    }
}

/// Per-file record in sweep order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file: String,
    pub category: Category,
    pub expectation: Expectation,
    pub outcome: ParseOutcome,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Result of one completed sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub sweep: Sweep,
    pub passed: bool,
    pub records: Vec<FileRecord>,
}

impl SweepReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter(|r| !r.verdict.is_pass())
    }
}

/// A sweep either completes with per-file records or dies on infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SweepOutcome {
    Completed(SweepReport),
    Infrastructure { sweep: Sweep, error: String },
}

/// Aggregated result across all four sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub passed: bool,
    pub sweeps: Vec<SweepOutcome>,
}

/// Sweep runner with its collaborators passed in explicitly.
pub struct Harness<'a, S> {
    corpus_root: &'a Path,
    registry: &'a ExceptionRegistry,
    source: &'a S,
}

impl<'a, S: OutcomeSource> Harness<'a, S> {
    pub fn new(corpus_root: &'a Path, registry: &'a ExceptionRegistry, source: &'a S) -> Self {
        Harness {
            corpus_root,
            registry,
            source,
        }
    }

    /// Run one sweep to completion, observing and classifying every file.
    pub fn run_sweep(&self, sweep: Sweep) -> Result<SweepReport, HarnessError> {
        let files = self.files_for(sweep)?;
        let expectation = sweep.expectation();
        tracing::info!(sweep = %sweep, files = files.len(), "sweep start");

        let mut records = Vec::with_capacity(files.len());
        for file in &files {
            let outcome = self.source.observe(file)?;
            let verdict = classify(expectation, outcome);
            if let Verdict::Fail { reason } = &verdict {
                tracing::debug!(file = %file.path.display(), %reason, "classification mismatch");
            }
            records.push(FileRecord {
                file: self.display_file(file),
                category: file.category,
                expectation,
                outcome,
                verdict,
            });
        }

        let passed = records.iter().all(|r| r.verdict.is_pass());
        tracing::info!(sweep = %sweep, passed, "sweep done");
        Ok(SweepReport {
            sweep,
            passed,
            records,
        })
    }

    /// Run all four sweeps; an infrastructure error is confined to its sweep.
    pub fn run_all(&self) -> SuiteReport {
        let mut sweeps = Vec::with_capacity(Sweep::ALL.len());
        for sweep in Sweep::ALL {
            match self.run_sweep(sweep) {
                Ok(report) => sweeps.push(SweepOutcome::Completed(report)),
                Err(err) => {
                    tracing::warn!(sweep = %sweep, error = %err, "sweep aborted");
                    sweeps.push(SweepOutcome::Infrastructure {
                        sweep,
                        error: err.to_string(),
                    });
                }
            }
        }
        let passed = sweeps.iter().all(|outcome| match outcome {
            SweepOutcome::Completed(report) => report.passed,
            SweepOutcome::Infrastructure { .. } => false,
        });
        SuiteReport { passed, sweeps }
    }

    fn files_for(&self, sweep: Sweep) -> Result<Vec<CorpusFile>, HarnessError> {
        let category = sweep.category();
        match sweep {
            Sweep::DefaultGood | Sweep::DefaultBad => {
                corpus::list_files(self.corpus_root, category, self.registry)
            }
            Sweep::InverseSkippedGood => {
                corpus::find_registered(self.corpus_root, category, self.registry.skipped_good())
            }
            Sweep::InverseSkippedBad => {
                corpus::find_registered(self.corpus_root, category, self.registry.skipped_bad())
            }
        }
    }

    fn display_file(&self, file: &CorpusFile) -> String {
        file.path
            .strip_prefix(self.corpus_root)
            .unwrap_or(&file.path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    /// Outcome source scripted by filename; unknown files crash the test.
    struct ScriptedSource {
        outcomes: BTreeMap<String, ParseOutcome>,
    }

    impl ScriptedSource {
        fn new(entries: &[(&str, ParseOutcome)]) -> Self {
            ScriptedSource {
                outcomes: entries
                    .iter()
                    .map(|(name, outcome)| (name.to_string(), *outcome))
                    .collect(),
            }
        }
    }

    impl OutcomeSource for ScriptedSource {
        fn observe(&self, file: &CorpusFile) -> Result<ParseOutcome, HarnessError> {
            match self.outcomes.get(&file.filename) {
                Some(outcome) => Ok(*outcome),
                None => Err(HarnessError::Collaborator {
                    file: file.path.clone(),
                    source: anyhow::anyhow!("no scripted outcome"),
                }),
            }
        }
    }

    fn corpus_with(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        for rel in files {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create corpus dirs");
            }
            fs::write(&path, "").expect("write corpus file");
        }
        dir
    }

    fn registry(good: &[&str], bad: &[&str]) -> ExceptionRegistry {
        ExceptionRegistry::from_sets(
            good.iter().map(|s| s.to_string()),
            bad.iter().map(|s| s.to_string()),
        )
        .expect("well-formed registry")
    }

    #[test]
    fn conforming_corpus_passes_all_four_sweeps() {
        let dir = corpus_with(&[
            "good/1.ion",
            "good/known-gap.ion",
            "bad/malformed.ion",
            "bad/too-loose.ion",
        ]);
        let registry = registry(&["known-gap.ion"], &["too-loose.ion"]);
        let source = ScriptedSource::new(&[
            ("1.ion", ParseOutcome::CleanParse),
            ("known-gap.ion", ParseOutcome::GrammarFailure),
            ("malformed.ion", ParseOutcome::GrammarFailure),
            ("too-loose.ion", ParseOutcome::CleanParse),
        ]);

        let suite = Harness::new(dir.path(), &registry, &source).run_all();
        assert!(suite.passed);
        assert_eq!(suite.sweeps.len(), 4);
        for outcome in &suite.sweeps {
            match outcome {
                SweepOutcome::Completed(report) => {
                    assert!(report.passed, "sweep {} failed", report.sweep)
                }
                SweepOutcome::Infrastructure { sweep, error } => {
                    panic!("sweep {sweep} hit infrastructure error: {error}")
                }
            }
        }
    }

    #[test]
    fn default_good_tolerates_semantic_issues() {
        let dir = corpus_with(&["good/1.ion"]);
        let registry = ExceptionRegistry::default();
        let source =
            ScriptedSource::new(&[("1.ion", ParseOutcome::CleanParseWithIssues { issues: 2 })]);

        let report = Harness::new(dir.path(), &registry, &source)
            .run_sweep(Sweep::DefaultGood)
            .expect("sweep completes");
        assert!(report.passed);
    }

    #[test]
    fn sweep_reports_every_mismatch_not_just_the_first() {
        let dir = corpus_with(&["bad/a.ion", "bad/b.ion", "bad/c.ion"]);
        let registry = ExceptionRegistry::default();
        let source = ScriptedSource::new(&[
            ("a.ion", ParseOutcome::CleanParse),
            ("b.ion", ParseOutcome::GrammarFailure),
            ("c.ion", ParseOutcome::CleanParse),
        ]);

        let report = Harness::new(dir.path(), &registry, &source)
            .run_sweep(Sweep::DefaultBad)
            .expect("sweep completes");
        assert!(!report.passed);
        assert_eq!(report.records.len(), 3);
        let failed: Vec<&str> = report.failures().map(|r| r.file.as_str()).collect();
        assert_eq!(failed, vec!["bad/a.ion", "bad/c.ion"]);
    }

    #[test]
    fn stale_skipped_good_entry_fails_the_inverse_sweep() {
        let dir = corpus_with(&["good/known-gap.ion"]);
        let registry = registry(&["known-gap.ion"], &[]);
        // Gap has been fixed upstream: the file now parses cleanly.
        let source = ScriptedSource::new(&[("known-gap.ion", ParseOutcome::CleanParse)]);

        let report = Harness::new(dir.path(), &registry, &source)
            .run_sweep(Sweep::InverseSkippedGood)
            .expect("sweep completes");
        assert!(!report.passed);
        let failure = report.failures().next().expect("stale entry reported");
        assert_eq!(failure.expectation, Expectation::Failure);
        assert_eq!(failure.outcome, ParseOutcome::CleanParse);
    }

    #[test]
    fn skipped_files_are_excluded_from_default_sweeps() {
        let dir = corpus_with(&["good/1.ion", "good/known-gap.ion"]);
        let registry = registry(&["known-gap.ion"], &[]);
        // Only 1.ion is scripted; visiting known-gap.ion would error.
        let source = ScriptedSource::new(&[("1.ion", ParseOutcome::CleanParse)]);

        let report = Harness::new(dir.path(), &registry, &source)
            .run_sweep(Sweep::DefaultGood)
            .expect("sweep completes");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].file, "good/1.ion");
    }

    #[test]
    fn sweeps_are_idempotent() {
        let dir = corpus_with(&["good/b.ion", "good/a.ion"]);
        let registry = ExceptionRegistry::default();
        let source = ScriptedSource::new(&[
            ("a.ion", ParseOutcome::CleanParse),
            ("b.ion", ParseOutcome::GrammarFailure),
        ]);
        let harness = Harness::new(dir.path(), &registry, &source);

        let first = harness.run_sweep(Sweep::DefaultGood).expect("first run");
        let second = harness.run_sweep(Sweep::DefaultGood).expect("second run");
        assert_eq!(first, second);
        let order: Vec<&str> = first.records.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(order, vec!["good/a.ion", "good/b.ion"]);
    }

    #[test]
    fn missing_corpus_confines_the_error_to_its_sweep() {
        let dir = corpus_with(&["good/1.ion"]);
        let registry = ExceptionRegistry::default();
        let source = ScriptedSource::new(&[("1.ion", ParseOutcome::CleanParse)]);

        let suite = Harness::new(dir.path(), &registry, &source).run_all();
        assert!(!suite.passed);
        match &suite.sweeps[0] {
            SweepOutcome::Completed(report) => assert!(report.passed),
            other => panic!("default-good should complete: {other:?}"),
        }
        match &suite.sweeps[1] {
            SweepOutcome::Infrastructure { sweep, error } => {
                assert_eq!(*sweep, Sweep::DefaultBad);
                assert!(error.contains("corpus directory not found"));
            }
            other => panic!("default-bad should abort: {other:?}"),
        }
        // Inverse sweeps over an empty registry have nothing to resolve.
        assert!(matches!(&suite.sweeps[2], SweepOutcome::Completed(_)));
        assert!(matches!(&suite.sweeps[3], SweepOutcome::Completed(_)));
    }

    #[test]
    fn collaborator_failure_aborts_the_sweep() {
        let dir = corpus_with(&["good/1.ion", "good/2.ion"]);
        let registry = ExceptionRegistry::default();
        // 2.ion has no scripted outcome, simulating a parser crash.
        let source = ScriptedSource::new(&[("1.ion", ParseOutcome::CleanParse)]);

        let err = Harness::new(dir.path(), &registry, &source)
            .run_sweep(Sweep::DefaultGood)
            .expect_err("crash must abort the sweep");
        assert!(matches!(err, HarnessError::Collaborator { .. }));
    }
}
