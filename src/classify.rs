//! Conformance classification: expected vs observed parse outcomes.
//!
//! A "good" file only has to be syntactically parseable; semantic issues are
//! tolerated because the validator evolves independently of the grammar. A
//! "bad" file only has to fail somewhere: grammar rejection and semantic
//! issues both satisfy the expectation, so the harness stays stable when
//! either collaborator improves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the parser and validator did with one corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Parsing aborted; no document tree was produced.
    GrammarFailure,
    /// Parsed, and the validator reported zero error-severity issues.
    CleanParse,
    /// Parsed, but the validator reported at least one error-severity issue.
    CleanParseWithIssues { issues: usize },
}

impl ParseOutcome {
    /// Fold an error-severity issue count into an outcome.
    pub fn from_issue_count(issues: usize) -> Self {
        if issues == 0 {
            ParseOutcome::CleanParse
        } else {
            ParseOutcome::CleanParseWithIssues { issues }
        }
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOutcome::GrammarFailure => write!(f, "grammar failure"),
            ParseOutcome::CleanParse => write!(f, "clean parse"),
            ParseOutcome::CleanParseWithIssues { issues } => {
                write!(f, "clean parse with {issues} issue(s)")
            }
        }
    }
}

/// Expected classification for one file in one sweep.
///
/// Derived from (category, registry membership) by the harness runner; the
/// same file carries the opposite expectation in its inverse sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Success,
    Failure,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Success => write!(f, "expect-success"),
            Expectation::Failure => write!(f, "expect-failure"),
        }
    }
}

/// Per-file classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail { reason: String },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Decide whether an observed outcome satisfies the expected classification.
pub fn classify(expectation: Expectation, outcome: ParseOutcome) -> Verdict {
    match (expectation, outcome) {
        (Expectation::Success, ParseOutcome::CleanParse)
        | (Expectation::Success, ParseOutcome::CleanParseWithIssues { .. }) => Verdict::Pass,
        (Expectation::Success, ParseOutcome::GrammarFailure) => Verdict::Fail {
            reason: "expected parse success, got grammar failure".to_string(),
        },
        (Expectation::Failure, ParseOutcome::GrammarFailure)
        | (Expectation::Failure, ParseOutcome::CleanParseWithIssues { .. }) => Verdict::Pass,
        (Expectation::Failure, ParseOutcome::CleanParse) => Verdict::Fail {
            reason: "expected some failure, got clean parse with no issues".to_string(),
        },
    }
}
