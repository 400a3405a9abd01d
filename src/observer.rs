//! Parse outcome observation over injected parser/validator collaborators.
//!
//! The grammar-failure signal comes only from the parser's own error channel.
//! Anything else the collaborators raise is an infrastructure fault and must
//! propagate; mapping it to a grammar failure would hide harness bugs behind
//! plausible-looking sweep results.

use crate::classify::ParseOutcome;
use crate::corpus::CorpusFile;
use crate::error::HarnessError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parser failure channel.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The input could not be parsed into a document tree.
    #[error("grammar error: {0}")]
    Grammar(String),

    /// Anything else: the parser itself misbehaved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One finding from the semantic validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Count the issues that matter for classification.
pub fn error_count(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count()
}

/// Grammar parser collaborator: raw bytes to a document tree.
pub trait GrammarParser {
    type Tree;

    fn parse(&self, input: &[u8]) -> Result<Self::Tree, ParserError>;
}

/// Semantic validator collaborator: issues over an already-parsed tree.
pub trait SemanticValidator<T> {
    fn validate(&self, tree: &T) -> anyhow::Result<Vec<Issue>>;
}

/// The seam the harness runner consumes: one outcome per file.
pub trait OutcomeSource {
    fn observe(&self, file: &CorpusFile) -> Result<ParseOutcome, HarnessError>;
}

/// Observer over an in-process parser/validator pair.
pub struct Observer<P, V> {
    parser: P,
    validator: V,
}

impl<P, V> Observer<P, V>
where
    P: GrammarParser,
    V: SemanticValidator<P::Tree>,
{
    pub fn new(parser: P, validator: V) -> Self {
        Observer { parser, validator }
    }
}

impl<P, V> OutcomeSource for Observer<P, V>
where
    P: GrammarParser,
    V: SemanticValidator<P::Tree>,
{
    /// Invoke the parser exactly once; a flaky grammar failure is a genuine
    /// signal, not a transient fault to retry.
    fn observe(&self, file: &CorpusFile) -> Result<ParseOutcome, HarnessError> {
        let collaborator = |source: anyhow::Error| HarnessError::Collaborator {
            file: file.path.clone(),
            source,
        };

        let bytes = std::fs::read(&file.path)
            .with_context(|| format!("read corpus file {}", file.path.display()))
            .map_err(collaborator)?;

        let tree = match self.parser.parse(&bytes) {
            Ok(tree) => tree,
            Err(ParserError::Grammar(_)) => return Ok(ParseOutcome::GrammarFailure),
            Err(ParserError::Other(source)) => return Err(collaborator(source)),
        };

        let issues = self.validator.validate(&tree).map_err(collaborator)?;
        Ok(ParseOutcome::from_issue_count(error_count(&issues)))
    }
}
