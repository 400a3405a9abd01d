//! Conformance harness for Ion text parsers.
//!
//! Walks a corpus of `good`/`bad` sample files, observes each file's parse
//! outcome through an injected parser/validator pair, and checks the outcome
//! against the file's expected classification. An exception registry tracks
//! files whose current behavior is known to disagree with the corpus.

pub mod classify;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod harness;
pub mod observer;
pub mod parser_cmd;
pub mod registry;
pub mod report;

pub use classify::{classify, Expectation, ParseOutcome, Verdict};
pub use error::HarnessError;
pub use harness::{Harness, SuiteReport, Sweep, SweepReport};
pub use registry::ExceptionRegistry;
