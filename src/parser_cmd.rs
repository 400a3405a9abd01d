//! Subprocess-backed outcome source.
//!
//! Drives an external parser/validator executable once per corpus file under
//! a controlled environment (`LC_ALL=C`, `TZ=UTC`, `TERM=dumb`). The contract
//! with the executable:
//!
//! - exit 0: the file parsed; stdout carries the validator's issues as a JSON
//!   array of `{severity, message}` (empty stdout means no issues);
//! - the configured grammar-failure exit code (default 2): grammar rejection;
//! - anything else, including spawn failure or undecodable stdout, is an
//!   unexpected collaborator failure and aborts the sweep.

use crate::classify::ParseOutcome;
use crate::corpus::CorpusFile;
use crate::error::HarnessError;
use crate::observer::{error_count, Issue, OutcomeSource};
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// Default exit code the external parser uses to signal grammar rejection.
pub const DEFAULT_GRAMMAR_EXIT_CODE: i32 = 2;

const STDERR_EXCERPT_MAX: usize = 512;

/// External parser/validator invocation: `<program> [args...] <file>`.
pub struct ParserCommand {
    program: PathBuf,
    args: Vec<String>,
    grammar_exit_code: i32,
}

impl ParserCommand {
    pub fn new(program: PathBuf, args: Vec<String>, grammar_exit_code: i32) -> Self {
        ParserCommand {
            program,
            args,
            grammar_exit_code,
        }
    }

    fn interpret(&self, code: Option<i32>, stdout: &str, stderr: &str) -> Result<ParseOutcome> {
        match code {
            Some(0) => {
                let issues = decode_issues(stdout)?;
                Ok(ParseOutcome::from_issue_count(error_count(&issues)))
            }
            Some(code) if code == self.grammar_exit_code => Ok(ParseOutcome::GrammarFailure),
            code => Err(anyhow!(
                "parser exited with {:?} (expected 0 or {}): {}",
                code,
                self.grammar_exit_code,
                excerpt(stderr)
            )),
        }
    }
}

impl OutcomeSource for ParserCommand {
    fn observe(&self, file: &CorpusFile) -> Result<ParseOutcome, HarnessError> {
        let collaborator = |source: anyhow::Error| HarnessError::Collaborator {
            file: file.path.clone(),
            source,
        };

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&file.path)
            .env_clear()
            .env("LC_ALL", "C")
            .env("TZ", "UTC")
            .env("TERM", "dumb")
            .output()
            .with_context(|| format!("spawn parser {}", self.program.display()))
            .map_err(collaborator)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        self.interpret(output.status.code(), &stdout, &stderr)
            .map_err(collaborator)
    }
}

fn decode_issues(stdout: &str) -> Result<Vec<Issue>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("decode validator issues from parser stdout")
}

fn excerpt(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.len() <= STDERR_EXCERPT_MAX {
        return trimmed.to_string();
    }
    let mut truncated = String::new();
    for ch in trimmed.chars() {
        if truncated.len() + ch.len_utf8() > STDERR_EXCERPT_MAX {
            break;
        }
        truncated.push(ch);
    }
    truncated
}
