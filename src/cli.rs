//! CLI argument parsing for the conformance harness.
//!
//! The CLI is intentionally thin: it wires the corpus, registry, and external
//! parser into the harness runner without embedding any classification policy.

use crate::harness::Sweep;
use crate::parser_cmd::DEFAULT_GRAMMAR_EXIT_CODE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint for the conformance harness.
#[derive(Parser, Debug)]
#[command(
    name = "ionconf",
    version,
    about = "Conformance harness for Ion text parsers",
    after_help = "Commands:\n  run --corpus <DIR> --parser <CMD>           Run all four sweeps\n  sweep <NAME> --corpus <DIR> --parser <CMD>  Run one sweep\n\nSweep names: default-good, default-bad, skipped-good, skipped-bad\n\nExamples:\n  ionconf run --corpus ./ion-tests --parser ./ion-parse\n  ionconf run --corpus ./ion-tests --parser ./ion-parse --registry skips.json --json\n  ionconf sweep default-bad --corpus ./ion-tests --parser ./ion-parse --out report.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level harness commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Run(RunArgs),
    Sweep(SweepArgs),
}

/// Inputs shared by every sweep invocation.
#[derive(Args, Debug)]
pub struct HarnessArgs {
    /// Corpus root containing the good/ and bad/ directories
    #[arg(long, value_name = "DIR")]
    pub corpus: PathBuf,

    /// External parser/validator executable, invoked once per file
    #[arg(long, value_name = "CMD")]
    pub parser: PathBuf,

    /// Extra argument passed to the parser before the file path (repeatable)
    #[arg(long = "parser-arg", value_name = "ARG")]
    pub parser_args: Vec<String>,

    /// Exit code the parser uses to signal grammar rejection
    #[arg(long, value_name = "CODE", default_value_t = DEFAULT_GRAMMAR_EXIT_CODE)]
    pub grammar_exit_code: i32,

    /// Exception registry JSON ({"skipped_good": [...], "skipped_bad": [...]})
    #[arg(long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Emit the report as JSON instead of the human-readable summary
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this path
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Run all four sweeps.
#[derive(Args, Debug)]
#[command(about = "Run all four conformance sweeps")]
pub struct RunArgs {
    #[command(flatten)]
    pub harness: HarnessArgs,
}

/// Run a single sweep.
#[derive(Args, Debug)]
#[command(about = "Run one conformance sweep")]
pub struct SweepArgs {
    /// Sweep to run
    #[arg(value_name = "NAME", value_enum)]
    pub name: Sweep,

    #[command(flatten)]
    pub harness: HarnessArgs,
}
