use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ion_conform::cli::{Command, HarnessArgs, RootArgs};
use ion_conform::harness::{Harness, Sweep, SweepOutcome};
use ion_conform::parser_cmd::ParserCommand;
use ion_conform::registry::ExceptionRegistry;
use ion_conform::report;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    let passed = match args.command {
        Command::Run(args) => cmd_run(&args.harness)?,
        Command::Sweep(args) => cmd_sweep(args.name, &args.harness)?,
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_run(args: &HarnessArgs) -> Result<bool> {
    let registry = load_registry(args)?;
    let source = parser_command(args);
    let suite = Harness::new(&args.corpus, &registry, &source).run_all();

    emit(args, &suite, report::render_suite(&suite))?;
    Ok(suite.passed)
}

fn cmd_sweep(sweep: Sweep, args: &HarnessArgs) -> Result<bool> {
    let registry = load_registry(args)?;
    let source = parser_command(args);
    let harness = Harness::new(&args.corpus, &registry, &source);

    // A single sweep uses the same outcome envelope as the full run so
    // infrastructure errors stay distinguishable in JSON output.
    let outcome = match harness.run_sweep(sweep) {
        Ok(report) => SweepOutcome::Completed(report),
        Err(err) => SweepOutcome::Infrastructure {
            sweep,
            error: err.to_string(),
        },
    };

    let (passed, rendered) = match &outcome {
        SweepOutcome::Completed(report) => (report.passed, report::render_sweep(report)),
        SweepOutcome::Infrastructure { sweep, error } => {
            (false, format!("sweep {sweep}: ERROR {error}\n"))
        }
    };
    emit(args, &outcome, rendered)?;
    Ok(passed)
}

fn load_registry(args: &HarnessArgs) -> Result<ExceptionRegistry> {
    match &args.registry {
        Some(path) => ExceptionRegistry::load(path)
            .with_context(|| format!("load exception registry {}", path.display())),
        None => Ok(ExceptionRegistry::default()),
    }
}

fn parser_command(args: &HarnessArgs) -> ParserCommand {
    ParserCommand::new(
        args.parser.clone(),
        args.parser_args.clone(),
        args.grammar_exit_code,
    )
}

fn emit<T: Serialize>(args: &HarnessArgs, value: &T, rendered: String) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{rendered}");
    }
    if let Some(out) = &args.out {
        write_json(out, value)?;
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
