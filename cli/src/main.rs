use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use command_args_core::{
    CommandPackage, Outcome, ProcessResult, process, render_command_help, render_top_help,
    validate_package,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for processed results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "command-args")]
#[command(about = "Process argument vectors against declarative command packages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Process an argument vector and print the selected command, options and args.
    Run(RunArgs),
    /// Check one or more command package files for structural problems.
    Check(CheckArgs),
    /// Print top-level help, or one command's help, for a package.
    HelpText(HelpTextArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Command package file (.json, .yaml or .yml).
    package: PathBuf,
    /// Output format for the processed result.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to process; pass them after `--`.
    #[arg(last = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Command package files.
    #[arg(required = true)]
    packages: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct HelpTextArgs {
    /// Command package file.
    package: PathBuf,
    /// Command to describe; omit for top-level help.
    command: Option<String>,
}

/// Serializable view of a successful run.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    command: Option<&'a str>,
    options: &'a serde_json::Value,
    args: &'a serde_json::Value,
}

impl<'a> From<&'a ProcessResult<'a, ()>> for RunReport<'a> {
    fn from(result: &'a ProcessResult<'a, ()>) -> Self {
        Self {
            command: result.name,
            options: &result.options,
            args: &result.args,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(args) => run_process(args),
        Command::Check(args) => run_check(args),
        Command::HelpText(args) => run_help_text(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_process(args: RunArgs) -> Result<(), String> {
    let package = load_package(&args.package)?;
    if let Some(problem) = validate_package(&package).into_iter().next() {
        return Err(format!(
            "invalid package '{}': {problem}",
            args.package.display()
        ));
    }
    let registry = package.to_registry();
    debug!(argc = args.argv.len(), "processing arguments");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = process(&registry, &args.argv, &mut out).map_err(|err| err.to_string())?;

    let Outcome::Success(result) = outcome else {
        return Ok(());
    };

    let report = RunReport::from(&result);
    let rendered = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&report)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|err| format!("Failed to serialize result: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&report)
            .map_err(|err| format!("Failed to serialize result: {err}"))?,
    };
    out.write_all(rendered.as_bytes())
        .map_err(|err| format!("Failed to write result: {err}"))?;

    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut failures = 0usize;
    for path in &args.packages {
        let package = load_package(path)?;
        let problems = validate_package(&package);
        if problems.is_empty() {
            println!("{}: ok ({} command(s))", path.display(), package.commands.len());
            continue;
        }
        failures += 1;
        for problem in problems {
            println!("{}: {problem}", path.display());
        }
    }

    if failures > 0 {
        return Err(format!("{failures} package(s) failed validation"));
    }
    Ok(())
}

fn run_help_text(args: HelpTextArgs) -> Result<(), String> {
    let package = load_package(&args.package)?;
    let registry = package.to_registry();

    let text = match args.command.as_deref() {
        None => render_top_help(&registry),
        Some(name) => {
            let definition = registry
                .get(name)
                .ok_or_else(|| format!("unknown command: {name}"))?;
            render_command_help(&registry.meta, Some(name), definition)
        }
    };
    print!("{text}");
    Ok(())
}

fn load_package(path: &Path) -> Result<CommandPackage, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    } else {
        serde_json::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    }
}
