use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use interaction_report_core::{HistoryIndex, RunStatistics, TestRun};
use interaction_report_parser::config::ReportConfig;
use interaction_report_parser::discover::{DiscoverConfig, discover_runs, load_run_with_report};
use interaction_report_parser::output::{
    OutputFormat as LibOutputFormat, format_history, format_run, format_stats,
};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Table,
}

impl From<CliOutputFormat> for LibOutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "interaction-report")]
#[command(about = "Parse and summarize AI interaction test logs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse one log file and print its structured run.
    Parse(ParseArgs),
    /// Print statistics for one log file.
    Stats(StatsArgs),
    /// Print the recency-ordered history of all discovered runs.
    History(HistoryArgs),
    /// Look up a run by name among the discovered runs.
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Log file to parse.
    file: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Json)]
    format: CliOutputFormat,
    /// Also print the parse report (dropped sections, discrepancies) to stderr.
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Args)]
struct StatsArgs {
    /// Log file to summarize.
    file: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Table)]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct DiscoverArgs {
    /// Directory containing the run log files; may be given multiple times,
    /// searched in order.
    #[arg(long)]
    root: Vec<PathBuf>,
    /// Glob-style file-name pattern (default: current_test_*.txt).
    #[arg(long)]
    pattern: Option<String>,
    /// YAML discovery configuration; --root/--pattern override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct HistoryArgs {
    #[command(flatten)]
    discover: DiscoverArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Table)]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// Exact run name (typically the log file name).
    name: String,
    #[command(flatten)]
    discover: DiscoverArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Json)]
    format: CliOutputFormat,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Stats(args) => run_stats(args),
        Command::History(args) => run_history(args),
        Command::Lookup(args) => run_lookup(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn resolve_discover_configs(args: &DiscoverArgs) -> Result<Vec<DiscoverConfig>, String> {
    let mut base = match &args.config {
        Some(path) => ReportConfig::load(path)
            .map_err(|e| format!("failed to load config {}: {e}", path.display()))?
            .discover_config(),
        None => DiscoverConfig::default(),
    };
    if let Some(pattern) = &args.pattern {
        base.file_pattern = pattern.clone();
    }
    if args.root.is_empty() {
        return Ok(vec![base]);
    }
    Ok(args
        .root
        .iter()
        .map(|root| DiscoverConfig {
            root_dir: root.clone(),
            file_pattern: base.file_pattern.clone(),
        })
        .collect())
}

fn discover_all(args: &DiscoverArgs) -> Result<Vec<TestRun>, String> {
    let configs = resolve_discover_configs(args)?;
    let mut runs = Vec::new();
    for config in &configs {
        runs.extend(discover_runs(config).map_err(|e| {
            format!("discovery failed under {}: {e}", config.root_dir.display())
        })?);
    }
    Ok(runs)
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let (run, report) = load_run_with_report(&args.file)
        .map_err(|e| format!("failed to read {}: {e}", args.file.display()))?;
    println!("{}", format_run(&run, args.format.into())?);

    if args.report {
        eprintln!(
            "sections: {} parsed, {} dropped{}",
            report.interactions_parsed,
            report.sections_dropped,
            if report.fallback_used {
                " (legacy delimiter fallback)"
            } else {
                ""
            }
        );
        for item in &report.discrepancies {
            eprintln!("interaction {}: {}", item.interaction + 1, item.discrepancy);
        }
    }
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<(), String> {
    let (run, _) = load_run_with_report(&args.file)
        .map_err(|e| format!("failed to read {}: {e}", args.file.display()))?;
    let stats = RunStatistics::compute(&run);
    println!("{}", format_stats(&stats, args.format.into())?);
    Ok(())
}

fn run_history(args: HistoryArgs) -> Result<(), String> {
    let runs = discover_all(&args.discover)?;
    let index = HistoryIndex::build(runs);

    for name in index.duplicate_names() {
        eprintln!("warning: {name} appears more than once; lookup resolves to the first match");
    }
    println!("{}", format_history(&index, args.format.into())?);
    Ok(())
}

fn run_lookup(args: LookupArgs) -> Result<(), String> {
    let runs = discover_all(&args.discover)?;
    let index = HistoryIndex::build(runs);

    if index.duplicate_names().iter().any(|n| n == &args.name) {
        eprintln!(
            "warning: {} appears more than once; showing the first match in discovery order",
            args.name
        );
    }
    match index.lookup(&args.name) {
        Some(run) => {
            println!("{}", format_run(run, args.format.into())?);
            Ok(())
        }
        None => Err(format!("no run named `{}`", args.name)),
    }
}
