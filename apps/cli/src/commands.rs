//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use hotelscrub_core::metrics::aggregate_by_city;
use hotelscrub_core::pipeline::{CleanConfig, CleanOutcome, ProgressReporter, run_clean};
use hotelscrub_core::writer;
use hotelscrub_shared::{AppConfig, delimiter_byte, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// HotelScrub — clean scraped hotel-listing data.
#[derive(Parser)]
#[command(
    name = "hotelscrub",
    version,
    about = "Clean a scraped hotel-listing extract and derive summary views.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Clean a raw extract into a normalized dataset.
    Clean {
        /// Raw extract to read.
        input: PathBuf,

        /// Cleaned output path (defaults to `<input stem>.clean.csv`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Per-city aggregates path (defaults to `<output stem>.cities.csv`).
        #[arg(long)]
        aggregates: Option<PathBuf>,

        /// Run report path (defaults to `<output stem>.report.json`).
        #[arg(long)]
        report: Option<PathBuf>,

        /// Input field delimiter (overrides config; `\t` for tabs).
        #[arg(long)]
        delimiter: Option<String>,

        /// Skip writing the aggregates file.
        #[arg(long)]
        no_aggregates: bool,

        /// Skip writing the report file.
        #[arg(long)]
        no_report: bool,
    },

    /// Print the per-city summary of an already-cleaned dataset.
    Stats {
        /// Cleaned dataset to summarize.
        input: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "hotelscrub=info",
        1 => "hotelscrub=debug",
        _ => "hotelscrub=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Clean {
            input,
            out,
            aggregates,
            report,
            delimiter,
            no_aggregates,
            no_report,
        } => cmd_clean(CleanArgs {
            input,
            out,
            aggregates,
            report,
            delimiter,
            no_aggregates,
            no_report,
        }),
        Command::Stats { input } => cmd_stats(&input),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// clean
// ---------------------------------------------------------------------------

struct CleanArgs {
    input: PathBuf,
    out: Option<PathBuf>,
    aggregates: Option<PathBuf>,
    report: Option<PathBuf>,
    delimiter: Option<String>,
    no_aggregates: bool,
    no_report: bool,
}

/// Derive `<stem>.<suffix>` next to the given path.
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!("{stem}.{suffix}"))
}

fn cmd_clean(args: CleanArgs) -> Result<()> {
    let config: AppConfig = load_config()?;

    let delimiter_str = args
        .delimiter
        .unwrap_or_else(|| config.input.delimiter.clone());
    let delimiter = delimiter_byte(&delimiter_str)?;

    let output = args
        .out
        .unwrap_or_else(|| sibling_with_suffix(&args.input, "clean.csv"));

    let aggregates_out = if args.no_aggregates
        || (!config.output.write_aggregates && args.aggregates.is_none())
    {
        None
    } else {
        Some(
            args.aggregates
                .unwrap_or_else(|| sibling_with_suffix(&output, "cities.csv")),
        )
    };

    let report_out = if args.no_report
        || (!config.output.write_report && args.report.is_none())
    {
        None
    } else {
        Some(
            args.report
                .unwrap_or_else(|| sibling_with_suffix(&output, "report.json")),
        )
    };

    let clean_config = CleanConfig {
        input: args.input,
        output,
        aggregates_out,
        report_out,
        delimiter,
    };

    info!(
        input = %clean_config.input.display(),
        output = %clean_config.output.display(),
        "cleaning raw extract"
    );

    let reporter = CliProgress::new();
    let outcome = run_clean(&clean_config, &reporter)?;
    let report = &outcome.report;

    // Print summary
    println!();
    println!("  Cleaning complete!");
    println!("  Input:    {}", report.input);
    println!("  Output:   {}", report.output);
    println!("  Rows:     {} read, {} kept, {} skipped",
        report.rows_read, report.rows_kept, report.rows_skipped);
    if !report.skips.is_empty() {
        println!("  Skipped rows by reason:");
        for skip in &report.skips {
            println!("    {:<24} {:>6}  ({})", skip.reason, skip.count, skip.class);
        }
    }
    if let Some(path) = &outcome.aggregates_path {
        println!("  Cities:   {}", path.display());
    }
    if let Some(path) = &outcome.report_path {
        println!("  Report:   {}", path.display());
    }
    println!("  Time:     {:.1}s", outcome.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn row_cleaned(&self, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Cleaning [{current}/{total}]"));
    }

    fn done(&self, _outcome: &CleanOutcome) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

fn cmd_stats(input: &Path) -> Result<()> {
    let listings = writer::read_cleaned(input)?;
    let aggregates = aggregate_by_city(&listings);

    if aggregates.is_empty() {
        println!("no listings in {}", input.display());
        return Ok(());
    }

    println!();
    println!(
        "  {:<20} {:>8} {:>10} {:>7} {:>12} {:>12}",
        "City", "Listings", "Avg price", "Score", "Popularity", "Free cancel"
    );
    for agg in &aggregates {
        println!(
            "  {:<20} {:>8} {:>10} {:>7} {:>12} {:>12}",
            agg.city,
            agg.listings,
            fmt_cell(agg.avg_price, 2),
            fmt_cell(agg.avg_score, 2),
            fmt_cell(agg.avg_popularity, 4),
            fmt_rate(agg.free_cancellation_rate),
        );
    }
    println!();
    println!("  {} listings in {} cities", listings.len(), aggregates.len());
    println!();

    Ok(())
}

fn fmt_cell(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_else(|| "-".into())
}

fn fmt_rate(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0}%", v * 100.0))
        .unwrap_or_else(|| "-".into())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
