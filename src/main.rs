//! CLI entry point for the Aadhaar update pipeline.
//!
//! Provides subcommands for running the full merge/normalize/aggregate
//! pipeline and for inspecting a single normalized category.

use aadhaar_pulse::{
    category::Category,
    config::{DEFAULT_BASE_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_TOP_K, PipelineConfig},
    geography::Geography,
    output::{print_json, print_pretty, write_report, write_table},
    pipeline::{load_category, run},
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "aadhaar_pulse")]
#[command(about = "Merge, clean and aggregate Aadhaar update datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole pipeline and write the aggregate results
    Report {
        /// Directory holding one subdirectory per category
        #[arg(short = 'b', long, default_value = DEFAULT_BASE_DIR)]
        base_dir: PathBuf,

        /// Directory to write report.json and the result CSVs into
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Number of states to keep in the compliance ranking
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top: usize,

        /// Also log the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Merge and normalize one category and write it as CSV
    Normalize {
        #[arg(value_enum)]
        category: Category,

        /// Directory holding one subdirectory per category
        #[arg(short = 'b', long, default_value = DEFAULT_BASE_DIR)]
        base_dir: PathBuf,

        /// CSV file to write the normalized table to
        #[arg(short, long, default_value = "normalized.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/aadhaar_pulse.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("aadhaar_pulse.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let geo = Arc::new(Geography::india());

    match cli.command {
        Commands::Report {
            base_dir,
            output_dir,
            top,
            json,
        } => {
            let config = PipelineConfig::default()
                .with_base_dir(base_dir)
                .with_output_dir(output_dir)
                .with_top_k(top);

            let report = run(&config, geo).await?;

            if let Some(totals) = report.update_totals() {
                for total in totals {
                    info!(label = total.label(), value = total.value(), "Total");
                }
            }
            if let Some(ranked) = report.child_compliance() {
                for (rank, entry) in ranked.entries().iter().enumerate() {
                    info!(rank = rank + 1, state = entry.key(), ratio = entry.ratio(), "Child compliance");
                }
            }
            if let Some(trend) = report.adult_trend() {
                for point in trend.points() {
                    info!(period = %point.period(), sum = point.sum(), "Adult updates");
                }
            }
            for e in report.errors() {
                warn!(error = %e, "Computation skipped");
            }

            print_pretty(&report);
            if json {
                print_json(&report)?;
            }

            write_report(&config.output_dir, &report)?;
        }
        Commands::Normalize {
            category,
            base_dir,
            output,
        } => {
            let (table, diagnostics) =
                tokio::task::spawn_blocking(move || load_category(&base_dir, category, &geo))
                    .await??;

            info!(
                category = %category,
                files = diagnostics.merge.files,
                rows_merged = diagnostics.merge.rows,
                rows_kept = diagnostics.normalize.rows_out,
                dropped_pct = diagnostics.normalize.dropped_pct(),
                "Category normalized"
            );

            write_table(&output, &table)?;
            info!(output = %output.display(), "Normalized table written");
        }
    }

    Ok(())
}
