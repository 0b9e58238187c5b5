//! Honoraria CLI - Consolidate physician honoraria from Excel exports
//!
//! # Main Commands
//!
//! ```bash
//! honoraria consolidate a.xlsx b.xlsx    # Print the per-physician summary
//! honoraria export a.xlsx --physician "SMITH A"
//! honoraria serve                        # Start HTTP server (port 3000)
//! ```

use clap::{Parser, Subcommand};
use honoraria::{
    bucket_unpaid_by_month, consolidate_files, export_summary, filter_summaries,
    ConsolidateOptions, ConsolidateResult, ReportConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "honoraria")]
#[command(about = "Consolidate physician honoraria from Excel billing exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate workbook files and print the per-physician summary
    Consolidate {
        /// Input workbook files (xlsx, xls, ods), in selection order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Report configuration JSON (defaults to the reference config)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show only physicians whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Write the full result as JSON to this file
        #[arg(short, long)]
        json: Option<PathBuf>,
    },

    /// Export one physician's two-sheet report
    Export {
        /// Input workbook files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Exact physician name (as printed by `consolidate`)
        #[arg(short, long)]
        physician: String,

        /// Output directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Report configuration JSON (defaults to the reference config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Report configuration JSON (defaults to the reference config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Consolidate {
            files,
            config,
            search,
            json,
        } => cmd_consolidate(&files, config.as_deref(), search.as_deref(), json.as_deref()),

        Commands::Export {
            files,
            physician,
            out_dir,
            config,
        } => cmd_export(&files, &physician, &out_dir, config.as_deref()),

        Commands::Serve { port, config } => cmd_serve(port, config.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(ReportConfig::from_path(p)?),
        None => Ok(ReportConfig::reference()),
    }
}

fn run_pipeline(
    files: &[PathBuf],
    config_path: Option<&Path>,
) -> Result<(ConsolidateResult, ReportConfig), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let options = ConsolidateOptions {
        config: config.clone(),
    };
    let result = consolidate_files(files, &options);
    Ok((result, config))
}

fn cmd_consolidate(
    files: &[PathBuf],
    config_path: Option<&Path>,
    search: Option<&str>,
    json_out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (result, config) = run_pipeline(files, config_path)?;

    if !result.failed_files.is_empty() {
        eprintln!("\n⚠️  {} file(s) dropped:", result.failed_files.len());
        for (file, error) in &result.failed_files {
            eprintln!("   - {}: {}", file, error);
        }
    }

    let shown = filter_summaries(&result.summaries, search.unwrap_or(""));

    println!(
        "\n📊 {} physician(s), {} record(s)",
        shown.len(),
        result.record_count
    );
    for summary in &shown {
        println!("\n  {}", summary.physician);
        println!(
            "     Pagado:    {}  ({} registros)",
            config.currency.format_amount(summary.total_paid),
            summary.paid_count
        );
        println!(
            "     No pagado: {}  ({} registros)",
            config.currency.format_amount(summary.total_unpaid),
            summary.unpaid_count
        );
        println!(
            "     Total:     {}",
            config.currency.format_amount(summary.total_overall)
        );
    }

    if let Some(selected) = result.default_selection(&config) {
        println!("\n📅 Registros no pagados por mes — {}", selected.physician);
        let buckets = bucket_unpaid_by_month(selected);
        if buckets.is_empty() {
            println!("   (ninguno)");
        }
        for bucket in buckets {
            println!(
                "   {} — {} ({} registros)",
                bucket.label,
                config.currency.format_amount(bucket.total),
                bucket.records.len()
            );
        }
    }

    if let Some(path) = json_out {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(path, json)?;
        eprintln!("\n💾 JSON written to: {}", path.display());
    }

    Ok(())
}

fn cmd_export(
    files: &[PathBuf],
    physician: &str,
    out_dir: &Path,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (result, _config) = run_pipeline(files, config_path)?;

    let summary = result
        .summaries
        .iter()
        .find(|s| s.physician == physician)
        .ok_or_else(|| format!("Physician not found in batch: {}", physician))?;

    let path = export_summary(summary, out_dir)?;
    eprintln!(
        "💾 Report written to: {} ({} records, {} unpaid)",
        path.display(),
        summary.all_details.len(),
        summary.unpaid_details.len()
    );

    Ok(())
}

async fn cmd_serve(
    port: u16,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    honoraria::server::start_server(port, config).await
}
