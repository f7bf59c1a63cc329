//! earthwise-export CLI
//!
//! Command-line tool for exporting back-office records to files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use earthwise_export::{
    AnalyticsOverview, AnalyticsReport, Contact, DataExporter, DateRange, ExportBundle,
    ExportFile, ExportFormat, ExportOptions, ExportStats, Faq, Product,
};

/// Export contacts, products, FAQs and analytics to CSV, TSV or JSON.
#[derive(Parser)]
#[command(name = "earthwise-export")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the export files are written to.
    #[arg(short, long, global = true, env = "EARTHWISE_EXPORT_DIR", default_value = "exports")]
    output_dir: PathBuf,

    /// Output format: csv, tsv (or xlsx) or json.
    #[arg(short, long, global = true, default_value = "csv")]
    format: ExportFormat,

    /// Only export records whose field equals the value (`key=value`).
    #[arg(long = "filter", global = true, value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// First day of the contact date range.
    #[arg(long, global = true, requires = "to")]
    from: Option<NaiveDate>,

    /// Last day of the contact date range.
    #[arg(long, global = true, requires = "from")]
    to: Option<NaiveDate>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export contact requests from a JSON array.
    Contacts {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Export catalog products from a JSON array.
    Products {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Export FAQs from a JSON array.
    Faqs {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Export dashboard analytics from a JSON object.
    Analytics {
        #[arg(short, long)]
        input: PathBuf,

        /// Write the raw figures as JSON instead of the overview table.
        #[arg(long)]
        detailed: bool,
    },

    /// Export contacts, products, FAQs and the analytics overview from a
    /// single JSON dump.
    All {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write a summary report of a JSON dump.
    Summary {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let date_range = match (cli.from, cli.to) {
        (Some(from), Some(to)) => Some(DateRange::from_days(from, to)?),
        _ => None,
    };

    let mut options = ExportOptions::new().format(cli.format);
    if let Some(range) = date_range {
        options = options.date_range(range);
    }
    for (key, value) in cli.filters {
        options = options.filter(key, value);
    }

    let exporter = DataExporter::new();
    let files: Vec<ExportFile> = match cli.command {
        Commands::Contacts { input } => {
            let contacts: Vec<Contact> = read_json(&input)?;
            vec![exporter.export_contacts(&contacts, &options)?]
        }
        Commands::Products { input } => {
            let products: Vec<Product> = read_json(&input)?;
            vec![exporter.export_products(&products, &options)?]
        }
        Commands::Faqs { input } => {
            let faqs: Vec<Faq> = read_json(&input)?;
            vec![exporter.export_faqs(&faqs, &options)?]
        }
        Commands::Analytics { input, detailed } => {
            let data: AnalyticsOverview = read_json(&input)?;
            let report = if detailed {
                AnalyticsReport::Detailed
            } else {
                AnalyticsReport::Overview
            };
            vec![exporter.export_analytics(&data, report)?]
        }
        Commands::All { input } => {
            let bundle: ExportBundle = read_json(&input)?;
            exporter.export_all(&bundle)?
        }
        Commands::Summary { input } => {
            let bundle: ExportBundle = read_json(&input)?;
            let stats = ExportStats::from_bundle(&bundle, date_range);
            vec![exporter.export_summary(&stats)]
        }
    };

    for file in &files {
        file.write_to(&cli.output_dir)?;
    }
    info!(
        "Exported {} file(s) to {}",
        files.len(),
        cli.output_dir.display()
    );

    Ok(())
}
