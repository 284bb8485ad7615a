//! Parse command - extract invoice fields from documents into a dataset.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use invq_core::invoice::RuleInvoiceParser;
use invq_core::{Invoice, InvoiceStore};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input files or glob pattern (.pdf or .txt)
    #[arg(required = true)]
    input: String,

    /// Output file (default: dataset path from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Stop at the first unreadable document
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON dataset, readable by `ask`, `chat` and `query`
    Json,
    /// CSV table
    Csv,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let output_path = super::dataset_path(args.output.as_ref(), &config);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to parse",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = RuleInvoiceParser::new();
    let mut invoices = Vec::with_capacity(files.len());
    let mut failed = 0usize;

    for path in &files {
        debug!("Parsing: {}", path.display());
        match parser.parse_file(path) {
            Ok(result) => {
                for warning in &result.warnings {
                    warn!("{}: {}", path.display(), warning);
                }
                invoices.push(result.invoice);
            }
            Err(e) => {
                if args.fail_fast {
                    error!("Failed to parse {}: {}", path.display(), e);
                    anyhow::bail!("Parsing failed for {}: {}", path.display(), e);
                }
                warn!("Failed to parse {}: {}", path.display(), e);
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    match args.format {
        OutputFormat::Json => {
            let store: InvoiceStore = invoices.into_iter().collect();
            store.save(&output_path)?;
        }
        OutputFormat::Csv => write_csv(&output_path, &invoices)?,
    }

    eprintln!(
        "{} Parsed {} of {} files in {:?}; data saved to {}",
        style("✓").green(),
        files.len() - failed,
        files.len(),
        start.elapsed(),
        output_path.display()
    );
    if failed > 0 {
        eprintln!("{} {} files could not be read", style("✗").red(), failed);
    }

    Ok(())
}

fn write_csv(path: &Path, invoices: &[Invoice]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["vendor", "invoice_number", "invoice_date", "due_date", "total"])?;

    for invoice in invoices {
        wtr.write_record([
            invoice.vendor.clone().unwrap_or_default(),
            invoice.invoice_number.clone().unwrap_or_default(),
            invoice.invoice_date.clone().unwrap_or_default(),
            invoice.due_date.clone().unwrap_or_default(),
            invoice.total.map(|t| t.to_string()).unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    fs::write(path, data)?;
    Ok(())
}
