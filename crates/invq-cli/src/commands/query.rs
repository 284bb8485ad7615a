//! Query command - run an invoice query directly, without the language model.

use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use invq_core::{InvoiceStore, ToolCall};

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    /// Invoice dataset (default: dataset path from config)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: QueryCommand,
}

#[derive(Subcommand)]
enum QueryCommand {
    /// Invoices due between today and today + days
    Due {
        /// Window length in days
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Total amount billed by a vendor (case-insensitive)
    VendorTotal {
        /// Vendor name
        name: String,
    },

    /// Vendors whose billed total exceeds a threshold
    Above {
        /// Threshold amount
        #[arg(long, default_value = "2000")]
        threshold: Decimal,
    },
}

impl QueryCommand {
    fn into_call(self) -> ToolCall {
        match self {
            QueryCommand::Due { days } => ToolCall::InvoicesDueInDays { days },
            QueryCommand::VendorTotal { name } => ToolCall::TotalForVendor { vendor_name: name },
            QueryCommand::Above { threshold } => ToolCall::VendorsAboveAmount { threshold },
        }
    }
}

pub async fn run(args: QueryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = InvoiceStore::load_or_empty(&super::dataset_path(args.dataset.as_ref(), &config));

    let call = args.command.into_call();
    debug!(tool = %call.tool(), ?call, "running query");

    let today = Local::now().date_naive();
    println!("{}", call.execute(&store, today).render());
    Ok(())
}
