//! `stockmap` -- warehouse inventory dashboard client.
//!
//! Talks to the inventory API to show floor-map occupancy, resolve
//! scanned barcodes, print and export inventory reports, and perform the
//! report page's safe-stock and delete actions.
//!
//! Configuration comes from the environment (see
//! [`DashboardConfig::from_env`]); set `LOG_FORMAT=json` for JSON logs.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockmap_client::{InventoryApi, InventorySource};
use stockmap_core::report::ReportTab;
use stockmap_dashboard::commands;
use stockmap_dashboard::DashboardConfig;

/// Warehouse inventory dashboard.
#[derive(Parser, Debug)]
#[command(name = "stockmap", about = "Warehouse inventory dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll occupancy stats and resolve barcodes read from stdin.
    Overview,

    /// Print a report projection.
    Report {
        /// Projection: item, location or bom.
        #[arg(long, default_value = "item")]
        tab: ReportTab,
    },

    /// Export a report projection to an .xlsx file.
    Export {
        /// Projection: item, location or bom.
        #[arg(long, default_value = "item")]
        tab: ReportTab,
        /// Output directory (defaults to EXPORT_DIR).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Set an item's safe-stock threshold.
    SetSafeStock {
        barcode: String,
        /// New value; non-numeric input counts as 0.
        value: String,
    },

    /// Delete an item that holds no stock.
    Delete {
        barcode: String,
        /// Confirmation password.
        #[arg(long)]
        password: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockmap_dashboard=info,stockmap=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = DashboardConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let api = InventoryApi::new(&config.api_url, config.request_timeout).unwrap_or_else(|e| {
        tracing::error!(error = %e, api_url = %config.api_url, "Failed to build API client");
        std::process::exit(1);
    });

    tracing::info!(api_url = %config.api_url, "Starting stockmap");
    let source: Arc<dyn InventorySource> = Arc::new(api);

    let result = match cli.command {
        Commands::Overview => commands::overview(source, &config).await,
        Commands::Report { tab } => commands::report(source, &config, tab).await,
        Commands::Export { tab, out } => commands::export(source, &config, tab, out).await,
        Commands::SetSafeStock { barcode, value } => {
            commands::set_safe_stock(source, &config, &barcode, &value).await
        }
        Commands::Delete { barcode, password } => {
            commands::delete(source, &config, &barcode, &password).await
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}
