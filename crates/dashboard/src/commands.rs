//! Subcommand implementations for the `stockmap` binary.
//!
//! Each command takes the inventory source and loaded configuration and
//! prints JSON to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use stockmap_client::InventorySource;
use stockmap_core::report::ReportTab;

use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::overview::{OverviewHandle, OverviewSettings};
use crate::report::ReportController;

fn print_json<T: Serialize>(value: &T) -> DashboardResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn controller(source: Arc<dyn InventorySource>, config: &DashboardConfig) -> ReportController {
    ReportController::new(
        source,
        config.auth_token.clone(),
        config.safe_stock_on_failure,
    )
}

// ---------------------------------------------------------------------------
// overview
// ---------------------------------------------------------------------------

/// Run the overview until stdin closes or Ctrl-C.
///
/// Every stdin line is fed to the search as a new query value; stats and
/// search results are printed as they change.
pub async fn overview(
    source: Arc<dyn InventorySource>,
    config: &DashboardConfig,
) -> DashboardResult<()> {
    let handle = OverviewHandle::start(
        source,
        config.classifier()?,
        OverviewSettings::from(config),
    );
    let mut stats_rx = handle.subscribe_stats();
    let mut search_rx = handle.subscribe_search();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = stats_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let stats = *stats_rx.borrow_and_update();
                print_json(&stats)?;
            }
            changed = search_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let result = search_rx.borrow_and_update().clone();
                match result {
                    Some(result) => print_json(&result)?,
                    None => println!("null"),
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(query) => handle.set_query(query),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

// ---------------------------------------------------------------------------
// report / export
// ---------------------------------------------------------------------------

/// Print one report projection.
pub async fn report(
    source: Arc<dyn InventorySource>,
    config: &DashboardConfig,
    tab: ReportTab,
) -> DashboardResult<()> {
    let mut report = controller(source, config);
    report.fetch().await?;
    report.select_tab(tab);

    match report.active_tab() {
        ReportTab::Item => print_json(&report.items()),
        ReportTab::Location => print_json(&report.locations()),
        ReportTab::Bom => print_json(&report.bom_rows()),
    }
}

/// Export one report projection to an `.xlsx` file and print its path.
pub async fn export(
    source: Arc<dyn InventorySource>,
    config: &DashboardConfig,
    tab: ReportTab,
    out: Option<PathBuf>,
) -> DashboardResult<()> {
    let mut report = controller(source, config);
    report.fetch().await?;
    report.select_tab(tab);

    let dir = out.unwrap_or_else(|| config.export_dir.clone());
    let path = report.export_to(&dir)?;
    println!("{}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// writes
// ---------------------------------------------------------------------------

pub async fn set_safe_stock(
    source: Arc<dyn InventorySource>,
    config: &DashboardConfig,
    barcode: &str,
    value: &str,
) -> DashboardResult<()> {
    let mut report = controller(source, config);
    report.fetch().await?;
    report.edit_safe_stock(barcode, value)?;

    if let Err(e) = report.commit_safe_stock(barcode, value).await {
        if let Some(notice) = report.take_notice() {
            eprintln!("{notice}");
        }
        return Err(e);
    }

    if let Some(item) = report.item(barcode) {
        print_json(&item)?;
    }
    Ok(())
}

/// Delete a zero-stock item after password confirmation.
pub async fn delete(
    source: Arc<dyn InventorySource>,
    config: &DashboardConfig,
    barcode: &str,
    password: &str,
) -> DashboardResult<()> {
    let mut report = controller(source, config);
    report.fetch().await?;

    report.open_delete(barcode)?;
    report.set_delete_password(password);
    let result = report.submit_delete().await;

    if let Some(notice) = report.take_notice() {
        match result {
            Ok(()) => println!("{notice}"),
            Err(_) => eprintln!("{notice}"),
        }
    }
    result
}
