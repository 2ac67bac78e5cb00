//! Shared "fetch and build" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! batch fetch -> chart composition, and payload fetch -> panel
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::warn;

use crate::cli::AdminPanel;
use crate::compose::{ChartEntry, build_dashboard};
use crate::data::ClimateClient;
use crate::error::AppError;
use crate::report::{self, Panel};

/// Fetch every chart series and build the dashboard.
///
/// A failed fetch fails the whole dashboard; a malformed series only skips
/// the charts built from it.
pub fn load_dashboard(client: &ClimateClient) -> Result<Vec<ChartEntry>, AppError> {
    let batch = client.fetch_chart_batch()?;
    Ok(build_dashboard(&batch))
}

/// Fetch the news feed as a panel. Fetch failures become an error panel.
pub fn load_news(client: &ClimateClient) -> Panel {
    match client.fetch_news() {
        Ok(feed) => report::news_panel(&feed),
        Err(err) => failed(client, "Climate News", err),
    }
}

/// Fetch one admin panel. Fetch failures become an error panel.
pub fn load_admin(client: &ClimateClient, panel: AdminPanel) -> Panel {
    match panel {
        AdminPanel::Status => match client.fetch_database_status() {
            Ok(status) => report::database_status_panel(&status),
            Err(err) => failed(client, "Database Connection Status", err),
        },
        AdminPanel::Tables => match client.fetch_database_contents() {
            Ok(contents) => report::database_contents_panel(&contents),
            Err(err) => failed(client, "Read Database", err),
        },
        AdminPanel::Api => match client.fetch_api_details() {
            Ok(details) => report::api_details_panel(&details),
            Err(err) => failed(client, "API Details", err),
        },
        AdminPanel::Site => report::site_details_panel(),
    }
}

fn failed(client: &ClimateClient, title: &str, err: AppError) -> Panel {
    warn!(panel = title, error = %err, "request failed");
    report::connection_error_panel(title, &err, client.config())
}
