//! Command-line parsing for the climate dashboard client.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! fetching, chart composition and presentation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "climate", version, about = "Climate data dashboard for the terminal")]
pub struct Cli {
    /// API base URL (overrides CLIMATE_API_BASE).
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch all series and print every dashboard chart.
    Charts(PlotSize),
    /// Fetch all series and print one dashboard chart (1-9).
    Chart(ChartArgs),
    /// Print the climate news feed.
    News,
    /// Print an admin diagnostics panel.
    Admin(AdminArgs),
    /// Fetch all series and write the built charts to a JSON file.
    Export(ExportArgs),
    /// Plot charts from a previously exported JSON file (no network).
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    Tui,
}

#[derive(Debug, Args, Clone, Copy)]
pub struct PlotSize {
    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Dashboard position of the chart.
    #[arg(value_parser = clap::value_parser!(u8).range(1..=9))]
    pub id: u8,

    #[command(flatten)]
    pub size: PlotSize,
}

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[arg(value_enum)]
    pub panel: AdminPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdminPanel {
    /// Database connection status and row counts.
    Status,
    /// Database table contents.
    Tables,
    /// API endpoints and news API status.
    Api,
    /// Static site information.
    Site,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output JSON path.
    #[arg(long, value_name = "JSON")]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Chart JSON file produced by `climate export`.
    #[arg(long, value_name = "JSON")]
    pub file: PathBuf,

    /// Only plot this chart.
    #[arg(long)]
    pub chart: Option<usize>,

    #[command(flatten)]
    pub size: PlotSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_base_after_subcommand() {
        let cli = Cli::parse_from(["climate", "chart", "7", "--api-base", "http://h/api"]);
        assert_eq!(cli.api_base.as_deref(), Some("http://h/api"));
        match cli.command {
            Command::Chart(args) => {
                assert_eq!(args.id, 7);
                assert_eq!(args.size.width, 100);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_chart() {
        assert!(Cli::try_parse_from(["climate", "chart", "10"]).is_err());
    }
}
