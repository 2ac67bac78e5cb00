//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves configuration and sets up logging
//! - fetches data and builds charts/panels
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{ChartArgs, Command, ExportArgs, PlotArgs, PlotSize};
use crate::config::ApiConfig;
use crate::data::ClimateClient;
use crate::error::{AppError, EXIT_IO};
use crate::report::{Panel, format_panel};

pub mod pipeline;

const DEFAULT_LOG_FILTER: &str = "climate_dash=info";
const ENV_LOG_FILE: &str = "CLIMATE_LOG_FILE";

/// Entry point for the `climate` binary.
pub fn run() -> Result<(), AppError> {
    // `climate` and `climate --api-base URL` behave like `climate tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(matches!(cli.command, Command::Tui))?;

    // Plotting a saved file never touches the network or its config.
    if let Command::Plot(args) = &cli.command {
        return handle_plot(args);
    }

    let config = ApiConfig::from_env(cli.api_base.as_deref())?;
    info!(base_url = %config.base_url, "using climate API");
    let client = ClimateClient::new(config)?;

    match cli.command {
        Command::Charts(size) => handle_charts(&client, size),
        Command::Chart(args) => handle_chart(&client, args),
        Command::News => print_panel(pipeline::load_news(&client)),
        Command::Admin(args) => print_panel(pipeline::load_admin(&client, args.panel)),
        Command::Export(args) => handle_export(&client, args),
        Command::Tui => crate::tui::run(client),
        Command::Plot(_) => Ok(()),
    }
}

fn handle_charts(client: &ClimateClient, size: PlotSize) -> Result<(), AppError> {
    let entries = pipeline::load_dashboard(client)?;
    for entry in &entries {
        match &entry.chart {
            Ok(spec) => println!("{}", crate::plot::render_chart(spec, size.width, size.height)),
            Err(err) => println!("Chart {} ({}) skipped: {err}\n", entry.id, entry.title),
        }
    }
    Ok(())
}

fn handle_chart(client: &ClimateClient, args: ChartArgs) -> Result<(), AppError> {
    let entries = pipeline::load_dashboard(client)?;
    let id = usize::from(args.id);
    let entry = entries
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::usage(format!("No chart {id} on the dashboard.")))?;
    let spec = entry.chart?;
    println!("{}", crate::plot::render_chart(&spec, args.size.width, args.size.height));
    Ok(())
}

fn handle_export(client: &ClimateClient, args: ExportArgs) -> Result<(), AppError> {
    let entries = pipeline::load_dashboard(client)?;
    let file = crate::io::ChartFile::from_entries(&entries, &client.config().base_url);
    crate::io::write_chart_json(&args.out, &file)?;
    info!(
        path = %args.out.display(),
        charts = file.charts.len(),
        skipped = file.skipped.len(),
        "wrote chart file"
    );
    println!(
        "Wrote {} chart(s) to {} ({} skipped).",
        file.charts.len(),
        args.out.display(),
        file.skipped.len()
    );
    Ok(())
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_chart_json(&args.file)?;

    if let Some(id) = args.chart {
        let spec = file
            .chart(id)
            .ok_or_else(|| AppError::usage(format!("Chart {id} is not in {}.", args.file.display())))?;
        println!("{}", crate::plot::render_chart(spec, args.size.width, args.size.height));
        return Ok(());
    }

    for chart in &file.charts {
        println!("{}", crate::plot::render_chart(&chart.spec, args.size.width, args.size.height));
    }
    for skipped in &file.skipped {
        println!("Chart {} ({}) skipped: {}\n", skipped.id, skipped.title, skipped.reason);
    }
    Ok(())
}

fn print_panel(panel: Panel) -> Result<(), AppError> {
    println!("{}", format_panel(&panel));
    if panel.is_success() {
        Ok(())
    } else {
        Err(AppError::new(EXIT_IO, format!("{} failed.", panel.title)))
    }
}

/// Install the tracing subscriber.
///
/// CLI commands log to stderr. The TUI owns the terminal, so it logs to
/// `CLIMATE_LOG_FILE` when set and discards events otherwise.
fn init_logging(tui: bool) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // A subscriber may already be installed (tests, embedding); keep it.
    if !tui {
        let _ = builder.with_writer(std::io::stderr).try_init();
        return Ok(());
    }

    match std::env::var(ENV_LOG_FILE) {
        Ok(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| AppError::usage(format!("Failed to open log file '{path}': {e}")))?;
            let _ = builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init();
        }
        Err(_) => {
            let _ = builder.with_writer(std::io::sink).try_init();
        }
    }
    Ok(())
}

/// Rewrite argv so `climate` defaults to `climate tui`.
///
/// Rules:
/// - `climate`                      -> `climate tui`
/// - `climate --api-base URL`       -> `climate tui --api-base URL`
/// - `climate --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // A leading flag with no subcommand anywhere means "tui flags".
    if arg1.starts_with('-') && !argv.iter().skip(1).any(|a| is_subcommand(a)) {
        argv.insert(1, "tui".to_string());
    }

    argv
}

fn is_subcommand(arg: &str) -> bool {
    matches!(
        arg,
        "charts" | "chart" | "news" | "admin" | "export" | "plot" | "tui"
    )
}
