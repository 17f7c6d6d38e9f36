use analyzer::{DashboardSession, DashboardView, MetricRow, SectionLabels};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use configuration::{ConfigOverrides, Settings, init_tracing};
use core_types::{Language, Period, Selection};
use dataset::{load_raw_reports, load_snapshot, prepare_observations, write_snapshot};
use i18n::Catalog;
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the pension dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let settings = cli.overrides.load()?;
    let _guard = init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Show(args) => handle_show(args, &settings).await,
        Commands::Periods(args) => handle_periods(args, &settings).await,
        Commands::Prepare(args) => handle_prepare(args).await,
        Commands::Serve => web_server::run_server(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compares pension fund managers by growth, returns, extremes, participants
/// and expense ratio.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the five ranked tables for one selection.
    Show(ShowArgs),
    /// List the period codes offered for a fund type and manager.
    Periods(PeriodsArgs),
    /// Convert raw quarterly reports into an observation snapshot.
    Prepare(PrepareArgs),
    /// Serve the dashboard as a JSON API.
    Serve,
}

#[derive(Args)]
struct ShowArgs {
    /// The fund type to compare (e.g. "TIPF" or "1996-2002").
    #[arg(long)]
    fund_type: Option<String>,

    /// The manager to highlight.
    #[arg(long)]
    manager: Option<String>,

    /// "YTD", "ALL" or a number of trailing years.
    #[arg(long)]
    period: Option<Period>,

    /// "en" or "lt".
    #[arg(long)]
    lang: Option<Language>,

    /// Print the dashboard view as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PeriodsArgs {
    #[arg(long)]
    fund_type: Option<String>,

    #[arg(long)]
    manager: Option<String>,
}

#[derive(Args)]
struct PrepareArgs {
    /// JSON array of raw quarterly report rows.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the observation snapshot.
    #[arg(long)]
    output: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the snapshot and catalogue and opens a session on the requested
/// selection, falling back to the configured defaults.
async fn open_session(
    settings: &Settings,
    fund_type: Option<String>,
    manager: Option<String>,
    period: Option<Period>,
    language: Option<Language>,
) -> anyhow::Result<DashboardSession> {
    let dataset = load_snapshot(&settings.data.snapshot_path)
        .await
        .with_context(|| {
            format!(
                "failed to load snapshot {}",
                settings.data.snapshot_path.display()
            )
        })?;
    if let Some(fund_type) = &fund_type {
        if !dataset.has_fund_type(fund_type) {
            anyhow::bail!(
                "unknown fund type '{fund_type}'; available: {}",
                dataset.fund_types().join(", ")
            );
        }
    }
    let catalog = Catalog::load(settings.data.locales_dir.as_deref())?;

    let defaults = &settings.dashboard;
    let selection = Selection {
        fund_type: fund_type.or_else(|| defaults.default_fund_type.clone()),
        manager: manager.or_else(|| defaults.default_manager.clone()),
        period: period.unwrap_or(defaults.default_period),
        language: language.unwrap_or(defaults.default_language),
    };
    let requested = selection.clone();
    let session = DashboardSession::with_selection(
        Arc::new(dataset),
        Arc::new(catalog),
        defaults,
        selection,
    );

    let actual = session.selection();
    if requested.manager.is_some() && actual.manager != requested.manager {
        tracing::warn!(
            requested = ?requested.manager,
            selected = ?actual.manager,
            "Manager not offered for this fund type; using the first one."
        );
    }
    if actual.period != requested.period {
        tracing::warn!(
            requested = %requested.period,
            "Period not offered for this manager; falling back to YTD."
        );
    }
    Ok(session)
}

async fn handle_show(args: ShowArgs, settings: &Settings) -> anyhow::Result<()> {
    let session = open_session(
        settings,
        args.fund_type,
        args.manager,
        args.period,
        args.lang,
    )
    .await?;
    let view = session.view();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

async fn handle_periods(args: PeriodsArgs, settings: &Settings) -> anyhow::Result<()> {
    let session = open_session(settings, args.fund_type, args.manager, None, None).await?;
    let codes: Vec<String> = session.periods().iter().map(Period::code).collect();
    println!("{}", codes.join(" "));
    Ok(())
}

async fn handle_prepare(args: PrepareArgs) -> anyhow::Result<()> {
    let raw = load_raw_reports(&args.input).await?;
    let total = raw.len();
    let prepared = prepare_observations(raw);
    write_snapshot(&args.output, &prepared.observations).await?;

    println!(
        "Wrote {} observations to {} ({} of {} rows dropped).",
        prepared.observations.len(),
        args.output.display(),
        prepared.dropped,
        total
    );
    Ok(())
}

// ==============================================================================
// Terminal Rendering
// ==============================================================================

fn print_view(view: &DashboardView) {
    println!("{}", view.title);
    let selection = &view.selection;
    println!(
        "{}: {}  {}: {}  {}: {}",
        view.controls.fund_type,
        selection.fund_type.as_deref().unwrap_or("-"),
        view.controls.manager,
        selection.manager.as_deref().unwrap_or("-"),
        view.controls.period,
        view.periods
            .iter()
            .find(|p| p.selected)
            .map_or_else(|| selection.period.code(), |p| p.label.clone()),
    );
    if !view.date_range_label.is_empty() {
        println!("{}", view.date_range_label);
    }

    let sections = &view.sections;
    let tables = &view.tables;
    print_section(&sections.growth, &tables.growth);
    print_section(&sections.annualized, &tables.annualized);
    print_section(&sections.extremes, &tables.extremes);
    print_section(&sections.participants, &tables.participants);
    print_section(&sections.expenses, &tables.expenses);
}

fn print_section<R: MetricRow>(labels: &SectionLabels, rows: &[R]) {
    println!("\n{}", labels.title);
    println!("{}", render_table(labels, rows));
}

/// Positive values green, negative red, the selected manager's row bold.
fn render_table<R: MetricRow>(labels: &SectionLabels, rows: &[R]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(labels.columns.clone());

    for row in rows {
        let style = |cell: Cell| {
            if row.highlighted() {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        };
        let mut cells = vec![style(Cell::new(row.manager()))];
        for value in row.cells() {
            let cell = match value.chars().next() {
                Some('+') => Cell::new(value).fg(Color::Green),
                Some('-') => Cell::new(value).fg(Color::Red),
                _ => Cell::new(value),
            };
            cells.push(style(cell));
        }
        table.add_row(cells);
    }
    table
}
