use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

use payable::config::{
    config_dir, load_config, load_state, resolve_path, save_state, Config, CONFIG_TEMPLATE,
};
use payable::error::{PayableError, Result};
use payable::ledger::{Filters, GroupOrder, Ledger};
use payable::report::{render_payment_headers, render_table, ReportData, ReportPayment};
use payable::source::{
    load_snapshot, resolve_base_url, write_snapshot, DataSource, FileSource, HttpSource,
};
use payable::Snapshot;

#[derive(Parser)]
#[command(name = "payable")]
#[command(version, about = "Ordered / Payable / Total reconciliation for garment sourcing", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config or ~/.payable)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Read data from a db.json file instead of the API
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// API base URL (overrides PAYABLE_API_BASE_URL and config.toml)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Style number to match exactly ("All" for any)
    #[arg(long)]
    style: Option<String>,

    /// Fabric name to match exactly ("All" for any)
    #[arg(long)]
    fabric: Option<String>,

    /// Fabric color to match exactly ("All" for any)
    #[arg(long)]
    color: Option<String>,
}

impl FilterArgs {
    fn to_filters(&self) -> Filters {
        Filters {
            style_number: self.style.clone(),
            fabric_name: self.fabric.clone(),
            color_name: self.color.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Show the grouped Ordered / Payable / Total table
    Table {
        #[command(flatten)]
        filters: FilterArgs,

        /// Ignore filters saved with 'filter set'
        #[arg(long)]
        no_saved_filters: bool,

        /// Sales order order: first-seen or style
        #[arg(long)]
        sort: Option<String>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List payments with due date, paid date, attachments and memo
    Payments,

    /// List the values available to each filter
    Options,

    /// Manage saved filters
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },

    /// Save the loaded data as a db.json snapshot
    Snapshot {
        /// Output file
        #[arg(short, long, default_value = "db.json")]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum FilterAction {
    /// Save filter values (merged with the ones already saved)
    Set {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show saved filters
    Show,

    /// Remove saved filters
    Clear {
        /// Clear even when filters are active
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "payable=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    let source_args = SourceArgs {
        db: cli.db,
        base_url: cli.base_url,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Table {
            filters,
            no_saved_filters,
            sort,
            json,
        } => cmd_table(
            &cfg_dir,
            &source_args,
            &filters.to_filters(),
            no_saved_filters,
            sort,
            json,
        ),
        Commands::Payments => cmd_payments(&cfg_dir, &source_args),
        Commands::Options => cmd_options(&cfg_dir, &source_args),
        Commands::Filter { action } => match action {
            FilterAction::Set { filters } => cmd_filter_set(&cfg_dir, &filters.to_filters()),
            FilterAction::Show => cmd_filter_show(&cfg_dir),
            FilterAction::Clear { yes } => cmd_filter_clear(&cfg_dir, yes),
        },
        Commands::Snapshot { output } => cmd_snapshot(&cfg_dir, &source_args, &output),
    }
}

struct SourceArgs {
    db: Option<PathBuf>,
    base_url: Option<String>,
}

/// Pick the data source: --db, then --base-url, then config db_path, then the API
fn open_source(config: &Config, cfg_dir: &Path, args: &SourceArgs) -> Box<dyn DataSource> {
    if let Some(db) = &args.db {
        return Box::new(FileSource::new(db.clone()));
    }
    if args.base_url.is_none() {
        if let Some(db_path) = &config.source.db_path {
            return Box::new(FileSource::new(resolve_path(db_path, cfg_dir)));
        }
    }

    let base_url = resolve_base_url(args.base_url.as_deref(), config.source.base_url.as_deref());
    Box::new(HttpSource::new(
        &base_url,
        Duration::from_secs(config.source.timeout_secs),
    ))
}

fn load(cfg_dir: &Path, args: &SourceArgs) -> Result<(Config, Snapshot)> {
    let config = load_config(cfg_dir)?;
    let source = open_source(&config, cfg_dir, args);
    let snapshot = load_snapshot(source.as_ref())?;
    Ok((config, snapshot))
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.join("config.toml").exists() {
        return Err(PayableError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized payable config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your API or a db.json:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Show the table:                     payable table");

    Ok(())
}

/// Render the grouped table
fn cmd_table(
    cfg_dir: &PathBuf,
    source_args: &SourceArgs,
    flag_filters: &Filters,
    no_saved_filters: bool,
    sort: Option<String>,
    json: bool,
) -> Result<()> {
    let (config, snapshot) = load(cfg_dir, source_args)?;

    let filters = if no_saved_filters {
        flag_filters.clone()
    } else {
        load_state(cfg_dir)?.filters.merged(flag_filters)
    };

    let order: GroupOrder = match sort.or_else(|| config.display.sort.clone()) {
        Some(s) => s.parse()?,
        None => GroupOrder::default(),
    };

    let ledger = Ledger::build(&snapshot, &filters, order);
    let report = ReportData::from_ledger(&ledger, &config.display.currency_symbol);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if filters.is_active() {
        println!("Filters: {}", filters.describe());
    }

    if report.groups.is_empty() {
        println!("No consumptions match the current filters.");
    } else {
        if !report.payments.is_empty() {
            println!("{}", render_payment_headers(&report.payments));
        }
        println!("{}", render_table(&report));
        println!();
        println!(
            "Sales orders: {}  Items: {}",
            report.groups.len(),
            ledger
                .grouping
                .groups
                .iter()
                .map(|g| g.item_count())
                .sum::<usize>()
        );
    }

    if !report.ungrouped.is_empty() {
        let ids: Vec<String> = report.ungrouped.iter().map(|id| id.to_string()).collect();
        println!(
            "Left out {} item(s) without sales order or supplier item code: {}",
            ids.len(),
            ids.join(", ")
        );
    }

    Ok(())
}

/// List payments
fn cmd_payments(cfg_dir: &PathBuf, source_args: &SourceArgs) -> Result<()> {
    let (_, snapshot) = load(cfg_dir, source_args)?;

    if snapshot.payments.is_empty() {
        println!("No payments found.");
        return Ok(());
    }

    let payments: Vec<ReportPayment> = snapshot.payments.iter().map(ReportPayment::from).collect();
    println!("{}", render_payment_headers(&payments));

    Ok(())
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "FILTER")]
    filter: String,
    #[tabled(rename = "VALUES")]
    values: String,
}

/// List filter options
fn cmd_options(cfg_dir: &PathBuf, source_args: &SourceArgs) -> Result<()> {
    let (_, snapshot) = load(cfg_dir, source_args)?;
    let ledger = Ledger::build(&snapshot, &Filters::default(), GroupOrder::default());
    let options = &ledger.options;

    let rows = vec![
        OptionRow {
            filter: "--style".to_string(),
            values: options.style_numbers.join("\n"),
        },
        OptionRow {
            filter: "--fabric".to_string(),
            values: options.fabric_names.join("\n"),
        },
        OptionRow {
            filter: "--color".to_string(),
            values: options.color_names.join("\n"),
        },
    ];

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn cmd_filter_set(cfg_dir: &PathBuf, filters: &Filters) -> Result<()> {
    let mut state = load_state(cfg_dir)?;
    state.filters = state.filters.merged(filters);
    save_state(cfg_dir, &state)?;

    println!("Saved filters: {}", state.filters.describe());
    Ok(())
}

fn cmd_filter_show(cfg_dir: &PathBuf) -> Result<()> {
    let state = load_state(cfg_dir)?;
    println!("Saved filters: {}", state.filters.describe());
    Ok(())
}

fn cmd_filter_clear(cfg_dir: &PathBuf, yes: bool) -> Result<()> {
    let mut state = load_state(cfg_dir)?;

    if state.filters.is_active() && !yes {
        return Err(PayableError::ActiveFilters(state.filters.describe()));
    }

    state.filters.clear();
    save_state(cfg_dir, &state)?;

    println!("Filters cleared");
    Ok(())
}

/// Write a db.json snapshot
fn cmd_snapshot(cfg_dir: &PathBuf, source_args: &SourceArgs, output: &Path) -> Result<()> {
    let (_, snapshot) = load(cfg_dir, source_args)?;
    write_snapshot(&snapshot, output)?;

    println!("Wrote {}", output.display());
    println!("  Consumptions: {}", snapshot.consumptions.len());
    println!("  Payments:     {}", snapshot.payments.len());
    println!("  Breakdowns:   {}", snapshot.payment_breakdowns.len());
    Ok(())
}
