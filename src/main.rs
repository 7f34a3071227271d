use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use trendline::cli::{
    handle_bounds_command, handle_categories_command, handle_report_command, CliContext,
    ReportArgs,
};
use trendline::config::{paths::DATA_DIR_ENV, Settings, TrendlinePaths};

#[derive(Parser)]
#[command(
    name = "trendline",
    version,
    about = "Period reports over a monthly personal-finance ledger",
    long_about = "Trendline reads a ledger of monthly category totals and reports \
                  per-category statistics and an expenses/income/savings chart \
                  whose buckets widen as the selected range grows."
)]
struct Cli {
    /// Ledger to read (SQLite database, or a .json snapshot)
    #[arg(long, global = true, env = "TRENDLINE_DB")]
    db: Option<PathBuf>,

    /// Log debug events to standard error
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report statistics and the chart for a range and selection
    Report(ReportArgs),

    /// List the selectable categories
    #[command(alias = "cats")]
    Categories,

    /// Show the ledger's first and last months and the default range
    Bounds,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    trendline::init_tracing(cli.verbose);

    let paths = TrendlinePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings, cli.db);

    match cli.command {
        Some(Commands::Report(args)) => handle_report_command(&ctx, args)?,
        Some(Commands::Categories) => handle_categories_command(&ctx)?,
        Some(Commands::Bounds) => handle_bounds_command(&ctx)?,
        Some(Commands::Config) => print_config(&ctx),
        None => {
            println!("Trendline - period reports over a monthly ledger");
            println!();
            println!("Run 'trendline --help' for usage information.");
            println!("Run 'trendline report' for the default report.");
        }
    }

    Ok(())
}

fn print_config(ctx: &CliContext) {
    let settings = &ctx.settings;
    println!("Trendline Configuration");
    println!("=======================");
    println!("Base directory: {}", ctx.paths.base_dir().display());
    println!("Settings file:  {}", ctx.paths.settings_file().display());
    println!("Ledger:         {}", ctx.database_path().display());
    println!("({} overrides the base directory)", DATA_DIR_ENV);
    println!();
    println!("Settings:");
    println!(
        "  Initial balance: {} ({})",
        settings.initial_balance.label, settings.initial_balance.category_id
    );
    println!(
        "  Number format:   thousands '{}', decimals '{}', currency '{}', ticks '{}'",
        settings.locale.thousands_separator,
        settings.locale.decimal_separator,
        settings.locale.currency_symbol,
        settings.locale.thousands_suffix
    );
}
