use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use pocketplan::cli::{
    handle_analyze_command, handle_expense_command, handle_goal_command, handle_income_command,
    handle_notify_command, handle_plan_command, open_tracker, TODAY_ENV,
};
use pocketplan::config::{PocketPaths, Settings};
use pocketplan::display::format_dashboard;

#[derive(Parser)]
#[command(
    name = "pocketplan",
    version,
    about = "Personal finance tracker for recurring expenses and savings goals",
    long_about = "PocketPlan tracks recurring monthly expenses, their due dates and \
                  paid status, monthly income, and savings plans for purchases, \
                  from the command line."
)]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, env = TODAY_ENV, value_name = "DATE")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Overview of this month
    #[command(alias = "dash")]
    Dashboard,

    /// Recurring expense commands
    #[command(subcommand, alias = "exp")]
    Expense(pocketplan::cli::ExpenseCommands),

    /// Income commands
    #[command(subcommand)]
    Income(pocketplan::cli::IncomeCommands),

    /// Due-date notification commands
    #[command(subcommand, alias = "notifications")]
    Notify(pocketplan::cli::NotifyCommands),

    /// Project a savings plan for a purchase
    Plan(pocketplan::cli::PlanArgs),

    /// Purchase goal commands
    #[command(subcommand)]
    Goal(pocketplan::cli::GoalCommands),

    /// AI analyses of your expenses
    #[command(subcommand)]
    Analyze(pocketplan::cli::AnalyzeCommands),

    /// Write the default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    pocketplan::init_tracing();
    let cli = Cli::parse();

    let paths = PocketPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Initialized PocketPlan at: {}", paths.base_dir().display());
            println!("Settings written to {}", paths.settings_file().display());
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("PocketPlan Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Snapshot file:    {}", paths.snapshot_file().display());
            println!();
            println!("Settings:");
            println!("  Profile:             {}", settings.user_id());
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Upcoming window:     {} days", settings.upcoming_window_days);
            println!("  Check interval:      {}s", settings.check_interval().as_secs());
            match &settings.remote.url {
                Some(url) => println!("  Remote storage:      {} ({})", url, settings.remote.bucket),
                None => println!("  Remote storage:      disabled"),
            }
            println!("  Analysis model:      {}", settings.analysis.model);
            return Ok(());
        }
        None => {
            println!("PocketPlan - recurring expenses and savings goals");
            println!();
            println!("Run 'pocketplan --help' for usage information.");
            println!("Run 'pocketplan dashboard' for this month's overview.");
            return Ok(());
        }
        Some(command) => command,
    };

    let mut tracker = open_tracker(&paths, &settings, cli.today)?;

    match command {
        Commands::Dashboard => {
            print!(
                "{}",
                format_dashboard(&tracker.dashboard(), &settings.currency_symbol)
            );
        }
        Commands::Expense(cmd) => handle_expense_command(&mut tracker, &settings, cmd)?,
        Commands::Income(cmd) => handle_income_command(&mut tracker, &settings, cmd)?,
        Commands::Notify(cmd) => handle_notify_command(&mut tracker, &settings, cmd)?,
        Commands::Plan(args) => handle_plan_command(&mut tracker, &settings, args)?,
        Commands::Goal(cmd) => handle_goal_command(&mut tracker, &settings, cmd)?,
        Commands::Analyze(cmd) => handle_analyze_command(&tracker, &settings, cmd)?,
        Commands::Init | Commands::Config => {}
    }

    if let Some(error) = tracker.last_save_error() {
        eprintln!("Warning: changes could not be saved: {}", error);
    }

    Ok(())
}
