//! Income CLI commands
//!
//! Implements CLI commands for recording income per calendar month.

use clap::Subcommand;

use super::{parse_money, parse_month};
use crate::config::Settings;
use crate::display::format_income_list;
use crate::error::PocketResult;
use crate::models::{Income, IncomeUpdate};
use crate::tracker::Tracker;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income for a month
    Add {
        /// Amount received (e.g., "5000" or "5000.00")
        amount: String,

        /// Where the income came from
        #[arg(short, long, default_value = "Salary")]
        source: String,

        /// Month (e.g., "2025-01" for January 2025, defaults to current)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List income records
    List {
        /// Only show one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Edit an income record
    Edit {
        /// Income ID
        income: String,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New source
        #[arg(short, long)]
        source: Option<String>,

        /// New month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove an income record
    Remove {
        /// Income ID
        income: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    tracker: &mut Tracker,
    settings: &Settings,
    cmd: IncomeCommands,
) -> PocketResult<()> {
    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            month,
        } => {
            let month = parse_month(month.as_deref(), tracker)?;
            let income = tracker.add_income(Income::new(parse_money(&amount)?, source.trim(), month))?;

            println!(
                "Recorded {} from {} for {}",
                settings.format_money(income.amount),
                income.source,
                month.label()
            );
            println!(
                "Income for {}: {}",
                month.label(),
                settings.format_money(tracker.income_service().income_for_month(month))
            );
        }

        IncomeCommands::List { month } => {
            let month = month
                .as_deref()
                .map(|m| parse_month(Some(m), tracker))
                .transpose()?;

            let mut incomes: Vec<&Income> = tracker
                .incomes()
                .iter()
                .filter(|i| month.map_or(true, |m| i.month == m))
                .collect();
            incomes.sort_by(|a, b| b.month.cmp(&a.month));

            print!("{}", format_income_list(&incomes, &settings.currency_symbol));
        }

        IncomeCommands::Edit {
            income,
            amount,
            source,
            month,
        } => {
            let id = tracker.find_income(&income)?.id;
            let update = IncomeUpdate {
                amount: amount.as_deref().map(parse_money).transpose()?,
                source: source.map(|s| s.trim().to_string()),
                month: month
                    .as_deref()
                    .map(|m| parse_month(Some(m), tracker))
                    .transpose()?,
            };

            if update.amount.is_none() && update.source.is_none() && update.month.is_none() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = tracker.update_income(id, update)?;
            println!(
                "Updated income: {} from {} for {}",
                settings.format_money(updated.amount),
                updated.source,
                updated.month.label()
            );
        }

        IncomeCommands::Remove { income } => {
            let id = tracker.find_income(&income)?.id;
            let removed = tracker.delete_income(id)?;
            println!(
                "Removed income: {} from {} ({})",
                settings.format_money(removed.amount),
                removed.source,
                removed.month.label()
            );
        }
    }

    Ok(())
}
