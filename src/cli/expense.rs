//! Expense CLI commands
//!
//! Implements CLI commands for recurring expenses and their monthly
//! paid status.

use clap::Subcommand;

use super::{clearable, parse_date, parse_money, parse_month};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{PocketError, PocketResult};
use crate::models::{Expense, ExpenseCategory, ExpenseUpdate};
use crate::tracker::Tracker;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a recurring monthly expense
    Add {
        /// Expense name
        name: String,

        /// Monthly value (e.g., "49.90")
        value: String,

        /// Day of the month it is due (1-31)
        #[arg(short, long)]
        due_day: Option<u8>,

        /// Category (subscriptions, education, housing, transport, health, other)
        #[arg(short, long, default_value = "other")]
        category: String,

        /// Payment method
        #[arg(short, long)]
        method: Option<String>,

        /// Notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Date the expense ends (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
    },

    /// List expenses with their paid status
    List {
        /// Month to show paid status for (YYYY-MM, defaults to current)
        #[arg(short, long)]
        month: Option<String>,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Include inactive expenses
        #[arg(short, long)]
        all: bool,
    },

    /// Show expense details
    Show {
        /// Expense name or ID
        expense: String,
    },

    /// Edit an expense
    Edit {
        /// Expense name or ID
        expense: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New monthly value
        #[arg(short, long)]
        value: Option<String>,

        /// New due day (0 clears it)
        #[arg(short, long)]
        due_day: Option<u8>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New payment method (empty clears it)
        #[arg(short, long)]
        method: Option<String>,

        /// New notes (empty clears them)
        #[arg(short, long)]
        notes: Option<String>,

        /// New end date (YYYY-MM-DD, empty clears it)
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Delete an expense and its payment history
    Remove {
        /// Expense name or ID
        expense: String,
    },

    /// Switch an expense between active and inactive
    Toggle {
        /// Expense name or ID
        expense: String,
    },

    /// Mark an expense paid for a month
    Pay {
        /// Expense name or ID
        expense: String,

        /// Month (YYYY-MM, defaults to current)
        #[arg(short, long)]
        month: Option<String>,

        /// Amount actually paid (defaults to the expense value)
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Clear the paid status for a month
    Unpay {
        /// Expense name or ID
        expense: String,

        /// Month (YYYY-MM, defaults to current)
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn parse_category(input: &str) -> PocketResult<ExpenseCategory> {
    input.parse().map_err(PocketError::Validation)
}

/// Handle an expense command
pub fn handle_expense_command(
    tracker: &mut Tracker,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> PocketResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            name,
            value,
            due_day,
            category,
            method,
            notes,
            end_date,
        } => {
            let mut expense = Expense::new(name.trim(), parse_money(&value)?, parse_category(&category)?);
            expense.due_day = due_day;
            expense.payment_method = clearable(method).flatten();
            expense.notes = clearable(notes).flatten();
            expense.end_date = end_date.as_deref().map(parse_date).transpose()?;

            let expense = tracker.add_expense(expense)?;
            println!(
                "Added expense: {} ({}/month)",
                expense.name,
                settings.format_money(expense.value)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            month,
            category,
            all,
        } => {
            let month = parse_month(month.as_deref(), tracker)?;
            let category = category.as_deref().map(parse_category).transpose()?;

            let expenses: Vec<Expense> = tracker
                .expenses()
                .iter()
                .filter(|e| all || e.is_active)
                .filter(|e| category.map_or(true, |c| e.category == c))
                .cloned()
                .collect();

            print!(
                "{}",
                format_expense_list(&expenses, month, |e| tracker.is_paid(e.id, month), symbol)
            );
            if !expenses.is_empty() {
                println!();
                println!(
                    "Monthly total (active): {}",
                    settings.format_money(tracker.expense_service().total_monthly())
                );
            }
        }

        ExpenseCommands::Show { expense } => {
            let expense = tracker.find_expense(&expense)?;
            print!(
                "{}",
                format_expense_details(expense, tracker.is_paid_this_month(expense.id), symbol)
            );
        }

        ExpenseCommands::Edit {
            expense,
            name,
            value,
            due_day,
            category,
            method,
            notes,
            end_date,
        } => {
            let id = tracker.find_expense(&expense)?.id;
            let end_date = match end_date {
                Some(text) if text.trim().is_empty() => Some(None),
                Some(text) => Some(Some(parse_date(&text)?)),
                None => None,
            };
            let update = ExpenseUpdate {
                name: name.map(|n| n.trim().to_string()),
                value: value.as_deref().map(parse_money).transpose()?,
                due_day: due_day.map(|d| (d != 0).then_some(d)),
                category: category.as_deref().map(parse_category).transpose()?,
                payment_method: clearable(method),
                notes: clearable(notes),
                end_date,
                is_active: None,
            };

            if update.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = tracker.update_expense(id, update)?;
            println!("Updated expense: {}", updated.name);
        }

        ExpenseCommands::Remove { expense } => {
            let id = tracker.find_expense(&expense)?.id;
            let removed = tracker.delete_expense(id)?;
            println!("Deleted expense: {}", removed.name);
        }

        ExpenseCommands::Toggle { expense } => {
            let found = tracker.find_expense(&expense)?;
            let (id, name) = (found.id, found.name.clone());
            let active = tracker.toggle_expense(id)?;
            println!(
                "{} is now {}",
                name,
                if active { "active" } else { "inactive" }
            );
        }

        ExpenseCommands::Pay {
            expense,
            month,
            amount,
        } => {
            let month = parse_month(month.as_deref(), tracker)?;
            let amount = amount.as_deref().map(parse_money).transpose()?;
            let found = tracker.find_expense(&expense)?;
            let (id, name) = (found.id, found.name.clone());

            let record = tracker.mark_paid(id, month, amount)?;
            println!(
                "Marked {} paid for {} ({})",
                name,
                month.label(),
                settings.format_money(record.paid_value.unwrap_or_default())
            );
        }

        ExpenseCommands::Unpay { expense, month } => {
            let month = parse_month(month.as_deref(), tracker)?;
            let found = tracker.find_expense(&expense)?;
            let (id, name) = (found.id, found.name.clone());

            if tracker.unmark_paid(id, month) {
                println!("Marked {} unpaid for {}", name, month.label());
            } else {
                println!("{} was not marked paid for {}", name, month.label());
            }
        }
    }

    Ok(())
}
