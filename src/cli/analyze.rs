//! AI analysis CLI commands

use clap::Subcommand;

use super::parse_money;
use crate::analysis::{Analyst, GeminiBackend};
use crate::config::Settings;
use crate::display::{format_cut_plans, format_expense_review, format_negotiation, format_waste_report};
use crate::error::{PocketError, PocketResult};
use crate::tracker::Tracker;

/// Analysis subcommands
#[derive(Subcommand)]
pub enum AnalyzeCommands {
    /// Review recurring expenses against this month's income
    Expenses,

    /// Look for wasteful expenses
    Waste,

    /// Suggest cut plans that free up a monthly amount
    Cuts {
        /// Monthly amount to free up
        target: String,
    },

    /// Draft a script for negotiating an expense down
    Negotiate {
        /// Expense name or ID
        expense: String,
    },
}

/// Handle an analysis command
pub fn handle_analyze_command(
    tracker: &Tracker,
    settings: &Settings,
    cmd: AnalyzeCommands,
) -> PocketResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let active: Vec<_> = tracker.expense_service().active().cloned().collect();

    // Validate input before requiring a backend
    let cut_target = match &cmd {
        AnalyzeCommands::Cuts { target } => Some(parse_money(target)?),
        _ => None,
    };
    if matches!(cmd, AnalyzeCommands::Expenses | AnalyzeCommands::Waste | AnalyzeCommands::Cuts { .. })
        && active.is_empty()
    {
        println!("No active expenses to analyze.");
        return Ok(());
    }

    let backend = GeminiBackend::from_settings(&settings.analysis)?;
    let analyst = Analyst::new(Box::new(backend), symbol);
    let stale = || PocketError::Analysis("Reply was superseded by a newer request".into());

    let output = match cmd {
        AnalyzeCommands::Expenses => {
            let income = Some(tracker.current_month_income()).filter(|i| i.is_positive());
            let review = analyst.review_expenses(&active, income)?.ok_or_else(stale)?;
            format_expense_review(&review, symbol)
        }
        AnalyzeCommands::Waste => {
            let report = analyst.detect_waste(&active)?.ok_or_else(stale)?;
            format_waste_report(&report, symbol)
        }
        AnalyzeCommands::Cuts { .. } => {
            let target = cut_target.unwrap_or_default();
            let plans = analyst.cut_plans(&active, target)?.ok_or_else(stale)?;
            format_cut_plans(&plans, symbol)
        }
        AnalyzeCommands::Negotiate { expense } => {
            let expense = tracker.find_expense(&expense)?;
            let script = analyst.negotiation_script(expense)?.ok_or_else(stale)?;
            format_negotiation(&script, &expense.name, symbol)
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
