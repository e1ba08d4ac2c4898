//! Goal CLI commands
//!
//! Goals are created from plans (`pocketplan plan --save`); these commands
//! inspect them, record monthly deposits and change their status.

use clap::Subcommand;

use super::parse_money;
use crate::config::Settings;
use crate::display::{format_goal_details, format_goal_list};
use crate::error::{PocketError, PocketResult};
use crate::models::{GoalPriority, GoalStatus, GoalUpdate, MonthKey, PurchaseGoal};
use crate::services::goal::next_deposit_month;
use crate::tracker::Tracker;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals
    List {
        /// Include completed and cancelled goals
        #[arg(short, long)]
        all: bool,
    },

    /// Show a goal with its progress and analysis
    Show {
        /// Goal item or ID
        goal: String,
    },

    /// Record the amount saved for a month
    Progress {
        /// Goal item or ID
        goal: String,

        /// Amount actually saved
        amount: String,

        /// Month (YYYY-MM, defaults to the next month without a deposit)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change a goal's status
    Status {
        /// Goal item or ID
        goal: String,

        /// New status (active, paused, completed, cancelled)
        status: String,
    },

    /// Edit a goal
    Edit {
        /// Goal item or ID
        goal: String,

        /// New description (empty clears it)
        #[arg(short, long)]
        description: Option<String>,

        /// New monthly saving
        #[arg(short, long)]
        saving: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,

        /// New category label
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a goal with its progress and analysis
    Remove {
        /// Goal item or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    tracker: &mut Tracker,
    settings: &Settings,
    cmd: GoalCommands,
) -> PocketResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::List { all } => {
            let goals: Vec<&PurchaseGoal> = tracker
                .goals()
                .goals
                .iter()
                .filter(|g| {
                    all || matches!(g.status, GoalStatus::Active | GoalStatus::Paused)
                })
                .collect();
            print!("{}", format_goal_list(&goals, symbol));
        }

        GoalCommands::Show { goal } => {
            let goal = tracker.find_goal(&goal)?;
            let book = tracker.goals();
            print!(
                "{}",
                format_goal_details(
                    goal,
                    &book.progress_for(goal.id),
                    book.analysis_for(goal.id),
                    next_deposit_month(book, goal),
                    symbol,
                )
            );
        }

        GoalCommands::Progress {
            goal,
            amount,
            month,
        } => {
            let amount = parse_money(&amount)?;
            let found = tracker.find_goal(&goal)?;
            let id = found.id;
            let month = match month {
                Some(m) => m
                    .parse::<MonthKey>()
                    .map_err(|e| PocketError::Validation(format!("Invalid month: {}", e)))?,
                None => next_deposit_month(tracker.goals(), found),
            };

            let progress = tracker.record_goal_progress(id, month, amount)?;
            let goal = tracker
                .goals()
                .goal(id)
                .ok_or_else(|| PocketError::goal_not_found(id.to_string()))?;
            println!(
                "Recorded {} for {} in {}",
                settings.format_money(progress.actual_amount),
                goal.item,
                month.label()
            );
            println!(
                "  Saved {} of {} ({:.1}%), {}",
                settings.format_money(progress.cumulative_total),
                settings.format_money(goal.target_amount),
                progress.percent_complete,
                if progress.on_track { "on track" } else { "behind plan" }
            );
            if goal.status == GoalStatus::Completed {
                println!("Goal reached!");
            }
        }

        GoalCommands::Status { goal, status } => {
            let status: GoalStatus = status.parse().map_err(PocketError::Validation)?;
            let id = tracker.find_goal(&goal)?.id;
            let updated = tracker.update_goal(
                id,
                GoalUpdate {
                    status: Some(status),
                    ..Default::default()
                },
            )?;
            println!("{} is now {}", updated.item, updated.status);
        }

        GoalCommands::Edit {
            goal,
            description,
            saving,
            priority,
            category,
        } => {
            let id = tracker.find_goal(&goal)?.id;
            let update = GoalUpdate {
                description: super::clearable(description),
                monthly_saving: saving.as_deref().map(parse_money).transpose()?,
                priority: priority
                    .as_deref()
                    .map(|p| p.parse::<GoalPriority>().map_err(PocketError::Validation))
                    .transpose()?,
                category: category.map(|c| c.trim().to_lowercase()),
                ..Default::default()
            };
            let updated = tracker.update_goal(id, update)?;
            println!("Updated goal: {}", updated.item);
        }

        GoalCommands::Remove { goal } => {
            let id = tracker.find_goal(&goal)?.id;
            let removed = tracker.delete_goal(id)?;
            println!("Deleted goal: {}", removed.item);
        }
    }

    Ok(())
}
