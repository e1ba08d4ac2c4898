//! Savings plan command
//!
//! Projects a plan for a purchase from the current figures, optionally asks
//! the analysis backend for an assessment, and optionally commits the plan
//! as a goal.

use clap::Args;
use tracing::warn;

use super::parse_money;
use crate::analysis::{Analyst, GeminiBackend};
use crate::config::Settings;
use crate::display::{format_goal_analysis, format_plan};
use crate::error::{PocketError, PocketResult};
use crate::models::{GoalPriority, GoalUpdate, PlanRequest, PurchaseGoalAnalysis, SavingsPlan};
use crate::services::planner::monthly_surplus;
use crate::tracker::Tracker;

/// Arguments for `pocketplan plan`
#[derive(Args)]
pub struct PlanArgs {
    /// What you are saving for
    pub item: String,

    /// Price of the item
    pub target: String,

    /// Monthly saving to use instead of the suggested one
    #[arg(short, long)]
    pub saving: Option<String>,

    /// Monthly income to plan with (defaults to this month's recorded income)
    #[arg(short, long)]
    pub income: Option<String>,

    /// Ask the analysis backend whether the plan is realistic
    #[arg(short, long)]
    pub analyze: bool,

    /// Save the plan as a goal
    #[arg(long)]
    pub save: bool,

    /// Goal description (with --save)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Goal priority: high, medium or low (with --save)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Goal category label such as "electronics" (with --save)
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Handle the plan command
pub fn handle_plan_command(tracker: &mut Tracker, settings: &Settings, args: PlanArgs) -> PocketResult<()> {
    let target = parse_money(&args.target)?;
    let income = args.income.as_deref().map(parse_money).transpose()?;
    let saving = args.saving.as_deref().map(parse_money).transpose()?;
    let priority = args
        .priority
        .as_deref()
        .map(|p| p.parse::<GoalPriority>().map_err(PocketError::Validation))
        .transpose()?;

    let request = tracker.plan_request(args.item.trim(), target, income, saving);
    let Some(plan) = tracker.compute_plan(&request)? else {
        let surplus = monthly_surplus(&request);
        println!("A plan for {} is not possible right now.", request.item);
        println!(
            "Income {} minus fixed expenses {} and estimated variable spending {} leaves {}.",
            settings.format_money(request.monthly_income),
            settings.format_money(request.fixed_expenses),
            settings.format_money(request.estimated_variable_expenses),
            settings.format_money(surplus)
        );
        if income.is_none() {
            println!("Pass --income to plan with a different monthly income.");
        }
        return Ok(());
    };

    let warnings = tracker.plan_warnings(&plan);
    print!("{}", format_plan(&plan, &warnings, &settings.currency_symbol));

    let analysis = if args.analyze {
        analyze(tracker, settings, &plan, &request)
    } else {
        None
    };
    if let Some(analysis) = &analysis {
        println!();
        print!("{}", format_goal_analysis(analysis));
    }

    if args.save {
        let goal = tracker.save_goal(&plan, args.description)?;
        if priority.is_some() || args.category.is_some() {
            tracker.update_goal(
                goal.id,
                GoalUpdate {
                    priority,
                    category: args.category.map(|c| c.trim().to_lowercase()),
                    ..Default::default()
                },
            )?;
        }
        if let Some(analysis) = analysis {
            tracker.save_goal_analysis(goal.id, analysis)?;
        }
        println!();
        println!("Saved goal: {}", goal.item);
        println!("  ID: {}", goal.id);
    }

    Ok(())
}

/// Run the plan analysis, reporting failures instead of aborting the plan
fn analyze(
    tracker: &Tracker,
    settings: &Settings,
    plan: &SavingsPlan,
    request: &PlanRequest,
) -> Option<PurchaseGoalAnalysis> {
    let result = GeminiBackend::from_settings(&settings.analysis).and_then(|backend| {
        Analyst::new(Box::new(backend), settings.currency_symbol.as_str()).analyze_plan(
            plan,
            request,
            tracker.expenses(),
            tracker.now(),
        )
    });

    match result {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(error = %e, "plan analysis failed");
            eprintln!("Analysis unavailable: {}", e);
            None
        }
    }
}
