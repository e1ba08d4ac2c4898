//! Savings plan and goal display formatting

use crate::models::{
    Money, MonthKey, PlanWarning, PurchaseGoal, PurchaseGoalAnalysis, SavingsPlan, SavingsProgress,
};

/// Format a projected plan with its month-by-month schedule
pub fn format_plan(plan: &SavingsPlan, warnings: &[PlanWarning], symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Savings plan: {}\n", plan.item));
    output.push_str(&format!("{}\n", "=".repeat(48)));
    output.push_str(&format!("Target:          {:>14}\n", money(plan.target_amount)));
    output.push_str(&format!("Monthly surplus: {:>14}\n", money(plan.monthly_surplus)));
    output.push_str(&format!("Monthly saving:  {:>14}\n", money(plan.monthly_saving)));
    output.push_str(&format!(
        "Duration:        {:>14}\n",
        format!("{} months", plan.months_needed)
    ));
    output.push_str(&format!("From {} to {}\n", plan.start_date, plan.end_date));

    output.push('\n');
    output.push_str(&format!(
        "{:<9}  {:>12}  {:>14}  {:>6}\n",
        "Month", "Saving", "Accumulated", "Done"
    ));
    output.push_str(&format!("{:-<9}  {:->12}  {:->14}  {:->6}\n", "", "", "", ""));
    for entry in &plan.breakdown {
        output.push_str(&format!(
            "{:<9}  {:>12}  {:>14}  {:>5.0}%\n",
            entry.month_label,
            money(entry.planned_amount),
            money(entry.cumulative_total),
            entry.percent_complete
        ));
    }

    if !warnings.is_empty() {
        output.push('\n');
        for warning in warnings {
            output.push_str(&format!("Warning: {}\n", warning));
        }
    }

    output
}

/// Format goals as a table
pub fn format_goal_list(goals: &[&PurchaseGoal], symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals found.".to_string();
    }

    let item_width = goals
        .iter()
        .map(|g| g.item.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<item_width$}  {:>12}  {:>12}  {:>6}  {:<9}  {}\n",
        "ID",
        "Item",
        "Target",
        "Saved",
        "Done",
        "Status",
        "Priority",
        item_width = item_width,
    ));
    output.push_str(&format!(
        "{:-<13}  {:-<item_width$}  {:->12}  {:->12}  {:->6}  {:-<9}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        item_width = item_width,
    ));

    for goal in goals {
        output.push_str(&format!(
            "{:<13}  {:<item_width$}  {:>12}  {:>12}  {:>5.0}%  {:<9}  {}\n",
            goal.id.to_string(),
            goal.item,
            goal.target_amount.format_with_symbol(symbol),
            goal.current_saved.format_with_symbol(symbol),
            goal.progress_percent().min(100.0),
            goal.status,
            goal.priority,
            item_width = item_width,
        ));
    }

    output
}

/// Format one goal with its recorded progress and latest analysis
pub fn format_goal_details(
    goal: &PurchaseGoal,
    progress: &[&SavingsProgress],
    analysis: Option<&PurchaseGoalAnalysis>,
    next_deposit: MonthKey,
    symbol: &str,
) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Goal: {}\n", goal.item));
    output.push_str(&format!("  ID:             {}\n", goal.id));
    if let Some(description) = &goal.description {
        output.push_str(&format!("  Description:    {}\n", description));
    }
    output.push_str(&format!("  Status:         {}\n", goal.status));
    output.push_str(&format!("  Priority:       {}\n", goal.priority));
    output.push_str(&format!("  Category:       {}\n", goal.category));
    output.push_str(&format!("  Target:         {}\n", money(goal.target_amount)));
    output.push_str(&format!("  Monthly saving: {}\n", money(goal.monthly_saving)));
    output.push_str(&format!(
        "  Saved:          {} ({:.1}%)\n",
        money(goal.current_saved),
        goal.progress_percent()
    ));
    output.push_str(&format!("  Remaining:      {}\n", money(goal.remaining())));
    if let Some(months) = goal.months_needed() {
        output.push_str(&format!("  Months needed:  {}\n", months));
    }
    output.push_str(&format!(
        "  Started:        {}  (estimated end {})\n",
        goal.start_date, goal.estimated_end_date
    ));
    if goal.is_active() {
        output.push_str(&format!("  Next deposit:   {}\n", next_deposit.label()));
    }

    if !progress.is_empty() {
        output.push('\n');
        output.push_str("  Progress\n");
        for record in progress {
            output.push_str(&format!(
                "  {:<9} {:>12} of {:>12}  total {:>12}  {:>5.1}%  {}\n",
                record.month.label(),
                money(record.actual_amount),
                money(record.planned_amount),
                money(record.cumulative_total),
                record.percent_complete,
                if record.on_track { "on track" } else { "behind" }
            ));
        }
    }

    if let Some(analysis) = analysis {
        output.push('\n');
        output.push_str(&format_goal_analysis(analysis));
    }

    output
}

/// Format a plan analysis
pub fn format_goal_analysis(analysis: &PurchaseGoalAnalysis) -> String {
    let viability = &analysis.viability;
    let mut output = String::new();

    output.push_str(&format!(
        "Analysis ({})\n",
        analysis.generated_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  Realistic: {}  (success probability {:.0}%)\n",
        if viability.is_realistic { "yes" } else { "no" },
        viability.success_probability
    ));
    output.push_str(&format!("  {}\n", viability.reasoning));
    if let Some(amount) = viability.suggested_amount {
        output.push_str(&format!("  Suggested monthly amount: {:.2}\n", amount));
    }
    for risk in &viability.risks {
        output.push_str(&format!("  - risk: {}\n", risk));
    }
    for alternative in viability.alternatives.iter().flatten() {
        output.push_str(&format!("  - alternative: {}\n", alternative));
    }

    for option in &analysis.acceleration_options {
        output.push_str(&format!(
            "  [{}] {} month(s) sooner with {:.2} more per month\n",
            option.scenario, option.months_reduced, option.additional_monthly_saving
        ));
        if !option.description.is_empty() {
            output.push_str(&format!("      {}\n", option.description));
        }
        for suggestion in &option.suggestions {
            output.push_str(&format!("      * {}\n", suggestion));
        }
    }

    if !analysis.tips.is_empty() {
        output.push_str("  Tips:\n");
        for tip in &analysis.tips {
            output.push_str(&format!("  * {}\n", tip));
        }
    }

    output
}
