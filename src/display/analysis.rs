//! Formatting for AI expense analyses

use crate::analysis::reply::{CutPlanSet, ExpenseReview, NegotiationScript, WasteReport};

pub fn format_expense_review(review: &ExpenseReview, symbol: &str) -> String {
    let mut output = String::new();
    let overall = &review.overall;

    output.push_str("Expense review\n");
    output.push_str(&format!("{}\n", "=".repeat(40)));
    output.push_str(&format!(
        "Spending share: {:.1}% (ideal {:.1}%)",
        overall.actual_percent, overall.ideal_percent
    ));
    if !overall.status.is_empty() {
        output.push_str(&format!("  [{}]", overall.status));
    }
    output.push('\n');

    if !review.top_optimisations.is_empty() {
        output.push_str("\nTop optimisations\n");
        for (i, item) in review.top_optimisations.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} (save {}{:.2}/month",
                i + 1,
                item.description,
                symbol,
                item.potential_saving
            ));
            if !item.priority.is_empty() {
                output.push_str(&format!(", {} priority", item.priority));
            }
            output.push_str(")\n");
        }
    }

    output.push_str(&format!(
        "\nAnnual saving potential: {}{:.2}\n",
        symbol, review.annual_saving_potential
    ));

    if !review.actions.is_empty() {
        output.push_str("\nActions\n");
        for action in &review.actions {
            output.push_str(&format!("- {}", action.action));
            if !action.impact.is_empty() {
                output.push_str(&format!(" ({})", action.impact));
            }
            output.push('\n');
        }
    }

    output
}

pub fn format_waste_report(report: &WasteReport, symbol: &str) -> String {
    if report.findings.is_empty() {
        return "No wasteful expenses found.".to_string();
    }

    let mut output = String::new();
    for finding in &report.findings {
        output.push_str(&format!(
            "{}: {}\n  saving {}{:.2}/month, {}\n",
            finding.expense_name,
            finding.problem,
            symbol,
            finding.potential_saving,
            finding.recommended_action
        ));
    }
    output
}

pub fn format_cut_plans(plans: &CutPlanSet, symbol: &str) -> String {
    if plans.plans.is_empty() {
        return "No cut plans suggested.".to_string();
    }

    let mut output = String::new();
    for plan in &plans.plans {
        output.push_str(&format!(
            "[{}] saves {}{:.2}/month\n",
            plan.level, symbol, plan.total_saving
        ));
        if !plan.description.is_empty() {
            output.push_str(&format!("  {}\n", plan.description));
        }
        for item in &plan.items {
            output.push_str(&format!("  - {}\n", item));
        }
    }
    output
}

pub fn format_negotiation(script: &NegotiationScript, expense_name: &str, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Negotiating {}\n", expense_name));
    if script.reduction_target > 0.0 {
        output.push_str(&format!(
            "Aim for: {}{:.2}/month\n",
            symbol, script.reduction_target
        ));
    }
    if !script.arguments.is_empty() {
        output.push_str("\nArguments\n");
        for argument in &script.arguments {
            output.push_str(&format!("- {}\n", argument));
        }
    }
    if !script.competitor_prices.is_empty() {
        output.push_str("\nCompetitors\n");
        for price in &script.competitor_prices {
            output.push_str(&format!("- {}\n", price));
        }
    }
    if !script.script.is_empty() {
        output.push_str("\nScript\n");
        output.push_str(&script.script);
        output.push('\n');
    }

    output
}
