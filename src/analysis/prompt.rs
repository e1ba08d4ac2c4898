//! Prompt builders
//!
//! Each prompt states the user's figures and the exact JSON shape the reply
//! must take. Amounts are rendered with the configured currency symbol.

use std::fmt::Write;

use crate::models::{Expense, Money, PlanRequest, SavingsPlan};

const JSON_ONLY: &str = "Reply with the JSON object only, no markdown and no extra text.";

fn expense_lines(expenses: &[Expense], symbol: &str) -> String {
    let mut lines = String::new();
    for expense in expenses.iter().filter(|e| e.is_active) {
        let _ = writeln!(
            lines,
            "- {}: {} ({})",
            expense.name,
            expense.value.format_with_symbol(symbol),
            expense.category.key()
        );
    }
    if lines.is_empty() {
        lines.push_str("No recurring expenses recorded\n");
    }
    lines
}

/// Viability and acceleration analysis for a savings plan
pub fn savings_plan(
    plan: &SavingsPlan,
    request: &PlanRequest,
    expenses: &[Expense],
    symbol: &str,
) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    format!(
        "Analyse this purchase plan.\n\n\
USER FIGURES:\n\
- Monthly income: {income}\n\
- Fixed expenses: {fixed}\n\
- Variable expenses (average): {variable}\n\
- Monthly surplus: {surplus}\n\n\
GOAL:\n\
- Item: {item}\n\
- Price: {target}\n\
- Months needed: {months}\n\
- Monthly saving: {saving}\n\n\
CURRENT FIXED EXPENSES:\n{expenses}\n\
Provide a complete analysis as a JSON object:\n\
{{\n\
  \"viability\": {{\n\
    \"isRealistic\": boolean,\n\
    \"successProbability\": number (0-100),\n\
    \"risks\": [\"risk 1\", \"risk 2\"],\n\
    \"reasoning\": \"detailed explanation\",\n\
    \"suggestedAmount\": number (optional),\n\
    \"alternatives\": [\"alternative 1\"] (optional)\n\
  }},\n\
  \"accelerationOptions\": [\n\
    {{\"scenario\": \"light\", \"monthsReduced\": number, \"additionalMonthlySaving\": number, \"suggestions\": [\"...\"], \"description\": \"...\"}},\n\
    {{\"scenario\": \"moderate\", \"monthsReduced\": number, \"additionalMonthlySaving\": number, \"suggestions\": [\"...\"], \"description\": \"...\"}},\n\
    {{\"scenario\": \"intense\", \"monthsReduced\": number, \"additionalMonthlySaving\": number, \"suggestions\": [\"...\"], \"description\": \"...\"}}\n\
  ],\n\
  \"tips\": [\"tip 1\", \"tip 2\", \"tip 3\"]\n\
}}\n\n\
{json_only}\n",
        income = money(request.monthly_income),
        fixed = money(request.fixed_expenses),
        variable = money(request.estimated_variable_expenses),
        surplus = money(plan.monthly_surplus),
        item = plan.item,
        target = money(plan.target_amount),
        months = plan.months_needed,
        saving = money(plan.monthly_saving),
        expenses = expense_lines(expenses, symbol),
        json_only = JSON_ONLY,
    )
}

/// Overall review of recurring expenses with the top optimisations
pub fn expense_review(expenses: &[Expense], monthly_income: Option<Money>, symbol: &str) -> String {
    let total: Money = expenses.iter().filter(|e| e.is_active).map(|e| e.value).sum();
    let income_line = match monthly_income.filter(|m| m.is_positive()) {
        Some(income) => format!("Income: {}/month\n", income.format_with_symbol(symbol)),
        None => String::new(),
    };
    format!(
        "Analyse these recurring monthly expenses:\n\n\
{expenses}\n\
Total: {total}/month\n\
{income_line}\n\
Provide the analysis as a JSON object:\n\
{{\n\
  \"overall\": {{\"idealPercent\": number, \"actualPercent\": number, \"status\": string}},\n\
  \"topOptimisations\": [{{\"description\": string, \"potentialSaving\": number, \"priority\": string}}],\n\
  \"annualSavingPotential\": number,\n\
  \"actions\": [{{\"action\": string, \"impact\": string}}]\n\
}}\n\n\
{json_only}\n",
        expenses = expense_lines(expenses, symbol),
        total = total.format_with_symbol(symbol),
        income_line = income_line,
        json_only = JSON_ONLY,
    )
}

/// Look for waste in recurring expenses
pub fn waste(expenses: &[Expense], symbol: &str) -> String {
    format!(
        "Identify waste in these recurring expenses:\n\n\
{expenses}\n\
For each problem found, answer with a JSON object:\n\
{{\n\
  \"findings\": [\n\
    {{\"expenseName\": string, \"problem\": string, \"potentialSaving\": number, \"recommendedAction\": string}}\n\
  ]\n\
}}\n\n\
{json_only}\n",
        expenses = expense_lines(expenses, symbol),
        json_only = JSON_ONLY,
    )
}

/// Three cut plans (light, moderate, aggressive) reaching a monthly savings target
pub fn cut_plans(expenses: &[Expense], target_savings: Money, symbol: &str) -> String {
    format!(
        "Goal: cut {target}/month\n\n\
Current expenses:\n{expenses}\n\
Create three plans as a JSON object:\n\
{{\n\
  \"plans\": [\n\
    {{\"level\": \"light\", \"items\": [\"expense name\"], \"totalSaving\": number, \"description\": string}},\n\
    {{\"level\": \"moderate\", \"items\": [\"expense name\"], \"totalSaving\": number, \"description\": string}},\n\
    {{\"level\": \"aggressive\", \"items\": [\"expense name\"], \"totalSaving\": number, \"description\": string}}\n\
  ]\n\
}}\n\n\
{json_only}\n",
        target = target_savings.format_with_symbol(symbol),
        expenses = expense_lines(expenses, symbol),
        json_only = JSON_ONLY,
    )
}

/// A script for negotiating one expense down
pub fn negotiation(expense: &Expense, symbol: &str) -> String {
    format!(
        "Write a negotiation script to lower the cost of:\n\n\
Name: {name}\n\
Current value: {value}\n\
Category: {category}\n\n\
Answer with a JSON object:\n\
{{\n\
  \"arguments\": [\"argument 1\", \"argument 2\"],\n\
  \"script\": \"conversation script\",\n\
  \"competitorPrices\": [\"price research\"],\n\
  \"reductionTarget\": number\n\
}}\n\n\
{json_only}\n",
        name = expense.name,
        value = expense.value.format_with_symbol(symbol),
        category = expense.category.key(),
        json_only = JSON_ONLY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;

    fn expenses() -> Vec<Expense> {
        let mut paused = Expense::new("Old gym", Money::from_units(80), ExpenseCategory::Health);
        paused.is_active = false;
        vec![
            Expense::new("Streaming", Money::from_cents(4590), ExpenseCategory::Subscriptions),
            paused,
        ]
    }

    #[test]
    fn test_inactive_expenses_are_left_out() {
        let prompt = waste(&expenses(), "$");
        assert!(prompt.contains("- Streaming: $45.90 (subscriptions)"));
        assert!(!prompt.contains("Old gym"));
    }

    #[test]
    fn test_expense_review_totals_and_income() {
        let prompt = expense_review(&expenses(), Some(Money::from_units(3000)), "R$");
        assert!(prompt.contains("Total: R$45.90/month"));
        assert!(prompt.contains("Income: R$3000.00/month"));

        let without_income = expense_review(&expenses(), None, "$");
        assert!(!without_income.contains("Income:"));
    }

    #[test]
    fn test_empty_expense_list() {
        let prompt = cut_plans(&[], Money::from_units(200), "$");
        assert!(prompt.contains("Goal: cut $200.00/month"));
        assert!(prompt.contains("No recurring expenses recorded"));
    }

    #[test]
    fn test_negotiation_names_the_expense() {
        let expense = Expense::new("Internet", Money::from_units(120), ExpenseCategory::Housing);
        let prompt = negotiation(&expense, "$");
        assert!(prompt.contains("Name: Internet"));
        assert!(prompt.contains("\"reductionTarget\": number"));
    }
}
