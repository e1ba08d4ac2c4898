//! Expense and income display formatting

use crate::models::{Expense, Income, MonthKey};

/// Format expenses as a table with their paid status for `month`
pub fn format_expense_list(
    expenses: &[Expense],
    month: MonthKey,
    is_paid: impl Fn(&Expense) -> bool,
    symbol: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let name_width = expenses
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<name_width$}  {:>12}  {:>3}  {:<13}  {}\n",
        "ID",
        "Name",
        "Value",
        "Due",
        "Category",
        format!("Status ({})", month),
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<13}  {:-<name_width$}  {:->12}  {:->3}  {:-<13}  {:-<16}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for expense in expenses {
        let status = if !expense.is_active {
            "inactive"
        } else if is_paid(expense) {
            "paid"
        } else {
            "open"
        };
        let due = expense
            .due_day
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<13}  {:<name_width$}  {:>12}  {:>3}  {:<13}  {}\n",
            expense.id.to_string(),
            expense.name,
            expense.value.format_with_symbol(symbol),
            due,
            expense.category.label(),
            status,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, paid_this_month: bool, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:        {}\n", expense.id));
    output.push_str(&format!("  Value:     {}\n", expense.value.format_with_symbol(symbol)));
    output.push_str(&format!("  Category:  {}\n", expense.category.label()));
    if let Some(day) = expense.due_day {
        output.push_str(&format!("  Due day:   {}\n", day));
    }
    if let Some(method) = &expense.payment_method {
        output.push_str(&format!("  Payment:   {}\n", method));
    }
    if let Some(end) = expense.end_date {
        output.push_str(&format!("  Ends:      {}\n", end));
    }
    output.push_str(&format!(
        "  Active:    {}\n",
        if expense.is_active { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Paid:      {}\n",
        if paid_this_month { "Yes (this month)" } else { "No" }
    ));
    if let Some(notes) = &expense.notes {
        output.push_str(&format!("  Notes:     {}\n", notes));
    }

    output
}

/// Format income records, newest month first, with a total
pub fn format_income_list(incomes: &[&Income], symbol: &str) -> String {
    if incomes.is_empty() {
        return "No income recorded.".to_string();
    }

    let source_width = incomes
        .iter()
        .map(|i| i.source.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<7}  {:<source_width$}  {:>12}\n",
        "ID",
        "Month",
        "Source",
        "Amount",
        source_width = source_width,
    ));
    output.push_str(&format!(
        "{:-<13}  {:-<7}  {:-<source_width$}  {:->12}\n",
        "",
        "",
        "",
        "",
        source_width = source_width,
    ));

    for income in incomes {
        output.push_str(&format!(
            "{:<13}  {:<7}  {:<source_width$}  {:>12}\n",
            income.id.to_string(),
            income.month,
            income.source,
            income.amount.format_with_symbol(symbol),
            source_width = source_width,
        ));
    }

    let total: crate::models::Money = incomes.iter().map(|i| i.amount).sum();
    output.push_str(&format!(
        "{:<13}  {:<7}  {:<source_width$}  {:>12}\n",
        "TOTAL",
        "",
        "",
        total.format_with_symbol(symbol),
        source_width = source_width,
    ));

    output
}
